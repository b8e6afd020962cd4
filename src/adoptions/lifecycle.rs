use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::pets::{PetId, PetStatus, PetStatusWriter};
use crate::repository::RepositoryError;

use super::domain::{AdoptionApplication, ApplicationId, ApplicationStatus};
use super::repository::ApplicationRepository;

/// Decide whether a review-status change is permitted. Every pairing of
/// recognized statuses is currently accepted; tightening the policy (for
/// example forbidding `Rejected -> Completed`) is a change to this function
/// alone.
pub fn transition_allowed(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    let _ = (from, to);
    true
}

/// The only component allowed to change an application's review status, and
/// the single writer keeping the denormalized pet availability in line with
/// adoption outcomes. It is constructed with the `PetStatusWriter`
/// capability; nothing else holds one.
pub struct LifecycleCoordinator<R, W> {
    applications: Arc<R>,
    pets: Arc<W>,
}

impl<R, W> LifecycleCoordinator<R, W>
where
    R: ApplicationRepository + 'static,
    W: PetStatusWriter + 'static,
{
    pub fn new(applications: Arc<R>, pets: Arc<W>) -> Self {
        Self { applications, pets }
    }

    /// Move an application to `new_status` and propagate the pet-side
    /// effect: entering `Completed` marks the pet adopted, leaving
    /// `Completed` makes it available again, and every other change leaves
    /// the pet alone.
    pub fn set_status(
        &self,
        id: ApplicationId,
        new_status: ApplicationStatus,
    ) -> Result<AdoptionApplication, LifecycleError> {
        let current = self
            .applications
            .fetch(id)?
            .ok_or(LifecycleError::ApplicationNotFound(id))?;

        if !transition_allowed(current.status, new_status) {
            return Err(LifecycleError::ForbiddenTransition {
                from: current.status,
                to: new_status,
            });
        }

        let transition = match self.applications.transition(id, new_status, Utc::now()) {
            Ok(transition) => transition,
            Err(RepositoryError::NotFound) => {
                return Err(LifecycleError::ApplicationNotFound(id))
            }
            Err(other) => return Err(other.into()),
        };

        let pet = transition.application.pet;
        if new_status == ApplicationStatus::Completed {
            self.write_pet_status(pet, PetStatus::Adopted)?;
        } else if transition.previous == ApplicationStatus::Completed {
            self.write_pet_status(pet, PetStatus::Available)?;
        }

        info!(
            application = %id,
            from = transition.previous.label(),
            to = new_status.label(),
            "application status updated"
        );

        Ok(transition.application)
    }

    fn write_pet_status(&self, pet: PetId, status: PetStatus) -> Result<(), LifecycleError> {
        match self.pets.write_status(pet, status) {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(LifecycleError::PetNotFound(pet)),
            Err(other) => Err(other.into()),
        }
    }
}

/// Error raised by the lifecycle coordinator.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("pet {0} not found")]
    PetNotFound(PetId),
    #[error("'{value}' is not a recognized application status")]
    InvalidStatus { value: String },
    #[error("status change {} -> {} is not allowed", .from.label(), .to.label())]
    ForbiddenTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
