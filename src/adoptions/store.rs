use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::pets::{PetId, PetRepository};
use crate::repository::RepositoryError;

use super::domain::{
    AdoptionApplication, ApplicationFilters, ApplicationForm, ApplicationId, SubmitterIdentity,
    UserId,
};
use super::repository::{ApplicationRepository, NewApplication};
use super::validation::{FieldViolation, SubmissionPolicy};

/// Service validating and persisting adoption applications, and answering
/// the read queries around them. Status changes are not its business; those
/// belong to the lifecycle coordinator.
pub struct ApplicationStore<R, P> {
    applications: Arc<R>,
    pets: Arc<P>,
    policy: SubmissionPolicy,
}

impl<R, P> ApplicationStore<R, P>
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
{
    pub fn new(applications: Arc<R>, pets: Arc<P>) -> Self {
        Self::with_policy(applications, pets, SubmissionPolicy::default())
    }

    pub fn with_policy(applications: Arc<R>, pets: Arc<P>, policy: SubmissionPolicy) -> Self {
        Self {
            applications,
            pets,
            policy,
        }
    }

    /// Validate and persist a submission. The referenced pet's availability
    /// is untouched here; only a completed adoption moves it, and that
    /// happens in the coordinator.
    pub fn submit(
        &self,
        form: ApplicationForm,
        identity: SubmitterIdentity,
    ) -> Result<AdoptionApplication, SubmissionError> {
        self.policy
            .validate(&form)
            .map_err(SubmissionError::Validation)?;

        let pet = self
            .pets
            .fetch(form.pet)?
            .ok_or(SubmissionError::PetNotFound(form.pet))?;

        let record = NewApplication {
            user: identity.user_id(),
            form,
            submitted_at: Utc::now(),
        };

        match self.applications.insert(record) {
            Ok(stored) => {
                info!(
                    application = %stored.id,
                    pet = %pet.id,
                    "adoption application submitted"
                );
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => Err(SubmissionError::DuplicatePending),
            Err(other) => Err(other.into()),
        }
    }

    /// Overwrite staff notes and stamp the review time.
    pub fn set_notes(
        &self,
        id: ApplicationId,
        notes: String,
    ) -> Result<AdoptionApplication, SubmissionError> {
        match self.applications.set_notes(id, notes, Utc::now()) {
            Ok(application) => Ok(application),
            Err(RepositoryError::NotFound) => Err(SubmissionError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    pub fn get(&self, id: ApplicationId) -> Result<AdoptionApplication, SubmissionError> {
        self.applications
            .fetch(id)?
            .ok_or(SubmissionError::NotFound(id))
    }

    /// History for an applicant: matched by account reference OR by email,
    /// so applications submitted while logged out attach to an account
    /// created later with the same address.
    pub fn for_identity(
        &self,
        user: Option<UserId>,
        email: &str,
    ) -> Result<Vec<AdoptionApplication>, SubmissionError> {
        Ok(self.applications.for_identity(user, email)?)
    }

    pub fn pending(&self) -> Result<Vec<AdoptionApplication>, SubmissionError> {
        Ok(self.applications.pending()?)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AdoptionApplication>, SubmissionError> {
        Ok(self.applications.recent(limit)?)
    }

    pub fn search(
        &self,
        filters: &ApplicationFilters,
    ) -> Result<Vec<AdoptionApplication>, SubmissionError> {
        Ok(self.applications.search(filters)?)
    }
}

/// Error raised when a submission or application lookup fails.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("application failed validation")]
    Validation(Vec<FieldViolation>),
    #[error(
        "you already have a pending application for this pet; please wait for a response before submitting another"
    )]
    DuplicatePending,
    #[error("pet {0} not found")]
    PetNotFound(PetId),
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
