use chrono::{DateTime, Utc};

use crate::repository::RepositoryError;

use super::domain::{
    AdoptionApplication, ApplicationFilters, ApplicationForm, ApplicationId, ApplicationStatus,
    UserId,
};

/// A validated submission ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user: Option<UserId>,
    pub form: ApplicationForm,
    pub submitted_at: DateTime<Utc>,
}

/// Result of an atomic status swap: the updated record plus the status it
/// replaced.
#[derive(Debug, Clone)]
pub struct StatusTransition {
    pub application: AdoptionApplication,
    pub previous: ApplicationStatus,
}

/// Storage abstraction for adoption applications.
///
/// `insert` enforces the partial uniqueness rule: at most one `Pending`
/// application per (email, pet), rejected with `Conflict`. `transition` swaps
/// status and stamps the review time in a single step so the caller never
/// observes a half-applied change.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: NewApplication) -> Result<AdoptionApplication, RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<AdoptionApplication>, RepositoryError>;
    fn transition(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<StatusTransition, RepositoryError>;
    fn set_notes(
        &self,
        id: ApplicationId,
        notes: String,
        reviewed_at: DateTime<Utc>,
    ) -> Result<AdoptionApplication, RepositoryError>;
    /// Applications belonging to an account or submitted under its email,
    /// newest first.
    fn for_identity(
        &self,
        user: Option<UserId>,
        email: &str,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError>;
    fn pending(&self) -> Result<Vec<AdoptionApplication>, RepositoryError>;
    /// Most recent applications, newest first, capped at `limit`.
    fn recent(&self, limit: usize) -> Result<Vec<AdoptionApplication>, RepositoryError>;
    /// Staff triage listing, newest first.
    fn search(
        &self,
        filters: &ApplicationFilters,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError>;
    fn count_with_status(&self, status: ApplicationStatus) -> Result<usize, RepositoryError>;
}
