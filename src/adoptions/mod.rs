//! Adoption applications: submission validation, persistence, and the
//! lifecycle coordination that keeps pet availability consistent with
//! application outcomes.

pub mod domain;
pub mod lifecycle;
pub mod repository;
pub mod router;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdoptionApplication, ApplicantContact, ApplicationFilters, ApplicationForm, ApplicationId,
    ApplicationStatus, ApplicationStatusView, HouseholdProfile, HousingDetails, Occupancy,
    SubmitterIdentity, UserId,
};
pub use lifecycle::{transition_allowed, LifecycleCoordinator, LifecycleError};
pub use repository::{ApplicationRepository, NewApplication, StatusTransition};
pub use router::{admin_application_router, application_router, AdminApplicationState};
pub use store::{ApplicationStore, SubmissionError};
pub use validation::{FieldViolation, SubmissionPolicy};
