use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pets::PetId;

/// Identifier for an adoption application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a registered account. Account management itself lives
/// outside this service; applications only carry the reference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UserId(pub u64);

/// Who is submitting: a signed-in account or an anonymous visitor matched
/// later by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitterIdentity {
    Anonymous,
    Account(UserId),
}

impl SubmitterIdentity {
    pub fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Account(id) => Some(id),
        }
    }
}

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Own,
    Rent,
}

/// How to reach the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl ApplicantContact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingDetails {
    pub housing_type: String,
    pub occupancy: Occupancy,
    #[serde(default)]
    pub landlord_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub has_other_pets: bool,
    #[serde(default)]
    pub other_pets_description: String,
}

/// Everything an applicant fills in when applying for a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub pet: PetId,
    pub contact: ApplicantContact,
    pub housing: HousingDetails,
    pub household: HouseholdProfile,
    pub previous_pet_experience: String,
    pub reason_for_adoption: String,
}

/// A stored adoption application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionApplication {
    pub id: ApplicationId,
    pub user: Option<UserId>,
    pub pet: PetId,
    pub contact: ApplicantContact,
    pub housing: HousingDetails,
    pub household: HouseholdProfile,
    pub previous_pet_experience: String,
    pub reason_for_adoption: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub notes: String,
}

impl AdoptionApplication {
    /// Applicant-facing snapshot. Staff notes stay out of it.
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id,
            pet: self.pet,
            status: self.status.label(),
            submitted_at: self.submitted_at,
            reviewed_at: self.reviewed_at,
        }
    }
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub pet: PetId,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Staff triage filters over applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilters {
    pub status: Option<ApplicationStatus>,
    /// Free text matched against applicant name, email, and the referenced
    /// pet's name and breed.
    pub search: Option<String>,
}
