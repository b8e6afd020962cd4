pub use crate::validation::FieldViolation;

use super::domain::{ApplicationForm, Occupancy};

const DEFAULT_MIN_EXPERIENCE_CHARS: usize = 20;
const DEFAULT_MIN_REASON_CHARS: usize = 30;
const DEFAULT_MIN_PHONE_DIGITS: usize = 10;

/// Dials backing submission validation.
#[derive(Debug, Clone)]
pub struct SubmissionPolicy {
    pub min_experience_chars: usize,
    pub min_reason_chars: usize,
    pub min_phone_digits: usize,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            min_experience_chars: DEFAULT_MIN_EXPERIENCE_CHARS,
            min_reason_chars: DEFAULT_MIN_REASON_CHARS,
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
        }
    }
}

impl SubmissionPolicy {
    /// Check every submission rule, collecting all violations so the
    /// applicant can fix the form in one pass. Nothing is persisted when
    /// this returns `Err`.
    pub fn validate(&self, form: &ApplicationForm) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        for (field, value) in [
            ("first_name", &form.contact.first_name),
            ("last_name", &form.contact.last_name),
            ("address", &form.contact.address),
            ("housing_type", &form.housing.housing_type),
        ] {
            if value.trim().is_empty() {
                violations.push(FieldViolation::new(field, "This field is required."));
            }
        }

        if !looks_like_email(&form.contact.email) {
            violations.push(FieldViolation::new(
                "email",
                "Please enter a valid email address.",
            ));
        }

        let digits = form
            .contact
            .phone
            .chars()
            .filter(|ch| ch.is_ascii_digit())
            .count();
        if digits < self.min_phone_digits {
            violations.push(FieldViolation::new(
                "phone",
                format!(
                    "Please enter a valid phone number with at least {} digits.",
                    self.min_phone_digits
                ),
            ));
        }

        if form.household.adults < 1 {
            violations.push(FieldViolation::new(
                "household_adults",
                "There must be at least 1 adult in the household.",
            ));
        }

        if form.housing.occupancy == Occupancy::Rent && !form.housing.landlord_approval {
            violations.push(FieldViolation::new(
                "landlord_approval",
                "Landlord approval is required if you are renting.",
            ));
        }

        if form.household.has_other_pets
            && form.household.other_pets_description.trim().is_empty()
        {
            violations.push(FieldViolation::new(
                "other_pets_description",
                "Please describe your other pets.",
            ));
        }

        if form.previous_pet_experience.trim().chars().count() < self.min_experience_chars {
            violations.push(FieldViolation::new(
                "previous_pet_experience",
                format!(
                    "Please provide more detail about your previous pet experience (at least {} characters).",
                    self.min_experience_chars
                ),
            ));
        }

        if form.reason_for_adoption.trim().chars().count() < self.min_reason_chars {
            violations.push(FieldViolation::new(
                "reason_for_adoption",
                format!(
                    "Please provide more detail about why you want to adopt (at least {} characters).",
                    self.min_reason_chars
                ),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
