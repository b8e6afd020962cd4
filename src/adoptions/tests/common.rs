use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::adoptions::domain::{
    AdoptionApplication, ApplicantContact, ApplicationFilters, ApplicationForm, ApplicationId,
    ApplicationStatus, HouseholdProfile, HousingDetails, Occupancy, UserId,
};
use crate::adoptions::lifecycle::LifecycleCoordinator;
use crate::adoptions::repository::{ApplicationRepository, NewApplication, StatusTransition};
use crate::adoptions::store::ApplicationStore;
use crate::pets::domain::{
    MedicalFlags, NewPet, Pet, PetGender, PetImages, PetSize, PetSpecies,
};
use crate::pets::repository::PetRepository;
use crate::repository::RepositoryError;
use crate::storage::MemoryShelterStore;

pub(super) type MemoryStoreService = ApplicationStore<MemoryShelterStore, MemoryShelterStore>;
pub(super) type MemoryCoordinator = LifecycleCoordinator<MemoryShelterStore, MemoryShelterStore>;

pub(super) fn build_services() -> (
    Arc<MemoryStoreService>,
    Arc<MemoryCoordinator>,
    Arc<MemoryShelterStore>,
) {
    let store = Arc::new(MemoryShelterStore::default());
    let applications = Arc::new(ApplicationStore::new(store.clone(), store.clone()));
    let lifecycle = Arc::new(LifecycleCoordinator::new(store.clone(), store.clone()));
    (applications, lifecycle, store)
}

pub(super) fn seed_pet(store: &MemoryShelterStore, name: &str) -> Pet {
    let slug = crate::pets::slug::slugify(name);
    PetRepository::insert(
        store,
        NewPet {
            name: name.to_string(),
            slug: None,
            species: PetSpecies::Dog,
            breed: "Beagle".to_string(),
            age: "2 years".to_string(),
            gender: PetGender::Male,
            size: PetSize::Medium,
            color: "Tricolor".to_string(),
            description: "Sweet hound who loves company.".to_string(),
            personality: vec!["gentle".to_string()],
            medical: MedicalFlags::default(),
            images: PetImages::default(),
            arrival_date: NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date"),
            adoption_fee_cents: 12_500,
            featured: false,
        },
        slug,
    )
    .expect("seed pet")
}

pub(super) fn valid_form(pet: crate::pets::PetId) -> ApplicationForm {
    ApplicationForm {
        pet,
        contact: ApplicantContact {
            first_name: "Jordan".to_string(),
            last_name: "Ellis".to_string(),
            email: "a@x.com".to_string(),
            phone: "(515) 555-0133".to_string(),
            address: "48 Maple Ct, Des Moines, IA 50309".to_string(),
        },
        housing: HousingDetails {
            housing_type: "apartment".to_string(),
            occupancy: Occupancy::Rent,
            landlord_approval: true,
        },
        household: HouseholdProfile {
            adults: 2,
            children: 1,
            has_other_pets: false,
            other_pets_description: String::new(),
        },
        previous_pet_experience: "I have owned three dogs for over ten years total.".to_string(),
        reason_for_adoption: "I want to give a rescue dog a loving forever home with space to run."
            .to_string(),
    }
}

/// Repository stub standing in for a store that lost its backing disk.
pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: NewApplication) -> Result<AdoptionApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<AdoptionApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn transition(
        &self,
        _id: ApplicationId,
        _status: ApplicationStatus,
        _reviewed_at: DateTime<Utc>,
    ) -> Result<StatusTransition, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_notes(
        &self,
        _id: ApplicationId,
        _notes: String,
        _reviewed_at: DateTime<Utc>,
    ) -> Result<AdoptionApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_identity(
        &self,
        _user: Option<UserId>,
        _email: &str,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn search(
        &self,
        _filters: &ApplicationFilters,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count_with_status(&self, _status: ApplicationStatus) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
