use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::pets::domain::{
    MedicalFlags, NewPet, PetGender, PetImages, PetSize, PetSpecies,
};
use crate::pets::registry::PetRegistry;
use crate::storage::MemoryShelterStore;

pub(super) fn build_registry() -> (Arc<PetRegistry<MemoryShelterStore>>, Arc<MemoryShelterStore>) {
    let store = Arc::new(MemoryShelterStore::default());
    let registry = Arc::new(PetRegistry::new(store.clone()));
    (registry, store)
}

pub(super) fn arrival_days_ago(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

pub(super) fn sample_pet(name: &str) -> NewPet {
    NewPet {
        name: name.to_string(),
        slug: None,
        species: PetSpecies::Dog,
        breed: "Beagle".to_string(),
        age: "2 years".to_string(),
        gender: PetGender::Female,
        size: PetSize::Medium,
        color: "Tricolor".to_string(),
        description: "Sweet hound who loves company.".to_string(),
        personality: vec!["gentle".to_string(), "playful".to_string()],
        medical: MedicalFlags::default(),
        images: PetImages::default(),
        arrival_date: arrival_days_ago(10),
        adoption_fee_cents: 12_500,
        featured: false,
    }
}

pub(super) fn pet_with(
    name: &str,
    species: PetSpecies,
    size: PetSize,
    arrival: NaiveDate,
) -> NewPet {
    NewPet {
        species,
        size,
        arrival_date: arrival,
        ..sample_pet(name)
    }
}
