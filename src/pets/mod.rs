//! Pet registry: records for adoptable animals, slug derivation, staff
//! edits, and the read queries behind public browsing.

pub mod domain;
pub mod registry;
pub mod repository;
pub mod router;
pub(crate) mod slug;

#[cfg(test)]
mod tests;

pub use domain::{
    MedicalFlags, NewPet, NewSuccessStory, Pet, PetFilters, PetGender, PetId, PetImages, PetSize,
    PetSort, PetSpecies, PetStatus, PetStatusCounts, PetUpdate, StoryId, SuccessStory,
};
pub use registry::{PetRegistry, RegistryError};
pub use repository::{PetRepository, PetStatusWriter, StoryRepository};
pub use router::{admin_pet_router, pet_router};
