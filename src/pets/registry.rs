use std::sync::Arc;

use tracing::info;

use crate::repository::RepositoryError;

use super::domain::{
    NewPet, NewSuccessStory, Pet, PetFilters, PetId, PetSort, PetStatus, PetStatusCounts,
    PetUpdate, SuccessStory,
};
use super::repository::{PetRepository, StoryRepository};
use super::slug::slugify;

/// Service owning pet records: intake, staff edits, and the browse queries
/// behind the public listings.
pub struct PetRegistry<R> {
    repository: Arc<R>,
}

impl<R> PetRegistry<R>
where
    R: PetRepository + StoryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a pet, deriving a unique slug from its name when none was
    /// supplied. Collisions append `-1`, `-2`, ... until free.
    pub fn create(&self, pet: NewPet) -> Result<Pet, RegistryError> {
        let slug = match pet.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => self.unique_slug(&pet.name)?,
        };

        let stored = PetRepository::insert(self.repository.as_ref(), pet, slug)?;
        info!(pet = %stored.id, slug = %stored.slug, "pet registered");
        Ok(stored)
    }

    fn unique_slug(&self, name: &str) -> Result<String, RegistryError> {
        let base = slugify(name);
        let mut candidate = base.clone();
        let mut suffix = 1u32;

        while self.repository.slug_exists(&candidate)? {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        Ok(candidate)
    }

    /// Staff edit of profile fields. Status is not part of `PetUpdate`.
    pub fn update(&self, id: PetId, update: PetUpdate) -> Result<Pet, RegistryError> {
        match self.repository.apply_update(id, update) {
            Ok(pet) => Ok(pet),
            Err(RepositoryError::NotFound) => Err(RegistryError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Staff override of availability. Does not touch applications; the
    /// coupling to the adoption workflow runs the other way only.
    pub fn set_status(&self, id: PetId, status: PetStatus) -> Result<Pet, RegistryError> {
        match self.repository.update_status(id, status) {
            Ok(pet) => {
                info!(pet = %pet.id, status = status.label(), "pet status overridden");
                Ok(pet)
            }
            Err(RepositoryError::NotFound) => Err(RegistryError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    pub fn get(&self, id: PetId) -> Result<Pet, RegistryError> {
        self.repository
            .fetch(id)?
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Pet>, RegistryError> {
        Ok(self.repository.fetch_by_slug(slug)?)
    }

    pub fn available(
        &self,
        filters: &PetFilters,
        sort: PetSort,
    ) -> Result<Vec<Pet>, RegistryError> {
        Ok(self.repository.list_available(filters, sort)?)
    }

    /// Featured pets that are still available, capped at `limit`.
    pub fn featured(&self, limit: usize) -> Result<Vec<Pet>, RegistryError> {
        let mut pets = self
            .repository
            .list_available(&PetFilters::default(), PetSort::Newest)?;
        pets.retain(|pet| pet.featured);
        pets.truncate(limit);
        Ok(pets)
    }

    /// Available pets of the same species, excluding the pet itself.
    pub fn related(&self, id: PetId, limit: usize) -> Result<Vec<Pet>, RegistryError> {
        let pet = self.get(id)?;
        let filters = PetFilters {
            species: Some(pet.species),
            ..PetFilters::default()
        };
        let mut pets = self.repository.list_available(&filters, PetSort::Newest)?;
        pets.retain(|candidate| candidate.id != id);
        pets.truncate(limit);
        Ok(pets)
    }

    pub fn status_counts(&self) -> Result<PetStatusCounts, RegistryError> {
        Ok(self.repository.status_counts()?)
    }

    /// Delete a pet outright. Applications referencing it are removed by the
    /// store; stories keep their text but lose the link.
    pub fn remove(&self, id: PetId) -> Result<(), RegistryError> {
        match PetRepository::delete(self.repository.as_ref(), id) {
            Ok(()) => {
                info!(pet = %id, "pet removed");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(RegistryError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    pub fn add_story(&self, story: NewSuccessStory) -> Result<SuccessStory, RegistryError> {
        Ok(StoryRepository::insert(self.repository.as_ref(), story)?)
    }

    pub fn stories(&self, featured_only: bool) -> Result<Vec<SuccessStory>, RegistryError> {
        Ok(self.repository.list(featured_only)?)
    }
}

/// Error raised by the pet registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("pet {0} not found")]
    NotFound(PetId),
    #[error("'{value}' is not a recognized pet status")]
    InvalidStatus { value: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
