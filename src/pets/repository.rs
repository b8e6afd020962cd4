use crate::repository::RepositoryError;

use super::domain::{
    NewPet, NewSuccessStory, Pet, PetFilters, PetId, PetSort, PetStatus, PetStatusCounts,
    PetUpdate, SuccessStory,
};

/// Storage abstraction for pet records so the registry can be exercised in
/// isolation.
pub trait PetRepository: Send + Sync {
    /// Persist a new pet under the given (already unique) slug.
    fn insert(&self, pet: NewPet, slug: String) -> Result<Pet, RepositoryError>;
    fn apply_update(&self, id: PetId, update: PetUpdate) -> Result<Pet, RepositoryError>;
    fn update_status(&self, id: PetId, status: PetStatus) -> Result<Pet, RepositoryError>;
    fn fetch(&self, id: PetId) -> Result<Option<Pet>, RepositoryError>;
    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Pet>, RepositoryError>;
    fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;
    /// Available pets matching the filters, in the requested order.
    fn list_available(
        &self,
        filters: &PetFilters,
        sort: PetSort,
    ) -> Result<Vec<Pet>, RepositoryError>;
    fn status_counts(&self) -> Result<PetStatusCounts, RepositoryError>;
    /// Remove a pet. Its applications go with it; its stories are detached.
    fn delete(&self, id: PetId) -> Result<(), RepositoryError>;
}

/// Narrow capability for adoption-driven status changes. Only the lifecycle
/// coordinator is constructed with this; handing it anywhere else breaks the
/// ownership contract over the denormalized pet status.
pub trait PetStatusWriter: Send + Sync {
    fn write_status(&self, pet: PetId, status: PetStatus) -> Result<(), RepositoryError>;
}

/// Storage abstraction for success stories.
pub trait StoryRepository: Send + Sync {
    fn insert(&self, story: NewSuccessStory) -> Result<SuccessStory, RepositoryError>;
    /// Stories ordered by adoption date, most recent first.
    fn list(&self, featured_only: bool) -> Result<Vec<SuccessStory>, RepositoryError>;
}
