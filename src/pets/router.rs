use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::pagination::{Page, PageRequest};

use super::domain::{
    NewPet, NewSuccessStory, Pet, PetFilters, PetId, PetSize, PetSort, PetSpecies, PetStatus,
    PetUpdate,
};
use super::registry::{PetRegistry, RegistryError};
use super::repository::{PetRepository, StoryRepository};

/// Public browsing endpoints.
pub fn pet_router<R>(registry: Arc<PetRegistry<R>>) -> Router
where
    R: PetRepository + StoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/pets", get(list_handler::<R>))
        .route("/api/v1/pets/featured", get(featured_handler::<R>))
        .route("/api/v1/pets/stats", get(stats_handler::<R>))
        .route("/api/v1/pets/:pet_id", get(detail_handler::<R>))
        .route("/api/v1/pets/:pet_id/related", get(related_handler::<R>))
        .route("/api/v1/pets/by-slug/:slug", get(by_slug_handler::<R>))
        .route("/api/v1/stories", get(stories_handler::<R>))
        .with_state(registry)
}

/// Staff endpoints for managing pet records.
pub fn admin_pet_router<R>(registry: Arc<PetRegistry<R>>) -> Router
where
    R: PetRepository + StoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/admin/pets", post(create_handler::<R>))
        .route(
            "/api/v1/admin/pets/:pet_id",
            patch(update_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/admin/pets/:pet_id/status",
            put(set_status_handler::<R>),
        )
        .route("/api/v1/admin/stories", post(create_story_handler::<R>))
        .with_state(registry)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetListQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    species: Option<String>,
    /// Comma-separated size list, e.g. `sizes=small,medium`.
    #[serde(default)]
    sizes: Option<String>,
    #[serde(default)]
    special_needs: bool,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default = "crate::pagination::default_page")]
    page: usize,
    #[serde(default = "crate::pagination::default_per_page")]
    per_page: usize,
}

impl PetListQuery {
    fn filters(&self) -> PetFilters {
        // Unknown species literals and the `all` sentinel fall back to no
        // species filter; unknown sizes are skipped.
        let species = self
            .species
            .as_deref()
            .and_then(PetSpecies::parse);
        let sizes = self
            .sizes
            .as_deref()
            .map(|raw| raw.split(',').filter_map(PetSize::parse).collect())
            .unwrap_or_default();

        PetFilters {
            species,
            sizes,
            special_needs: self.special_needs,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    fn sort(&self) -> PetSort {
        self.sort
            .as_deref()
            .and_then(PetSort::parse)
            .unwrap_or_default()
    }

    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Serialize)]
struct PetDetailView {
    #[serde(flatten)]
    pet: Pet,
    badge: Option<&'static str>,
}

impl PetDetailView {
    fn new(pet: Pet) -> Self {
        let badge = pet.badge(Utc::now().date_naive());
        Self { pet, badge }
    }
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    #[serde(default = "default_highlight_limit")]
    limit: usize,
}

fn default_highlight_limit() -> usize {
    3
}

#[derive(Debug, Deserialize)]
struct StoriesQuery {
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: String,
}

pub(crate) async fn list_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Query(query): Query<PetListQuery>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.available(&query.filters(), query.sort()) {
        Ok(pets) => {
            let page = Page::slice(pets, query.page_request());
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn featured_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.featured(query.limit) {
        Ok(pets) => (StatusCode::OK, Json(pets)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(registry): State<Arc<PetRegistry<R>>>) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.status_counts() {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(pet_id): Path<u64>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.get(PetId(pet_id)) {
        Ok(pet) => (StatusCode::OK, Json(PetDetailView::new(pet))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn by_slug_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(slug): Path<String>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.get_by_slug(&slug) {
        Ok(Some(pet)) => (StatusCode::OK, Json(PetDetailView::new(pet))).into_response(),
        Ok(None) => not_found(format!("no pet with slug '{slug}'")),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn related_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(pet_id): Path<u64>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.related(PetId(pet_id), query.limit) {
        Ok(pets) => (StatusCode::OK, Json(pets)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stories_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Query(query): Query<StoriesQuery>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.stories(query.featured) {
        Ok(stories) => (StatusCode::OK, Json(stories)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Json(pet): Json<NewPet>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.create(pet) {
        Ok(pet) => (StatusCode::CREATED, Json(pet)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(pet_id): Path<u64>,
    Json(update): Json<PetUpdate>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.update(PetId(pet_id), update) {
        Ok(pet) => (StatusCode::OK, Json(pet)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_status_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(pet_id): Path<u64>,
    Json(request): Json<StatusChangeRequest>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    let Some(status) = PetStatus::parse(&request.status) else {
        return error_response(RegistryError::InvalidStatus {
            value: request.status,
        });
    };

    match registry.set_status(PetId(pet_id), status) {
        Ok(pet) => (StatusCode::OK, Json(pet)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Path(pet_id): Path<u64>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.remove(PetId(pet_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_story_handler<R>(
    State(registry): State<Arc<PetRegistry<R>>>,
    Json(story): Json<NewSuccessStory>,
) -> Response
where
    R: PetRepository + StoryRepository + 'static,
{
    match registry.add_story(story) {
        Ok(story) => (StatusCode::CREATED, Json(story)).into_response(),
        Err(error) => error_response(error),
    }
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn error_response(error: RegistryError) -> Response {
    let status = match &error {
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::InvalidStatus { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
