//! Staff dashboard numbers and the public adoption totals shown on the
//! homepage.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::adoptions::{AdoptionApplication, ApplicationRepository, ApplicationStatus};
use crate::contact::{ContactMessage, ContactRepository};
use crate::pets::PetRepository;
use crate::repository::RepositoryError;

const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Counters surfaced on the staff dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending_applications: usize,
    pub available_pets: usize,
    pub total_adopted: usize,
    pub unread_messages: usize,
}

/// Public adoption totals for the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdoptionTotals {
    pub available_now: usize,
    pub total_adopted: usize,
    /// Completed adoptions, counted from applications.
    pub happy_families: usize,
}

/// Dashboard payload: counters plus the latest activity.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub recent_applications: Vec<AdoptionApplication>,
    pub recent_messages: Vec<ContactMessage>,
}

/// Read-only aggregation over the three record collections.
pub struct DashboardService<P, A, C> {
    pets: Arc<P>,
    applications: Arc<A>,
    messages: Arc<C>,
}

impl<P, A, C> DashboardService<P, A, C>
where
    P: PetRepository + 'static,
    A: ApplicationRepository + 'static,
    C: ContactRepository + 'static,
{
    pub fn new(pets: Arc<P>, applications: Arc<A>, messages: Arc<C>) -> Self {
        Self {
            pets,
            applications,
            messages,
        }
    }

    pub fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let pet_counts = self.pets.status_counts()?;
        Ok(DashboardStats {
            pending_applications: self
                .applications
                .count_with_status(ApplicationStatus::Pending)?,
            available_pets: pet_counts.available,
            total_adopted: pet_counts.adopted,
            unread_messages: self.messages.count_unread()?,
        })
    }

    pub fn public_totals(&self) -> Result<AdoptionTotals, RepositoryError> {
        let pet_counts = self.pets.status_counts()?;
        Ok(AdoptionTotals {
            available_now: pet_counts.available,
            total_adopted: pet_counts.adopted,
            happy_families: self
                .applications
                .count_with_status(ApplicationStatus::Completed)?,
        })
    }

    pub fn overview(&self) -> Result<DashboardOverview, RepositoryError> {
        Ok(DashboardOverview {
            stats: self.stats()?,
            recent_applications: self.applications.recent(RECENT_ACTIVITY_LIMIT)?,
            recent_messages: self.messages.recent(RECENT_ACTIVITY_LIMIT)?,
        })
    }
}

/// Public totals endpoint.
pub fn stats_router<P, A, C>(service: Arc<DashboardService<P, A, C>>) -> Router
where
    P: PetRepository + 'static,
    A: ApplicationRepository + 'static,
    C: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/stats", get(totals_handler::<P, A, C>))
        .with_state(service)
}

/// Staff dashboard endpoint.
pub fn admin_dashboard_router<P, A, C>(service: Arc<DashboardService<P, A, C>>) -> Router
where
    P: PetRepository + 'static,
    A: ApplicationRepository + 'static,
    C: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/admin/dashboard", get(overview_handler::<P, A, C>))
        .with_state(service)
}

async fn totals_handler<P, A, C>(State(service): State<Arc<DashboardService<P, A, C>>>) -> Response
where
    P: PetRepository + 'static,
    A: ApplicationRepository + 'static,
    C: ContactRepository + 'static,
{
    match service.public_totals() {
        Ok(totals) => (StatusCode::OK, Json(totals)).into_response(),
        Err(error) => storage_error(error),
    }
}

async fn overview_handler<P, A, C>(
    State(service): State<Arc<DashboardService<P, A, C>>>,
) -> Response
where
    P: PetRepository + 'static,
    A: ApplicationRepository + 'static,
    C: ContactRepository + 'static,
{
    match service.overview() {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(error) => storage_error(error),
    }
}

fn storage_error(error: RepositoryError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}
