use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

use crate::adoptions::{
    admin_application_router, application_router, AdminApplicationState, ApplicationStore,
    LifecycleCoordinator,
};
use crate::contact::{admin_contact_router, contact_router, ContactDesk};
use crate::dashboard::{admin_dashboard_router, stats_router, DashboardService};
use crate::pets::{admin_pet_router, pet_router, PetRegistry};
use crate::storage::MemoryShelterStore;

/// The full service graph wired over one shared store.
pub struct ShelterServices {
    pub registry: Arc<PetRegistry<MemoryShelterStore>>,
    pub applications: Arc<ApplicationStore<MemoryShelterStore, MemoryShelterStore>>,
    pub lifecycle: Arc<LifecycleCoordinator<MemoryShelterStore, MemoryShelterStore>>,
    pub contact: Arc<ContactDesk<MemoryShelterStore>>,
    pub dashboard:
        Arc<DashboardService<MemoryShelterStore, MemoryShelterStore, MemoryShelterStore>>,
}

impl ShelterServices {
    pub fn new(store: Arc<MemoryShelterStore>) -> Self {
        let registry = Arc::new(PetRegistry::new(store.clone()));
        let applications = Arc::new(ApplicationStore::new(store.clone(), store.clone()));
        // The store doubles as the PetStatusWriter capability; the
        // coordinator is the only consumer of that interface.
        let lifecycle = Arc::new(LifecycleCoordinator::new(store.clone(), store.clone()));
        let contact = Arc::new(ContactDesk::new(store.clone()));
        let dashboard = Arc::new(DashboardService::new(
            store.clone(),
            store.clone(),
            store,
        ));

        Self {
            registry,
            applications,
            lifecycle,
            contact,
            dashboard,
        }
    }
}

/// Every API route, public and staff, without the operational endpoints.
pub fn api_router(services: &ShelterServices) -> Router {
    Router::new()
        .merge(pet_router(services.registry.clone()))
        .merge(admin_pet_router(services.registry.clone()))
        .merge(application_router(services.applications.clone()))
        .merge(admin_application_router(AdminApplicationState {
            store: services.applications.clone(),
            lifecycle: services.lifecycle.clone(),
        }))
        .merge(contact_router(services.contact.clone()))
        .merge(admin_contact_router(services.contact.clone()))
        .merge(stats_router(services.dashboard.clone()))
        .merge(admin_dashboard_router(services.dashboard.clone()))
}

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
}

/// Health, readiness, and Prometheus scrape endpoints.
pub fn ops_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
