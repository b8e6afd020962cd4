use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::pagination::{Page, PageRequest};
use crate::pets::{PetRepository, PetStatusWriter};

use super::domain::{
    ApplicationFilters, ApplicationForm, ApplicationId, ApplicationStatus, SubmitterIdentity,
    UserId,
};
use super::lifecycle::{LifecycleCoordinator, LifecycleError};
use super::repository::ApplicationRepository;
use super::store::{ApplicationStore, SubmissionError};

/// Public application endpoints: submission and applicant-facing reads.
pub fn application_router<R, P>(store: Arc<ApplicationStore<R, P>>) -> Router
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<R, P>).get(history_handler::<R, P>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R, P>),
        )
        .with_state(store)
}

/// Shared state for the staff application endpoints.
pub struct AdminApplicationState<R, P, W> {
    pub store: Arc<ApplicationStore<R, P>>,
    pub lifecycle: Arc<LifecycleCoordinator<R, W>>,
}

impl<R, P, W> Clone for AdminApplicationState<R, P, W> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

/// Staff endpoints: triage listing, status transitions, and notes.
pub fn admin_application_router<R, P, W>(state: AdminApplicationState<R, P, W>) -> Router
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    Router::new()
        .route("/api/v1/admin/applications", get(triage_handler::<R, P, W>))
        .route(
            "/api/v1/admin/applications/pending",
            get(pending_handler::<R, P, W>),
        )
        .route(
            "/api/v1/admin/applications/:application_id",
            get(admin_detail_handler::<R, P, W>),
        )
        .route(
            "/api/v1/admin/applications/:application_id/status",
            put(set_status_handler::<R, P, W>),
        )
        .route(
            "/api/v1/admin/applications/:application_id/notes",
            put(set_notes_handler::<R, P, W>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    #[serde(default)]
    user_id: Option<UserId>,
    #[serde(flatten)]
    form: ApplicationForm,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    email: String,
    #[serde(default)]
    user_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TriageQuery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default = "crate::pagination::default_page")]
    page: usize,
    #[serde(default = "crate::pagination::default_per_page")]
    per_page: usize,
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: String,
}

#[derive(Debug, Deserialize)]
struct NotesRequest {
    notes: String,
}

pub(crate) async fn submit_handler<R, P>(
    State(store): State<Arc<ApplicationStore<R, P>>>,
    Json(request): Json<SubmitRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
{
    let identity = match request.user_id {
        Some(user) => SubmitterIdentity::Account(user),
        None => SubmitterIdentity::Anonymous,
    };

    match store.submit(request.form, identity) {
        Ok(application) => {
            (StatusCode::CREATED, Json(application.status_view())).into_response()
        }
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn status_handler<R, P>(
    State(store): State<Arc<ApplicationStore<R, P>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
{
    match store.get(ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, Json(application.status_view())).into_response(),
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn history_handler<R, P>(
    State(store): State<Arc<ApplicationStore<R, P>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
{
    let user = query.user_id.map(UserId);
    match store.for_identity(user, &query.email) {
        Ok(applications) => {
            let views: Vec<_> = applications
                .iter()
                .map(|application| application.status_view())
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn triage_handler<R, P, W>(
    State(state): State<AdminApplicationState<R, P, W>>,
    Query(query): Query<TriageQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match ApplicationStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return lifecycle_error_response(LifecycleError::InvalidStatus {
                    value: raw.to_string(),
                })
            }
        },
    };

    let filters = ApplicationFilters {
        status,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    match state.store.search(&filters) {
        Ok(applications) => {
            let page = Page::slice(
                applications,
                PageRequest {
                    page: query.page,
                    per_page: query.per_page,
                },
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn pending_handler<R, P, W>(
    State(state): State<AdminApplicationState<R, P, W>>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    match state.store.pending() {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn admin_detail_handler<R, P, W>(
    State(state): State<AdminApplicationState<R, P, W>>,
    Path(application_id): Path<u64>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    match state.store.get(ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => submission_error_response(error),
    }
}

pub(crate) async fn set_status_handler<R, P, W>(
    State(state): State<AdminApplicationState<R, P, W>>,
    Path(application_id): Path<u64>,
    Json(request): Json<StatusChangeRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    let Some(status) = ApplicationStatus::parse(&request.status) else {
        return lifecycle_error_response(LifecycleError::InvalidStatus {
            value: request.status,
        });
    };

    match state
        .lifecycle
        .set_status(ApplicationId(application_id), status)
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => lifecycle_error_response(error),
    }
}

pub(crate) async fn set_notes_handler<R, P, W>(
    State(state): State<AdminApplicationState<R, P, W>>,
    Path(application_id): Path<u64>,
    Json(request): Json<NotesRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    P: PetRepository + 'static,
    W: PetStatusWriter + 'static,
{
    match state
        .store
        .set_notes(ApplicationId(application_id), request.notes)
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => submission_error_response(error),
    }
}

fn submission_error_response(error: SubmissionError) -> Response {
    match error {
        SubmissionError::Validation(violations) => {
            let payload = json!({
                "error": "application failed validation",
                "violations": violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SubmissionError::DuplicatePending => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        SubmissionError::PetNotFound(_) | SubmissionError::NotFound(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        SubmissionError::Repository(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn lifecycle_error_response(error: LifecycleError) -> Response {
    let status = match &error {
        LifecycleError::ApplicationNotFound(_) | LifecycleError::PetNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        LifecycleError::InvalidStatus { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        LifecycleError::ForbiddenTransition { .. } => StatusCode::CONFLICT,
        LifecycleError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
