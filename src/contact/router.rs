use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::pagination::{Page, PageRequest};

use super::domain::{MessageFilters, MessageId, NewMessage};
use super::repository::ContactRepository;
use super::service::{ContactDesk, ContactError};

/// Public contact-form endpoint.
pub fn contact_router<R>(desk: Arc<ContactDesk<R>>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(submit_handler::<R>))
        .with_state(desk)
}

/// Staff inbox endpoints.
pub fn admin_contact_router<R>(desk: Arc<ContactDesk<R>>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/admin/messages", get(inbox_handler::<R>))
        .route(
            "/api/v1/admin/messages/:message_id",
            get(detail_handler::<R>),
        )
        .route(
            "/api/v1/admin/messages/:message_id/read",
            post(mark_read_handler::<R>),
        )
        .route(
            "/api/v1/admin/messages/:message_id/responded",
            post(mark_responded_handler::<R>),
        )
        .with_state(desk)
}

#[derive(Debug, Deserialize)]
struct InboxQuery {
    /// `read`, `unread`, or absent for everything.
    #[serde(default)]
    read: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default = "crate::pagination::default_page")]
    page: usize,
    #[serde(default = "crate::pagination::default_per_page")]
    per_page: usize,
}

pub(crate) async fn submit_handler<R>(
    State(desk): State<Arc<ContactDesk<R>>>,
    Json(message): Json<NewMessage>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match desk.submit(message) {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inbox_handler<R>(
    State(desk): State<Arc<ContactDesk<R>>>,
    Query(query): Query<InboxQuery>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let read = match query.read.as_deref().map(str::trim) {
        Some("read") => Some(true),
        Some("unread") => Some(false),
        _ => None,
    };

    let filters = MessageFilters {
        read,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    match desk.search(&filters) {
        Ok(messages) => {
            let page = Page::slice(
                messages,
                PageRequest {
                    page: query.page,
                    per_page: query.per_page,
                },
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(desk): State<Arc<ContactDesk<R>>>,
    Path(message_id): Path<u64>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match desk.get(MessageId(message_id)) {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mark_read_handler<R>(
    State(desk): State<Arc<ContactDesk<R>>>,
    Path(message_id): Path<u64>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match desk.mark_read(MessageId(message_id)) {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mark_responded_handler<R>(
    State(desk): State<Arc<ContactDesk<R>>>,
    Path(message_id): Path<u64>,
) -> Response
where
    R: ContactRepository + 'static,
{
    match desk.mark_responded(MessageId(message_id)) {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ContactError) -> Response {
    match error {
        ContactError::Validation(violations) => {
            let payload = json!({
                "error": "message failed validation",
                "violations": violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        ContactError::NotFound(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ContactError::Repository(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
