use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::adoptions::router::{
    admin_application_router, application_router, AdminApplicationState,
};
use crate::adoptions::store::ApplicationStore;
use crate::adoptions::domain::SubmitterIdentity;
use crate::pets::repository::PetRepository;
use crate::pets::PetStatus;
use crate::storage::MemoryShelterStore;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn submit_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/applications")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn submit_returns_created_with_pending_view() {
    let (store, _, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let router = application_router(store);

    let body = serde_json::to_vec(&valid_form(pet.id)).expect("serialize");
    let response = router.oneshot(submit_request(body)).await.expect("dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("application_id").is_some());
    assert_eq!(payload["status"], json!("pending"));
    assert!(payload.get("submitted_at").is_some());
    // Staff notes never appear in the applicant view.
    assert!(payload.get("notes").is_none());
}

#[tokio::test]
async fn duplicate_submission_is_a_conflict() {
    let (store, _, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let router = application_router(store);

    let body = serde_json::to_vec(&valid_form(pet.id)).expect("serialize");
    let first = router
        .clone()
        .oneshot(submit_request(body.clone()))
        .await
        .expect("dispatch");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router.oneshot(submit_request(body)).await.expect("dispatch");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let payload = read_json_body(second).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("wait for a response"));
}

#[tokio::test]
async fn validation_failures_list_the_fields() {
    let (store, _, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let router = application_router(store);

    let mut form = valid_form(pet.id);
    form.household.adults = 0;
    form.reason_for_adoption = "too short".to_string();
    let body = serde_json::to_vec(&form).expect("serialize");

    let response = router.oneshot(submit_request(body)).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let payload = read_json_body(response).await;
    let fields: Vec<&str> = payload["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert!(fields.contains(&"household_adults"));
    assert!(fields.contains(&"reason_for_adoption"));
}

#[tokio::test]
async fn unknown_pet_is_not_found() {
    let (store, _, _) = build_services();
    let router = application_router(store);

    let body = serde_json::to_vec(&valid_form(crate::pets::PetId(404))).expect("serialize");
    let response = router.oneshot(submit_request(body)).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_endpoint_returns_view_or_404() {
    let (store, _, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let application = store
        .submit(valid_form(pet.id), SubmitterIdentity::Anonymous)
        .expect("submit");
    let router = application_router(store);

    let found = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/applications/{}", application.id))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(found.status(), StatusCode::OK);
    let payload = read_json_body(found).await;
    assert_eq!(payload["status"], json!("pending"));

    let missing = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/applications/999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_endpoint_matches_by_email() {
    let (store, _, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    store
        .submit(valid_form(pet.id), SubmitterIdentity::Anonymous)
        .expect("submit");
    let router = application_router(store);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/applications?email=a@x.com")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().expect("array").len(), 1);
}

fn admin_router(
    store: Arc<MemoryStoreService>,
    lifecycle: Arc<MemoryCoordinator>,
) -> axum::Router {
    admin_application_router(AdminApplicationState { store, lifecycle })
}

#[tokio::test]
async fn admin_status_change_drives_the_pet() {
    let (store, lifecycle, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let application = store
        .submit(valid_form(pet.id), SubmitterIdentity::Anonymous)
        .expect("submit");
    let router = admin_router(store, lifecycle);

    let response = router
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!(
                    "/api/v1/admin/applications/{}/status",
                    application.id
                ))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "status": "completed" }).to_string()))
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("completed"));

    let adopted = PetRepository::fetch(shelter.as_ref(), pet.id)
        .expect("fetch")
        .expect("present");
    assert_eq!(adopted.status, PetStatus::Adopted);
}

#[tokio::test]
async fn admin_rejects_unknown_status_literal_without_mutating() {
    let (store, lifecycle, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let application = store
        .submit(valid_form(pet.id), SubmitterIdentity::Anonymous)
        .expect("submit");
    let router = admin_router(store.clone(), lifecycle);

    let response = router
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!(
                    "/api/v1/admin/applications/{}/status",
                    application.id
                ))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "status": "finalized" }).to_string()))
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let untouched = store.get(application.id).expect("fetch");
    assert_eq!(untouched.status.label(), "pending");
    assert!(untouched.reviewed_at.is_none());
}

#[tokio::test]
async fn admin_notes_round_trip() {
    let (store, lifecycle, shelter) = build_services();
    let pet = seed_pet(&shelter, "Rex");
    let application = store
        .submit(valid_form(pet.id), SubmitterIdentity::Anonymous)
        .expect("submit");
    let router = admin_router(store, lifecycle);

    let response = router
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!(
                    "/api/v1/admin/applications/{}/notes",
                    application.id
                ))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "notes": "Vet reference checked." }).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["notes"], json!("Vet reference checked."));
    assert!(payload.get("reviewed_at").is_some());
}

#[tokio::test]
async fn triage_listing_filters_by_status() {
    let (store, lifecycle, shelter) = build_services();
    let rex = seed_pet(&shelter, "Rex");
    let uma = seed_pet(&shelter, "Uma");
    let first = store
        .submit(valid_form(rex.id), SubmitterIdentity::Anonymous)
        .expect("first");
    store
        .submit(valid_form(uma.id), SubmitterIdentity::Anonymous)
        .expect("second");
    lifecycle
        .set_status(first.id, crate::adoptions::ApplicationStatus::Approved)
        .expect("approve");

    let router = admin_router(store, lifecycle);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/admin/applications?status=approved")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(1));
    assert_eq!(payload["items"][0]["status"], json!("approved"));
}

#[tokio::test]
async fn storage_outage_maps_to_internal_error() {
    let shelter = Arc::new(MemoryShelterStore::default());
    let pet = seed_pet(&shelter, "Rex");
    let store = Arc::new(ApplicationStore::new(
        Arc::new(UnavailableRepository),
        shelter,
    ));
    let router = application_router(store);

    let body = serde_json::to_vec(&valid_form(pet.id)).expect("serialize");
    let response = router.oneshot(submit_request(body)).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
