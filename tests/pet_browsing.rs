//! Browsing, searching, and the contact desk exercised through the full
//! router.

mod common {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::response::Response;
    use chrono::NaiveDate;
    use serde_json::Value;

    use pawhaven::pets::{
        MedicalFlags, NewPet, Pet, PetGender, PetImages, PetSize, PetSpecies,
    };
    use pawhaven::server::ShelterServices;
    use pawhaven::storage::MemoryShelterStore;

    pub fn build_services() -> ShelterServices {
        ShelterServices::new(Arc::new(MemoryShelterStore::default()))
    }

    pub struct PetSpec<'a> {
        pub name: &'a str,
        pub species: PetSpecies,
        pub size: PetSize,
        pub arrival: NaiveDate,
        pub featured: bool,
        pub special_needs: bool,
    }

    pub fn seed_pet(services: &ShelterServices, spec: PetSpec<'_>) -> Pet {
        services
            .registry
            .create(NewPet {
                name: spec.name.to_string(),
                slug: None,
                species: spec.species,
                breed: "Mixed".to_string(),
                age: "2 years".to_string(),
                gender: PetGender::Female,
                size: spec.size,
                color: "Brown".to_string(),
                description: format!("{} is looking for a home.", spec.name),
                personality: Vec::new(),
                medical: MedicalFlags {
                    vaccinated: true,
                    spayed_neutered: false,
                    microchipped: false,
                    special_needs: spec.special_needs,
                    special_needs_description: spec
                        .special_needs
                        .then(|| "Needs a calm household.".to_string()),
                },
                images: PetImages::default(),
                arrival_date: spec.arrival,
                adoption_fee_cents: 10_000,
                featured: spec.featured,
            })
            .expect("seed pet")
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    pub async fn read_json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod browsing {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::common::*;
    use pawhaven::pets::{PetSize, PetSpecies};
    use pawhaven::server::api_router;

    fn seeded_services() -> pawhaven::server::ShelterServices {
        let services = build_services();
        seed_pet(
            &services,
            PetSpec {
                name: "Rex",
                species: PetSpecies::Dog,
                size: PetSize::Large,
                arrival: date(2026, 7, 20),
                featured: true,
                special_needs: false,
            },
        );
        seed_pet(
            &services,
            PetSpec {
                name: "Arlo",
                species: PetSpecies::Dog,
                size: PetSize::Small,
                arrival: date(2026, 6, 5),
                featured: false,
                special_needs: true,
            },
        );
        seed_pet(
            &services,
            PetSpec {
                name: "Momo",
                species: PetSpecies::Cat,
                size: PetSize::Small,
                arrival: date(2026, 7, 1),
                featured: true,
                special_needs: false,
            },
        );
        services
    }

    #[tokio::test]
    async fn default_listing_is_newest_first() {
        let router = api_router(&seeded_services());
        let response = router
            .oneshot(get_request("/api/v1/pets"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let names: Vec<&str> = payload["items"]
            .as_array()
            .expect("items")
            .iter()
            .filter_map(|pet| pet["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Rex", "Momo", "Arlo"]);
    }

    #[tokio::test]
    async fn filters_compose() {
        let router = api_router(&seeded_services());

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/pets?species=dog&sizes=small"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["total"], json!(1));
        assert_eq!(payload["items"][0]["name"], json!("Arlo"));

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/pets?special_needs=true"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["items"][0]["name"], json!("Arlo"));

        let response = router
            .oneshot(get_request("/api/v1/pets?search=momo"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["items"][0]["name"], json!("Momo"));
    }

    #[tokio::test]
    async fn sorting_and_pagination_apply() {
        let router = api_router(&seeded_services());

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/pets?sort=name&per_page=2"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["items"][0]["name"], json!("Arlo"));
        assert_eq!(payload["items"].as_array().expect("items").len(), 2);
        assert_eq!(payload["total"], json!(3));

        let response = router
            .oneshot(get_request("/api/v1/pets?sort=name&per_page=2&page=2"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["items"][0]["name"], json!("Rex"));
    }

    #[tokio::test]
    async fn featured_and_related_are_bounded() {
        let services = seeded_services();
        let router = api_router(&services);

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/pets/featured?limit=1"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload.as_array().expect("array").len(), 1);

        // Rex's related pets: same species, not Rex.
        let rex = services
            .registry
            .get_by_slug("rex")
            .expect("lookup")
            .expect("present");
        let response = router
            .oneshot(get_request(&format!("/api/v1/pets/{}/related", rex.id)))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        let names: Vec<&str> = payload
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|pet| pet["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Arlo"]);
    }

    #[tokio::test]
    async fn stats_endpoint_counts_by_status() {
        let router = api_router(&seeded_services());
        let response = router
            .oneshot(get_request("/api/v1/pets/stats"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["available"], json!(3));
        assert_eq!(payload["adopted"], json!(0));
    }
}

mod contact_desk {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::common::*;
    use pawhaven::server::api_router;

    #[tokio::test]
    async fn message_flows_from_form_to_inbox() {
        let services = build_services();
        let router = api_router(&services);

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/contact",
                json!({
                    "name": "Dana Reyes",
                    "email": "dana@example.com",
                    "subject": "Volunteering",
                    "message": "Do you need weekend volunteers?"
                }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json_body(response).await;
        let message_id = payload["id"].as_u64().expect("id");
        assert_eq!(payload["is_read"], json!(false));

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/admin/messages?read=unread"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["total"], json!(1));

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/admin/messages/{message_id}/read"),
                json!({}),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get_request("/api/v1/admin/messages?read=unread"))
            .await
            .expect("dispatch");
        let payload = read_json_body(response).await;
        assert_eq!(payload["total"], json!(0));
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let services = build_services();
        let router = api_router(&services);

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/contact",
                json!({
                    "name": "",
                    "email": "bad",
                    "subject": "Hi",
                    "message": ""
                }),
            ))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert!(payload["violations"].as_array().expect("array").len() >= 2);
    }
}
