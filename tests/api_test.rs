//! Integration tests for API endpoints.
//!
//! These tests wire the real router against hand-rolled mock services,
//! so routing, extractors, and response shapes are exercised without a
//! database or a photo store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use dashtalent::api::{create_router, AppState};
use dashtalent::domain::{CatalogFilter, Genero, Talent, TalentActivity, TalentDraft, TalentSummary, TalentUpdate};
use dashtalent::errors::{AppError, AppResult};
use dashtalent::events::{EventBus, FeedHandle};
use dashtalent::infra::Database;
use dashtalent::services::{DashboardService, DashboardStats, StatsPeriod, TalentService};
use dashtalent::types::PaginationParams;

// =============================================================================
// Mock services
// =============================================================================

const KNOWN_ID: Uuid = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);

fn sample_talent(id: Uuid) -> Talent {
    Talent {
        id,
        nombre: "Ana Gómez".to_string(),
        genero: Genero::Dama,
        altura: Some("1.75m".to_string()),
        experiencia: Some("5 años".to_string()),
        especialidad: Some("Pasarela".to_string()),
        descripcion: None,
        rating: 4.5,
        tags: vec!["editorial".to_string()],
        fotos: vec![
            "http://store/talent-photos/talents/1_a.jpg".to_string(),
            "http://store/talent-photos/talents/2_b.jpg".to_string(),
        ],
        active: true,
        created_at: Utc::now(),
    }
}

struct StubTalentService;

#[async_trait]
impl TalentService for StubTalentService {
    async fn create(&self, draft: TalentDraft) -> AppResult<Uuid> {
        assert!(!draft.new_photos.is_empty());
        Ok(KNOWN_ID)
    }

    async fn get(&self, id: Uuid) -> AppResult<Talent> {
        if id == KNOWN_ID {
            Ok(sample_talent(id))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn list(
        &self,
        _filter: CatalogFilter,
        _page: PaginationParams,
    ) -> AppResult<(Vec<Talent>, u64)> {
        Ok((vec![sample_talent(KNOWN_ID), sample_talent(Uuid::new_v4())], 2))
    }

    async fn search(&self, query: &str, _limit: u64) -> AppResult<Vec<TalentSummary>> {
        assert!(query.chars().count() >= 2, "short queries never reach the service");
        Ok(vec![TalentSummary {
            id: KNOWN_ID,
            nombre: "Ana Gómez".to_string(),
            especialidad: Some("Pasarela".to_string()),
            genero: Genero::Dama,
        }])
    }

    async fn update(&self, id: Uuid, _update: TalentUpdate) -> AppResult<()> {
        if id == KNOWN_ID {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        if id == KNOWN_ID {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn toggle_status(&self, _id: Uuid, current_active: bool) -> AppResult<bool> {
        Ok(!current_active)
    }
}

struct StubDashboardService;

#[async_trait]
impl DashboardService for StubDashboardService {
    async fn stats(&self, period: StatsPeriod) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_talents: 12,
            active_talents: 9,
            elite_talents: 3,
            new_registrations: 2,
            period,
        })
    }

    async fn recent(&self, _limit: u64) -> AppResult<Vec<TalentActivity>> {
        Ok(vec![])
    }
}

// =============================================================================
// Test helpers
// =============================================================================

fn test_app() -> axum::Router {
    let bus = Arc::new(EventBus::default());
    let feed = Arc::new(FeedHandle::spawn(
        &bus,
        vec![TalentActivity {
            id: KNOWN_ID,
            nombre: "Ana Gómez".to_string(),
            created_at: Utc::now(),
            active: true,
        }],
    ));
    let database = Arc::new(Database::from_connection(
        sea_orm::DatabaseConnection::default(),
    ));

    let state = AppState::new(
        Arc::new(StubTalentService),
        Arc::new(StubDashboardService),
        bus,
        feed,
        database,
    );

    create_router(state)
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart/form-data body by hand
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(method: Method, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn root_returns_banner() {
    let response = get(test_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(test_app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_talents_returns_paginated_catalog() {
    let response = get(test_app(), "/talents?page=1&per_page=20").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["meta"]["page"], 1);

    // foto is always the first entry of fotos
    let first = &json["data"][0];
    assert_eq!(first["foto"], first["fotos"][0]);
}

#[tokio::test]
async fn get_talent_returns_record() {
    let response = get(test_app(), &format!("/talents/{KNOWN_ID}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["nombre"], "Ana Gómez");
}

#[tokio::test]
async fn get_unknown_talent_returns_404() {
    let response = get(test_app(), &format!("/talents/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn search_returns_matches() {
    let response = get(test_app(), "/talents/search?q=ana").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["nombre"], "Ana Gómez");
}

#[tokio::test]
async fn short_search_query_returns_empty() {
    // one character is under the minimum, the service is never called
    let response = get(test_app(), "/talents/search?q=a").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_talent_returns_201_with_id() {
    let body = multipart_body(
        &[
            ("nombre", "Ana Gómez"),
            ("genero", "Dama"),
            ("altura", "1.75m"),
            ("rating", "4.5"),
            ("tags", "editorial, pasarela"),
        ],
        &[("fotos", "front.jpg", b"fake image bytes")],
    );

    let response = test_app()
        .oneshot(multipart_request(Method::POST, "/talents", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], KNOWN_ID.to_string());
}

#[tokio::test]
async fn create_talent_with_short_nombre_is_rejected() {
    let body = multipart_body(
        &[("nombre", "Al"), ("genero", "Dama")],
        &[("fotos", "front.jpg", b"fake image bytes")],
    );

    let response = test_app()
        .oneshot(multipart_request(Method::POST, "/talents", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_talent_without_photos_is_rejected() {
    let body = multipart_body(&[("nombre", "Ana Gómez"), ("genero", "Dama")], &[]);

    let response = test_app()
        .oneshot(multipart_request(Method::POST, "/talents", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_talent_with_bad_altura_is_rejected() {
    let body = multipart_body(
        &[("nombre", "Ana Gómez"), ("genero", "Dama"), ("altura", "tall")],
        &[("fotos", "front.jpg", b"fake image bytes")],
    );

    let response = test_app()
        .oneshot(multipart_request(Method::POST, "/talents", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_talent_accepts_retained_photos_only() {
    let body = multipart_body(
        &[
            ("nombre", "Ana Gómez"),
            ("genero", "Dama"),
            ("existing_fotos", "http://store/talent-photos/talents/1_a.jpg"),
        ],
        &[],
    );

    let response = test_app()
        .oneshot(multipart_request(
            Method::PUT,
            &format!("/talents/{KNOWN_ID}"),
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_dropping_every_photo_is_rejected() {
    let body = multipart_body(&[("nombre", "Ana Gómez"), ("genero", "Dama")], &[]);

    let response = test_app()
        .oneshot(multipart_request(
            Method::PUT,
            &format!("/talents/{KNOWN_ID}"),
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_talent_returns_204() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/talents/{KNOWN_ID}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn toggle_status_returns_flipped_flag() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/talents/{KNOWN_ID}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"active":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["active"], false);
}

#[tokio::test]
async fn dashboard_stats_reports_counts() {
    let response = get(test_app(), "/dashboard/stats?period=month").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_talents"], 12);
    assert_eq!(json["data"]["elite_talents"], 3);
    assert_eq!(json["data"]["period"], "month");
}

#[tokio::test]
async fn dashboard_activity_returns_feed_snapshot() {
    let response = get(test_app(), "/dashboard/activity").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["nombre"], "Ana Gómez");
}
