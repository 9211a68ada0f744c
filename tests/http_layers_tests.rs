//! Integration tests for the health route and the router-wide layers.
mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use company_api::app::build_app;
use company_api::config::Config;
use company_api::services::auth::AuthService;
use company_api::state::AppState;

use crate::common::{FakeCompanyRepo, FakeUserRepo, SECRET, TestApp, get};

fn full_app() -> TestApp {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
        "API_SECRET" => Some(SECRET.to_string()),
        "REQUEST_BODY_LIMIT_BYTES" => Some("64".to_string()),
        _ => None,
    })
    .unwrap();

    let companies = Arc::new(FakeCompanyRepo::default());
    let users = Arc::new(FakeUserRepo::default());
    let auth = Arc::new(AuthService::new(SECRET, 0).unwrap());
    let state = AppState::new(companies.clone(), users.clone(), auth);

    TestApp {
        router: build_app(state, &config),
        companies,
        users,
    }
}

#[tokio::test]
async fn test_health_reports_service_and_version() {
    let app = TestApp::new();

    let res = app.send(get("/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "status": "ok",
            "service": "company-api",
            "version": env!("CARGO_PKG_VERSION"),
        })
    );
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = full_app();

    let res = app.send(get("/api/v1/companies")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.headers.get("x-request-id").is_some());
    assert_eq!(res.headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(res.headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(res.headers.get("referrer-policy").unwrap(), "no-referrer");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = full_app();
    let name = "x".repeat(200);

    let res = app
        .send(common::with_json(
            "POST",
            "/api/v1/companies",
            None,
            json!({"name": name, "user_id": 7}),
        ))
        .await;

    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.body, json!({"error": "request body too large"}));
    assert!(res.headers.get("x-request-id").is_some());
    assert_eq!(app.companies.calls(), 0);
}
