// ABOUTME: HTTP integration tests for benchmark, Z-score, metric, and training load routes
// ABOUTME: Covers gateway identity, query parsing, status codes, and the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for the analysis API
//!
//! Identity comes from the gateway headers; requests without them must be
//! rejected before reaching a handler.

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{app, date, resources_with, session, CohortFixture};
use ringside_server::config::environment::ServerConfig;
use ringside_server::routes;
use serde_json::Value;

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_benchmarks_require_identity() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get("/api/v1/analysis/benchmarks?metric=height_cm")
        .send(app(fixture.provider()))
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_malformed_user_header_rejected() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get("/api/v1/analysis/benchmarks?metric=height_cm")
        .header("x-user-id", "not-a-uuid")
        .send(app(fixture.provider()))
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_gateway_headers_ignored_when_untrusted() {
    let fixture = CohortFixture::new();
    let mut config = ServerConfig::default();
    config.auth.trust_gateway_headers = false;
    let router = routes::router(resources_with(fixture.provider(), config));

    let response = AxumTestRequest::get("/api/v1/analysis/benchmarks?metric=height_cm")
        .as_user(fixture.coach_id)
        .send(router)
        .await;
    assert_eq!(response.status(), 401);
}

// ============================================================================
// Benchmarks
// ============================================================================

#[tokio::test]
async fn test_benchmarks_success() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get("/api/v1/analysis/benchmarks?metric=height_cm")
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["mean"], 45.0);
    assert_eq!(body["std_dev"], 1.41);
    assert_eq!(body["count"], 5);
    assert_eq!(body["reference_group"], "cohort");
    assert_eq!(body["metric"], "height_cm");
}

#[tokio::test]
async fn test_benchmarks_empty_result_has_nulls() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get("/api/v1/analysis/benchmarks?metric=rsi")
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["count"], 0);
    assert!(body["mean"].is_null());
    assert!(body["ci_upper"].is_null());
}

#[tokio::test]
async fn test_benchmarks_gender_without_gender_is_bad_request() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get(
        "/api/v1/analysis/benchmarks?metric=height_cm&reference_group=gender",
    )
    .as_user(fixture.coach_id)
    .send(app(fixture.provider()))
    .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_shared_pool_forbidden_for_coach_header_role() {
    let fixture = CohortFixture::new();
    let uri = "/api/v1/analysis/benchmarks?metric=height_cm&benchmark_source=shared_pool";

    let response = AxumTestRequest::get(uri)
        .as_user_with_role(fixture.coach_id, "coach")
        .send(app(fixture.provider()))
        .await;
    assert_eq!(response.status(), 403);

    // Role falls back to the stored account
    let response = AxumTestRequest::get(uri)
        .as_user(fixture.admin_id)
        .send(app(fixture.provider()))
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_legacy_source_name_accepted() {
    let fixture = CohortFixture::new();
    let response = AxumTestRequest::get(
        "/api/v1/analysis/benchmarks?metric=height_cm&benchmark_source=boxing_science",
    )
    .as_user(fixture.coach_id)
    .send(app(fixture.provider()))
    .await
    .assert_status(StatusCode::OK);

    // The admin in the fixture owns no athletes
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

// ============================================================================
// Z-scores and metrics
// ============================================================================

#[tokio::test]
async fn test_zscore_success() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/athlete/{}/zscore?metric=height_cm",
        fixture.top_jumper().id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["value"], 47.0);
    assert_eq!(body["z_score"], 1.42);
    assert_eq!(body["reference_group"], "cohort");
}

#[tokio::test]
async fn test_zscore_unknown_athlete_not_found() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/athlete/{}/zscore?metric=height_cm",
        uuid::Uuid::new_v4()
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["error"]["message"], "Athlete not found");
}

#[tokio::test]
async fn test_bulk_zscores_keyed_by_event() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/athlete/{}/zscores?metric=height_cm",
        fixture.top_jumper().id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    let scores = body.as_object().unwrap();
    assert_eq!(scores.len(), 1);
    let (_, score) = scores.iter().next().unwrap();
    assert_eq!(score["z_score"], 1.42);
}

#[tokio::test]
async fn test_athlete_metrics_listing() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/athlete/{}/metrics",
        fixture.top_jumper().id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body, serde_json::json!(["height_cm"]));
}

// ============================================================================
// Training load
// ============================================================================

#[tokio::test]
async fn test_training_load_route() {
    let fixture = CohortFixture::new();
    let boxer = fixture.top_jumper().clone();
    fixture
        .database
        .push_session(session(&boxer, date(2024, 3, 28), 5, 60))
        .await;

    let uri = format!(
        "/api/v1/analysis/load/{}?days=7&target_date=2024-03-28",
        boxer.id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["daily_loads"].as_array().unwrap().len(), 7);
    assert_eq!(body["weekly_load"], 300);
    assert!(body["acwr"].is_null());
}

#[tokio::test]
async fn test_training_load_uses_default_window() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/load/{}?target_date=2024-03-28",
        fixture.top_jumper().id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["daily_loads"].as_array().unwrap().len(), 28);
}

#[tokio::test]
async fn test_training_load_days_out_of_range() {
    let fixture = CohortFixture::new();
    let uri = format!("/api/v1/analysis/load/{}?days=120", fixture.top_jumper().id);
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "days must be between 7 and 90");
}

#[tokio::test]
async fn test_training_load_extreme_target_date_is_bad_request() {
    let fixture = CohortFixture::new();
    let uri = format!(
        "/api/v1/analysis/load/{}?days=28&target_date=-262143-01-01",
        fixture.top_jumper().id
    );
    let response = AxumTestRequest::get(&uri)
        .as_user(fixture.coach_id)
        .send(app(fixture.provider()))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "target_date is out of range");
}
