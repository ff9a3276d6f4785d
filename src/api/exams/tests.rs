use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn create_exam_without_title_returns_400() {
    let ctx = test_support::setup_lazy_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({ "tally_form_id": "form123" })),
        ))
        .await
        .expect("response");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
}

#[tokio::test]
async fn create_exam_without_form_id_returns_400() {
    let ctx = test_support::setup_lazy_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({ "title": "Midterm" })),
        ))
        .await
        .expect("response");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
}

#[tokio::test]
async fn create_exam_accepts_camel_case_alias() {
    let ctx = test_support::setup_lazy_context().await;

    // Validation passes with the camelCase alias; the request then dies on
    // the lazily-connected pool, which is enough to prove the alias parsed.
    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({ "tallyFormId": "form123", "title": "Midterm" })),
        ))
        .await
        .expect("response");

    assert_ne!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_exam_with_empty_body_returns_400() {
    let ctx = test_support::setup_lazy_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::POST, "/api/exams", Some(json!({}))))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
