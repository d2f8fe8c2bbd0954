//! Reporting endpoints.

use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_summary_reflects_store() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/projects/{id}/test-cases"),
        Some(json!({ "name": "Login", "status": "pass" })),
    )
    .await;
    assert_eq!(status, 201);
    add_case(&app, id, "tc-b", "Search").await;

    let (status, body) = send(&app, "GET", "/api/v1/reports/summary", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["total_projects"], 1);
    assert_eq!(body["web_projects"], 1);
    assert_eq!(body["mobile_projects"], 0);
    assert_eq!(body["test_cases"]["total"], 2);
    assert_eq!(body["test_cases"]["passed"], 1);
    assert_eq!(body["projects_by_status"]["pending"], 1);
}

#[actix_rt::test]
async fn test_history_is_demo_and_stable() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, first) = send(&app, "GET", "/api/v1/reports/history", None).await;
    assert_eq!(status, 200);
    assert_eq!(first["demo"], true);
    assert_eq!(first["runs"].as_array().unwrap().len(), 15);

    let (_, second) = send(&app, "GET", "/api/v1/reports/history", None).await;
    assert_eq!(first, second);
}

#[actix_rt::test]
async fn test_trend_sums_match_history() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (_, history) = send(&app, "GET", "/api/v1/reports/history", None).await;
    let (status, trend) = send(&app, "GET", "/api/v1/reports/trend", None).await;
    assert_eq!(status, 200);

    let runs: u64 = trend
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["runs"].as_u64().unwrap())
        .sum();
    let passed_history: u64 = history["runs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["passed"].as_u64().unwrap())
        .sum();
    let passed_trend: u64 = trend
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["passed"].as_u64().unwrap())
        .sum();
    assert_eq!(runs, 15);
    assert_eq!(passed_trend, passed_history);
}

#[actix_rt::test]
async fn test_export_csv() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/export.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains(".csv"));

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("Run ID,Date,Project"));
    assert_eq!(lines.count(), 15);
}
