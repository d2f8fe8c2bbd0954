//! Project endpoints.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_and_list_projects() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let first = create_project(&app, "Storefront").await;
    let second = create_project(&app, "Back office").await;
    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["last_run_status"], "pending");
    assert_eq!(first["type"], "web");

    let (status, body) = send(&app, "GET", "/api/v1/projects", None).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Storefront", "Back office"]);
}

#[actix_rt::test]
async fn test_create_project_requires_name() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({ "name": "  ", "type": "mobile" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_create_project_rejects_duplicate_embedded_cases() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({
            "name": "Storefront",
            "type": "web",
            "test_cases": [
                { "id": "tc-1", "name": "Login" },
                { "id": "tc-1", "name": "Logout" }
            ]
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, list) = send(&app, "GET", "/api/v1/projects", None).await;
    assert!(list["projects"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_get_unknown_project_is_404() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(&app, "GET", "/api/v1/projects/does-not-exist", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_update_project_keeps_omitted_fields() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    add_case(&app, id, "tc-a", "Login").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/projects/{id}"),
        Some(json!({ "description": "Regression suite" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Storefront");
    assert_eq!(body["description"], "Regression suite");
    assert_eq!(body["test_cases"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_selected_project_follows_edits() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (_, body) = send(&app, "GET", "/api/v1/projects/selected", None).await;
    assert!(body["project"].is_null());

    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();

    let (status, _) = send(&app, "POST", &format!("/api/v1/projects/{id}/select"), None).await;
    assert_eq!(status, 200);

    add_case(&app, id, "tc-a", "Login").await;

    let (_, body) = send(&app, "GET", "/api/v1/projects/selected", None).await;
    assert_eq!(body["project"]["id"], id);
    assert_eq!(body["project"]["test_cases"][0]["id"], "tc-a");
}

#[actix_rt::test]
async fn test_project_stats() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();

    for (case_id, status) in [("tc-1", "pass"), ("tc-2", "fail"), ("tc-3", "pending")] {
        let (code, _) = send(
            &app,
            "POST",
            &format!("/api/v1/projects/{id}/test-cases"),
            Some(json!({ "id": case_id, "name": case_id, "status": status })),
        )
        .await;
        assert_eq!(code, 201);
    }

    let (status, body) = send(&app, "GET", &format!("/api/v1/projects/{id}/stats"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "passed": 1, "failed": 1, "pending": 1, "total": 3 }));
}

#[actix_rt::test]
async fn test_health() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}
