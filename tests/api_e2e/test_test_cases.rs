//! Test case endpoints.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_add_generates_id_when_absent() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/projects/{id}/test-cases"),
        Some(json!({ "name": "Checkout", "tracking_ref": "SHOP-7" })),
    )
    .await;
    assert_eq!(status, 201);
    assert!(body["id"].as_str().unwrap().starts_with("tc-"));
    assert_eq!(body["status"], "pending");
    assert_eq!(body["tracking_ref"], "SHOP-7");
}

#[actix_rt::test]
async fn test_duplicate_case_id_conflicts() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    add_case(&app, id, "tc-a", "Login").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/projects/{id}/test-cases"),
        Some(json!({ "id": "tc-a", "name": "Login again" })),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "CONFLICT");
}

#[actix_rt::test]
async fn test_add_to_unknown_project_is_404() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/projects/nope/test-cases",
        Some(json!({ "name": "Login" })),
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_update_uses_path_id() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    add_case(&app, id, "tc-a", "Login").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/projects/{id}/test-cases/tc-a"),
        Some(json!({
            "id": "something-else",
            "name": "Login with SSO",
            "status": "fail",
            "actual_result": "Redirect loop"
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], "tc-a");
    assert_eq!(body["status"], "fail");

    let (_, project) = send(&app, "GET", &format!("/api/v1/projects/{id}"), None).await;
    let cases = project["test_cases"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["name"], "Login with SSO");
    assert_eq!(cases[0]["actual_result"], "Redirect loop");
}

#[actix_rt::test]
async fn test_update_unknown_case_is_404() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/projects/{id}/test-cases/tc-missing"),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_delete_single_case() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    add_case(&app, id, "tc-a", "Login").await;

    let uri = format!("/api/v1/projects/{id}/test-cases/tc-a");
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, 204);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_batch_delete_ignores_unknown_ids() {
    let state = TestState::new();
    let app = create_test_app(&state).await;
    let project = create_project(&app, "Storefront").await;
    let id = project["id"].as_str().unwrap();
    add_case(&app, id, "tc-a", "Login").await;
    add_case(&app, id, "tc-b", "Search").await;
    add_case(&app, id, "tc-c", "Checkout").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/projects/{id}/test-cases/delete"),
        Some(json!({ "ids": ["tc-a", "tc-c", "tc-zzz"] })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["deleted"], 2);

    let (_, project) = send(&app, "GET", &format!("/api/v1/projects/{id}"), None).await;
    assert_eq!(project["test_cases"][0]["id"], "tc-b");
    assert_eq!(project["test_cases"].as_array().unwrap().len(), 1);
}
