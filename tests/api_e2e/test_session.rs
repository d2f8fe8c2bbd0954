//! Session endpoints.

use qa_dashboard_lib::models::Language;
use qa_dashboard_lib::services::SessionStore;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_login_logout_cycle() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(&app, "GET", "/api/v1/session", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["authenticated"], false);
    assert_eq!(body["language"], "en");

    let (status, user) = send(
        &app,
        "POST",
        "/api/v1/session/login",
        Some(json!({ "email": "tester@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(user["email"], "tester@example.com");

    let (_, body) = send(&app, "GET", "/api/v1/session", None).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "tester@example.com");

    let (status, _) = send(&app, "POST", "/api/v1/session/logout", None).await;
    assert_eq!(status, 204);

    let (_, body) = send(&app, "GET", "/api/v1/session", None).await;
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user").is_none());
}

#[actix_rt::test]
async fn test_login_requires_email_and_password() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/session/login",
        Some(json!({ "email": "", "password": "secret" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/session/login",
        Some(json!({ "email": "tester@example.com", "password": "" })),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_register_password_mismatch() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/session/register",
        Some(json!({
            "name": "Tester",
            "email": "tester@example.com",
            "password": "one",
            "confirm_password": "two"
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Passwords do not match");

    let (status, user) = send(
        &app,
        "POST",
        "/api/v1/session/register",
        Some(json!({
            "name": "Tester",
            "email": "tester@example.com",
            "password": "same",
            "confirm_password": "same"
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(user["name"], "Tester");
}

#[actix_rt::test]
async fn test_language_survives_logout_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let session = SessionStore::open(&path, Language::En).await.unwrap();
        let state = TestState::with_session(session);
        let app = create_test_app(&state).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/session/language",
            Some(json!({ "language": "vi" })),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["language"], "vi");

        send(
            &app,
            "POST",
            "/api/v1/session/login",
            Some(json!({ "email": "tester@example.com", "password": "secret" })),
        )
        .await;
        send(&app, "POST", "/api/v1/session/logout", None).await;
    }

    let session = SessionStore::open(&path, Language::En).await.unwrap();
    let state = TestState::with_session(session);
    let app = create_test_app(&state).await;

    let (_, body) = send(&app, "GET", "/api/v1/session", None).await;
    assert_eq!(body["language"], "vi");
    assert_eq!(body["authenticated"], false);
}

#[actix_rt::test]
async fn test_unsupported_language_is_rejected() {
    let state = TestState::new();
    let app = create_test_app(&state).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/session/language",
        Some(json!({ "language": "fr" })),
    )
    .await;
    assert_eq!(status, 400);
}
