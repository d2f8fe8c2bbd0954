//! Shared test helpers for the HTTP tests.

use std::sync::Arc;

use actix_web::{App, dev::ServiceResponse, test, web};
use qa_dashboard_lib::api;
use qa_dashboard_lib::models::Language;
use qa_dashboard_lib::services::{
    DemoHistory, EventBroadcaster, ProjectStore, RunOrchestrator, SessionStore,
    SimulatedExecutor,
};
use serde_json::{Value, json};

/// Handles to the state behind a test app.
pub struct TestState {
    pub store: ProjectStore,
    pub orchestrator: RunOrchestrator,
    pub broadcaster: EventBroadcaster,
    pub session: web::Data<SessionStore>,
    pub history: DemoHistory,
}

impl TestState {
    /// Empty stores and an instant, seeded executor.
    pub fn new() -> Self {
        Self::with_session(SessionStore::in_memory(Language::En))
    }

    pub fn with_session(session: SessionStore) -> Self {
        let broadcaster = EventBroadcaster::new();
        let store = ProjectStore::new(broadcaster.clone());
        let executor = SimulatedExecutor::seeded(42).with_delay_range(0..0);
        let orchestrator =
            RunOrchestrator::new(store.clone(), Arc::new(executor), broadcaster.clone());
        let history = DemoHistory::generate(&["Alpha".to_string(), "Beta".to_string()]);

        Self {
            store,
            orchestrator,
            broadcaster,
            session: web::Data::new(session),
            history,
        }
    }
}

/// Build the app the way the binary does, minus CORS and static files.
pub async fn create_test_app(
    state: &TestState,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(state.session.clone())
            .app_data(web::Data::new(state.store.clone()))
            .app_data(web::Data::new(state.orchestrator.clone()))
            .app_data(web::Data::new(state.history.clone()))
            .app_data(web::Data::new(state.broadcaster.clone()))
            .service(web::scope("/api/v1").configure(api::configure_api)),
    )
    .await
}

/// Send a JSON request and return status and parsed body (Null when empty).
pub async fn send<S>(app: &S, method: &str, uri: &str, body: Option<Value>) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = match method {
        "GET" => test::TestRequest::get(),
        "POST" => test::TestRequest::post(),
        "PUT" => test::TestRequest::put(),
        "DELETE" => test::TestRequest::delete(),
        other => panic!("unsupported method {other}"),
    }
    .uri(uri);
    let req = match body {
        Some(body) => req.set_json(body),
        None => req,
    };

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

/// Create a web project and return its JSON.
pub async fn create_project<S>(app: &S, name: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/projects",
        Some(json!({ "name": name, "type": "web" })),
    )
    .await;
    assert_eq!(status, 201, "Failed to create project: {body}");
    body
}

/// Add a test case with a caller-chosen id.
pub async fn add_case<S>(app: &S, project_id: &str, case_id: &str, name: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/v1/projects/{project_id}/test-cases"),
        Some(json!({ "id": case_id, "name": name })),
    )
    .await;
    assert_eq!(status, 201, "Failed to add test case: {body}");
    body
}
