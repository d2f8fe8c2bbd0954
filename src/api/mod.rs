//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod projects;
pub mod reports;
pub mod runs;
pub mod session;
pub mod test_cases;
pub mod websocket;

use actix_web::web;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use projects::configure_routes as configure_project_routes;
pub use reports::configure_routes as configure_report_routes;
pub use runs::configure_routes as configure_run_routes;
pub use session::configure_routes as configure_session_routes;
pub use test_cases::configure_routes as configure_test_case_routes;
pub use websocket::configure_routes as configure_websocket_routes;

/// Register every `/api/v1` route. The WebSocket lives outside the scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_test_case_routes)
        .configure(configure_project_routes)
        .configure(configure_run_routes)
        .configure(configure_report_routes)
        .configure(configure_session_routes);
}
