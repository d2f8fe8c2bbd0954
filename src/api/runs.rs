//! Test run API endpoints.

use actix_web::{HttpResponse, get, post, web};

use crate::error::AppResult;
use crate::models::{RunSnapshot, StartRunRequest};
use crate::services::RunOrchestrator;

/// Configure run routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(stop_run).service(current_run).service(start_run);
}

/// Start running the selected test cases of a project.
///
/// Returns immediately; progress is visible through `GET /runs/current` and
/// the WebSocket stream.
#[utoipa::path(
    post,
    path = "/api/v1/runs",
    tag = "Runs",
    request_body = StartRunRequest,
    responses(
        (status = 202, description = "Run started", body = RunSnapshot),
        (status = 400, description = "Empty or unknown selection", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 409, description = "A run is already in progress", body = crate::error::ErrorResponse)
    )
)]
#[post("/runs")]
pub async fn start_run(
    orchestrator: web::Data<RunOrchestrator>,
    body: web::Json<StartRunRequest>,
) -> AppResult<HttpResponse> {
    let snapshot = orchestrator
        .start_run(&body.project_id, &body.case_ids)
        .await?;
    Ok(HttpResponse::Accepted().json(snapshot))
}

/// Stop the current run after the in-flight test case.
#[utoipa::path(
    post,
    path = "/api/v1/runs/stop",
    tag = "Runs",
    responses(
        (status = 200, description = "Orchestrator state after stopping", body = RunSnapshot)
    )
)]
#[post("/runs/stop")]
pub async fn stop_run(orchestrator: web::Data<RunOrchestrator>) -> HttpResponse {
    HttpResponse::Ok().json(orchestrator.stop_run().await)
}

/// Current orchestrator state and log.
#[utoipa::path(
    get,
    path = "/api/v1/runs/current",
    tag = "Runs",
    responses(
        (status = 200, description = "Orchestrator state", body = RunSnapshot)
    )
)]
#[get("/runs/current")]
pub async fn current_run(orchestrator: web::Data<RunOrchestrator>) -> HttpResponse {
    HttpResponse::Ok().json(orchestrator.snapshot().await)
}
