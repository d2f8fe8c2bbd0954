//! Reporting API endpoints.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};
use chrono::Utc;

use crate::error::AppResult;
use crate::models::{DashboardSummary, RunHistoryResponse, TrendPoint};
use crate::services::reporting::{csv_filename, dashboard_summary, export_csv, history_trend};
use crate::services::{DemoHistory, ProjectStore};

/// Configure report routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_summary)
        .service(get_history)
        .service(get_trend)
        .service(export_history_csv);
}

/// Dashboard overview computed from current project state.
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
#[get("/reports/summary")]
pub async fn get_summary(store: web::Data<ProjectStore>) -> HttpResponse {
    let projects = store.list_projects().await;
    HttpResponse::Ok().json(dashboard_summary(&projects))
}

/// Demo run history for the charts.
#[utoipa::path(
    get,
    path = "/api/v1/reports/history",
    tag = "Reports",
    responses(
        (status = 200, description = "Synthetic run history, newest first", body = RunHistoryResponse)
    )
)]
#[get("/reports/history")]
pub async fn get_history(history: web::Data<DemoHistory>) -> HttpResponse {
    HttpResponse::Ok().json(RunHistoryResponse {
        demo: true,
        runs: history.runs().to_vec(),
    })
}

/// Per-day pass/fail totals of the demo history.
#[utoipa::path(
    get,
    path = "/api/v1/reports/trend",
    tag = "Reports",
    responses(
        (status = 200, description = "Trend points, oldest first", body = Vec<TrendPoint>)
    )
)]
#[get("/reports/trend")]
pub async fn get_trend(history: web::Data<DemoHistory>) -> HttpResponse {
    HttpResponse::Ok().json(history_trend(history.runs()))
}

/// Download the demo history as CSV.
#[utoipa::path(
    get,
    path = "/api/v1/reports/export.csv",
    tag = "Reports",
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv")
    )
)]
#[get("/reports/export.csv")]
pub async fn export_history_csv(history: web::Data<DemoHistory>) -> AppResult<HttpResponse> {
    let body = export_csv(history.runs())?;
    let filename = csv_filename(Utc::now().date_naive());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(body))
}
