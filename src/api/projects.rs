//! Project API endpoints.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{CreateProjectRequest, Project, StatusCounts, UpdateProjectRequest};
use crate::services::ProjectStore;
use crate::services::reporting::status_counts;

/// Project list response.
#[derive(Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// Currently selected project, if any.
#[derive(Serialize, ToSchema)]
pub struct SelectedProjectResponse {
    pub project: Option<Project>,
}

/// Configure project routes.
/// Note: More specific routes must be registered before generic ones.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_projects)
        .service(create_project)
        .service(get_selected_project)
        .service(select_project)
        .service(get_project_stats)
        .service(update_project)
        .service(get_project);
}

/// List all projects in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse)
    )
)]
#[get("/projects")]
pub async fn list_projects(store: web::Data<ProjectStore>) -> HttpResponse {
    HttpResponse::Ok().json(ProjectListResponse {
        projects: store.list_projects().await,
    })
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/projects")]
pub async fn create_project(
    store: web::Data<ProjectStore>,
    body: web::Json<CreateProjectRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let project = store.create_project(req).await;
    Ok(HttpResponse::Created().json(project))
}

/// Get the currently selected project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/selected",
    tag = "Projects",
    responses(
        (status = 200, description = "Selected project", body = SelectedProjectResponse)
    )
)]
#[get("/projects/selected")]
pub async fn get_selected_project(store: web::Data<ProjectStore>) -> HttpResponse {
    HttpResponse::Ok().json(SelectedProjectResponse {
        project: store.selected_project().await,
    })
}

/// Get a project by ID.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/projects/{id}")]
pub async fn get_project(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let project = store.get_project(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Edit a project. Omitted fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
#[put("/projects/{id}")]
pub async fn update_project(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
    body: web::Json<UpdateProjectRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let project = store.edit_project(&path.into_inner(), req).await?;

    info!(project_id = %project.id, "Project edited");
    Ok(HttpResponse::Ok().json(project))
}

/// Make a project the active one.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/select",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project selected", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
#[post("/projects/{id}/select")]
pub async fn select_project(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let project = store.get_project(&path.into_inner()).await?;
    store.select_project(project.clone()).await;
    Ok(HttpResponse::Ok().json(project))
}

/// Test case counts for one project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/stats",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Status counts", body = StatusCounts),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/projects/{id}/stats")]
pub async fn get_project_stats(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let project = store.get_project(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(status_counts(&project.test_cases)))
}
