//! Test case API endpoints.
//!
//! Test cases have no identity outside their project; every route is nested
//! under `/projects/{id}`.

use actix_web::{HttpResponse, delete, post, put, web};

use crate::error::{AppError, AppResult};
use crate::models::{DeleteTestCasesRequest, DeleteTestCasesResponse, NewTestCase, TestCase};
use crate::services::ProjectStore;

/// Configure test case routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(delete_test_cases)
        .service(add_test_case)
        .service(update_test_case)
        .service(delete_test_case);
}

/// Append a test case to a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/test-cases",
    tag = "Test Cases",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = NewTestCase,
    responses(
        (status = 201, description = "Test case created", body = TestCase),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate test case ID", body = crate::error::ErrorResponse)
    )
)]
#[post("/projects/{id}/test-cases")]
pub async fn add_test_case(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
    body: web::Json<NewTestCase>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let test_case = store.add_test_case(&path.into_inner(), req).await?;
    Ok(HttpResponse::Created().json(test_case))
}

/// Replace a test case. The path ID wins over any ID in the body.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}/test-cases/{case_id}",
    tag = "Test Cases",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("case_id" = String, Path, description = "Test case ID")
    ),
    request_body = NewTestCase,
    responses(
        (status = 200, description = "Test case updated", body = TestCase),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Project or test case not found", body = crate::error::ErrorResponse)
    )
)]
#[put("/projects/{id}/test-cases/{case_id}")]
pub async fn update_test_case(
    store: web::Data<ProjectStore>,
    path: web::Path<(String, String)>,
    body: web::Json<NewTestCase>,
) -> AppResult<HttpResponse> {
    let (project_id, case_id) = path.into_inner();
    let mut req = body.into_inner();
    req.id = Some(case_id);
    req.validate().map_err(AppError::Validation)?;

    let test_case = store
        .update_test_case(&project_id, req.into_test_case())
        .await?;
    Ok(HttpResponse::Ok().json(test_case))
}

/// Delete a single test case.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}/test-cases/{case_id}",
    tag = "Test Cases",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("case_id" = String, Path, description = "Test case ID")
    ),
    responses(
        (status = 204, description = "Test case deleted"),
        (status = 404, description = "Project or test case not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/projects/{id}/test-cases/{case_id}")]
pub async fn delete_test_case(
    store: web::Data<ProjectStore>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (project_id, case_id) = path.into_inner();
    let deleted = store
        .delete_test_cases(&project_id, std::slice::from_ref(&case_id))
        .await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Test case {}", case_id)));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Delete several test cases at once. Unknown IDs are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/test-cases/delete",
    tag = "Test Cases",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = DeleteTestCasesRequest,
    responses(
        (status = 200, description = "Number of deleted test cases", body = DeleteTestCasesResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
#[post("/projects/{id}/test-cases/delete")]
pub async fn delete_test_cases(
    store: web::Data<ProjectStore>,
    path: web::Path<String>,
    body: web::Json<DeleteTestCasesRequest>,
) -> AppResult<HttpResponse> {
    let deleted = store
        .delete_test_cases(&path.into_inner(), &body.ids)
        .await?;
    Ok(HttpResponse::Ok().json(DeleteTestCasesResponse { deleted }))
}
