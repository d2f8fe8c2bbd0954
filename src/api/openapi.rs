//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QA Dashboard Server",
        version = "0.1.0",
        description = "Projects, test cases, simulated test runs and reporting for the QA dashboard"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        // Project endpoints
        api::projects::list_projects,
        api::projects::create_project,
        api::projects::get_selected_project,
        api::projects::get_project,
        api::projects::update_project,
        api::projects::select_project,
        api::projects::get_project_stats,
        // Test case endpoints
        api::test_cases::add_test_case,
        api::test_cases::update_test_case,
        api::test_cases::delete_test_case,
        api::test_cases::delete_test_cases,
        // Run endpoints
        api::runs::start_run,
        api::runs::stop_run,
        api::runs::current_run,
        // Report endpoints
        api::reports::get_summary,
        api::reports::get_history,
        api::reports::get_trend,
        api::reports::export_history_csv,
        // Session endpoints
        api::session::get_session,
        api::session::login,
        api::session::register,
        api::session::logout,
        api::session::set_language,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            api::health::HealthResponse,
            // Projects
            models::Project,
            models::ProjectType,
            models::ProjectRunStatus,
            models::Credentials,
            models::FileHandle,
            models::CreateProjectRequest,
            models::UpdateProjectRequest,
            api::projects::ProjectListResponse,
            api::projects::SelectedProjectResponse,
            // Test cases
            models::TestCase,
            models::CaseStatus,
            models::NewTestCase,
            models::DeleteTestCasesRequest,
            models::DeleteTestCasesResponse,
            // Runs
            models::RunState,
            models::RunSnapshot,
            models::RunLogEntry,
            models::LogLevel,
            models::StartRunRequest,
            models::RunSummary,
            // Reports
            models::StatusCounts,
            models::DashboardSummary,
            models::ProjectStatusBreakdown,
            models::RunRecord,
            models::RunRecordStatus,
            models::RunHistoryResponse,
            models::TrendPoint,
            // Session
            models::User,
            models::Language,
            models::LoginRequest,
            models::RegisterRequest,
            models::SessionResponse,
            models::SetLanguageRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Project management"),
        (name = "Test Cases", description = "Test cases within a project"),
        (name = "Runs", description = "Sequential test run orchestration"),
        (name = "Reports", description = "Dashboard aggregates and demo run history"),
        (name = "Session", description = "Mocked sign-in and language preference")
    )
)]
pub struct ApiDoc;
