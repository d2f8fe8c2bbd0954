//! Domain models for the QA dashboard.

pub mod project;
pub mod report_stats;
pub mod run;
pub mod run_record;
pub mod test_case;
pub mod user;
pub mod ws_event;

// Re-export commonly used types
pub use project::{
    CreateProjectRequest, Credentials, FileHandle, Project, ProjectRunStatus, ProjectType,
    UpdateProjectRequest,
};
pub use report_stats::{DashboardSummary, ProjectStatusBreakdown, StatusCounts, TrendPoint};
pub use run::{
    CaseOutcome, LogLevel, RunLogEntry, RunSnapshot, RunState, RunSummary, StartRunRequest,
};
pub use run_record::{RunHistoryResponse, RunRecord, RunRecordStatus};
pub use test_case::{
    CaseStatus, DeleteTestCasesRequest, DeleteTestCasesResponse, NewTestCase, TestCase,
};
pub use user::{Language, LoginRequest, RegisterRequest, SessionResponse, SetLanguageRequest, User};
pub use ws_event::{WsEvent, WsEventMessage};
