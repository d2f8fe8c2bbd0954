//! Run orchestrator state and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::report_stats::StatusCounts;
use super::test_case::CaseStatus;

/// Orchestrator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Severity of a run log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// One line of the live run log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunLogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub message: String,
}

impl RunLogEntry {
    pub fn new(level: LogLevel, case_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            case_id: case_id.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Result of executing one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseOutcome {
    pub status: CaseStatus,
    pub actual_result: String,
    pub duration_ms: u64,
}

/// Point-in-time view of the orchestrator.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RunSnapshot {
    pub state: RunState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub selected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    pub completed: Vec<String>,
    pub logs: Vec<RunLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Request body for starting a run.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartRunRequest {
    pub project_id: String,
    pub case_ids: Vec<String>,
}

/// Summary of a finished run, sent with the `run_finished` event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub project_id: String,
    pub executed: usize,
    pub passed: usize,
    pub failed: usize,
    pub counts: StatusCounts,
    pub finished_at: DateTime<Utc>,
}
