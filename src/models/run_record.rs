//! Synthetic run history records.
//!
//! These are demo fixtures for the charts and CSV export. They are never
//! derived from real orchestrator runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a historical run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunRecordStatus {
    Passed,
    Failed,
}

impl RunRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fabricated past run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RunRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub executed_by: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub duration_minutes: u32,
    pub status: RunRecordStatus,
}

/// History response. `demo` is always true.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RunHistoryResponse {
    pub demo: bool,
    pub runs: Vec<RunRecord>,
}
