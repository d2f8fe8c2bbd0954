//! WebSocket event types for live run updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::ProjectRunStatus;
use super::run::{RunLogEntry, RunSummary};
use super::test_case::CaseStatus;

/// WebSocket event sent to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum WsEvent {
    /// A run was accepted and is about to execute its first case.
    RunStarted(RunStartedPayload),
    /// A case became the current case.
    CaseStarted(CasePayload),
    /// A case finished and its outcome was recorded.
    CaseCompleted(CaseCompletedPayload),
    /// A line was appended to the run log.
    RunLog(RunLogPayload),
    /// All selected cases were processed.
    RunFinished(RunFinishedPayload),
    /// The run was stopped before processing every case.
    RunStopped(RunStoppedPayload),
    /// A project was replaced in the store.
    ProjectUpdated(ProjectUpdatedPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStartedPayload {
    pub run_id: Uuid,
    pub project_id: String,
    pub case_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasePayload {
    pub run_id: Uuid,
    pub case_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseCompletedPayload {
    pub run_id: Uuid,
    pub case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogPayload {
    pub run_id: Uuid,
    pub entry: RunLogEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFinishedPayload {
    pub summary: RunSummary,
    pub last_run_status: ProjectRunStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStoppedPayload {
    pub run_id: Uuid,
    pub completed: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectUpdatedPayload {
    pub project_id: String,
    pub last_run_status: ProjectRunStatus,
    pub test_case_count: usize,
}

/// Wrapper that includes timestamp with every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsEventMessage {
    #[serde(flatten)]
    pub event: WsEvent,
    pub timestamp: DateTime<Utc>,
}

impl WsEventMessage {
    /// Create a new event message with the current timestamp.
    pub fn new(event: WsEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

impl WsEvent {
    pub fn run_started(run_id: Uuid, project_id: &str, case_ids: &[String]) -> Self {
        WsEvent::RunStarted(RunStartedPayload {
            run_id,
            project_id: project_id.to_string(),
            case_ids: case_ids.to_vec(),
        })
    }

    pub fn case_started(run_id: Uuid, case_id: &str) -> Self {
        WsEvent::CaseStarted(CasePayload {
            run_id,
            case_id: case_id.to_string(),
        })
    }

    pub fn case_completed(run_id: Uuid, case_id: &str, status: Option<CaseStatus>) -> Self {
        WsEvent::CaseCompleted(CaseCompletedPayload {
            run_id,
            case_id: case_id.to_string(),
            status,
        })
    }

    pub fn run_log(run_id: Uuid, entry: RunLogEntry) -> Self {
        WsEvent::RunLog(RunLogPayload { run_id, entry })
    }

    pub fn run_finished(summary: RunSummary, last_run_status: ProjectRunStatus) -> Self {
        WsEvent::RunFinished(RunFinishedPayload {
            summary,
            last_run_status,
        })
    }

    pub fn run_stopped(run_id: Uuid, completed: usize, remaining: usize) -> Self {
        WsEvent::RunStopped(RunStoppedPayload {
            run_id,
            completed,
            remaining,
        })
    }

    pub fn project_updated(
        project_id: &str,
        last_run_status: ProjectRunStatus,
        test_case_count: usize,
    ) -> Self {
        WsEvent::ProjectUpdated(ProjectUpdatedPayload {
            project_id: project_id.to_string(),
            last_run_status,
            test_case_count,
        })
    }
}
