//! Test run orchestrator.
//!
//! Executes a selected subset of one project's test cases strictly one after
//! another, in the project's list order, recording each outcome into the
//! [`ProjectStore`] as soon as it resolves. Progress is mirrored into a
//! [`RunSnapshot`] and broadcast as WebSocket events.
//!
//! # Stopping
//! `stop_run` returns the orchestrator to idle immediately and prevents the
//! next case from starting. It does not abort a case that is already
//! executing: that execution runs to completion in the background and its
//! outcome is discarded, never written to the store. Cases after the stop
//! point keep their pre-run status and the project's `last_run_status` is not
//! touched, since it only reflects completed runs.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CaseStatus, LogLevel, ProjectRunStatus, RunLogEntry, RunSnapshot, RunState, RunSummary,
    TestCase, WsEvent, WsEventMessage,
};
use crate::services::reporting::status_counts;
use crate::services::{EventBroadcaster, ProjectStore, TestExecutor};

#[derive(Default)]
struct RunInner {
    snapshot: RunSnapshot,
}

impl RunInner {
    /// Whether `run_id` is still the running run. A stop or a newer run
    /// revokes ownership.
    fn owns(&self, run_id: Uuid) -> bool {
        self.snapshot.state == RunState::Running && self.snapshot.run_id == Some(run_id)
    }

    fn push_log(&mut self, broadcaster: &EventBroadcaster, run_id: Uuid, entry: RunLogEntry) {
        self.snapshot.logs.push(entry.clone());
        broadcaster.send(WsEventMessage::new(WsEvent::run_log(run_id, entry)));
    }
}

/// Sequential runner for selected test cases.
#[derive(Clone)]
pub struct RunOrchestrator {
    store: ProjectStore,
    executor: Arc<dyn TestExecutor>,
    broadcaster: EventBroadcaster,
    inner: Arc<Mutex<RunInner>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RunOrchestrator {
    pub fn new(
        store: ProjectStore,
        executor: Arc<dyn TestExecutor>,
        broadcaster: EventBroadcaster,
    ) -> Self {
        Self {
            store,
            executor,
            broadcaster,
            inner: Arc::new(Mutex::new(RunInner::default())),
            task: Arc::new(Mutex::new(None)),
        }
    }

    /// Start executing `case_ids` from `project_id`.
    ///
    /// The selection is put in the project's list order and de-duplicated.
    /// Fails when the selection is empty, references unknown cases, or a run
    /// is already in progress.
    pub async fn start_run(&self, project_id: &str, case_ids: &[String]) -> AppResult<RunSnapshot> {
        if case_ids.is_empty() {
            return Err(AppError::InvalidInput(
                "Select at least one test case to run".to_string(),
            ));
        }

        let project = self.store.get_project(project_id).await?;

        let wanted: HashSet<&str> = case_ids.iter().map(String::as_str).collect();
        let unknown: Vec<&str> = wanted
            .iter()
            .copied()
            .filter(|id| project.test_case(id).is_none())
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Unknown test case ids: {}",
                unknown.join(", ")
            )));
        }

        let cases: Vec<TestCase> = project
            .test_cases
            .iter()
            .filter(|tc| wanted.contains(tc.id.as_str()))
            .cloned()
            .collect();
        let selected: Vec<String> = cases.iter().map(|tc| tc.id.clone()).collect();

        let run_id = Uuid::now_v7();

        let snapshot = {
            let mut inner = self.inner.lock().await;
            if inner.snapshot.state == RunState::Running {
                return Err(AppError::Conflict("A test run is already in progress".to_string()));
            }

            inner.snapshot = RunSnapshot {
                state: RunState::Running,
                run_id: Some(run_id),
                project_id: Some(project.id.clone()),
                selected: selected.clone(),
                current: None,
                completed: Vec::new(),
                logs: vec![RunLogEntry::new(
                    LogLevel::Info,
                    None,
                    format!("Starting test run with {} test case(s)", selected.len()),
                )],
                started_at: Some(Utc::now()),
            };
            inner.snapshot.clone()
        };

        info!(
            run_id = %run_id,
            project_id = %project.id,
            cases = selected.len(),
            "Test run started"
        );
        self.broadcaster.send(WsEventMessage::new(WsEvent::run_started(
            run_id,
            &project.id,
            &selected,
        )));

        let this = self.clone();
        let project_id = project.id.clone();
        let handle = tokio::spawn(async move {
            this.drive(run_id, project_id, cases).await;
        });
        *self.task.lock().await = Some(handle);

        Ok(snapshot)
    }

    /// Stop the current run. No-op when idle.
    pub async fn stop_run(&self) -> RunSnapshot {
        let mut inner = self.inner.lock().await;
        if inner.snapshot.state != RunState::Running {
            return inner.snapshot.clone();
        }

        let snapshot = &mut inner.snapshot;
        snapshot.state = RunState::Idle;
        snapshot.current = None;
        snapshot
            .logs
            .push(RunLogEntry::new(LogLevel::Info, None, "Test run stopped by user"));

        let completed = snapshot.completed.len();
        let remaining = snapshot.selected.len() - completed;
        if let Some(run_id) = snapshot.run_id {
            info!(run_id = %run_id, completed, remaining, "Test run stopped");
            self.broadcaster.send(WsEventMessage::new(WsEvent::run_stopped(
                run_id, completed, remaining,
            )));
        }

        inner.snapshot.clone()
    }

    /// Current orchestrator state, including the log of the last run.
    pub async fn snapshot(&self) -> RunSnapshot {
        self.inner.lock().await.snapshot.clone()
    }

    /// Wait until the most recently started run task has exited.
    ///
    /// After a stop this also waits for the discarded in-flight case.
    pub async fn wait_for_completion(&self) {
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            warn!(error = %e, "Test run task ended abnormally");
        }
    }

    /// Run `cases` in order for as long as `run_id` owns the orchestrator.
    ///
    /// Every write (snapshot, store, events) happens under the `inner` guard
    /// after checking ownership, so once `stop_run` has returned nothing from
    /// this run reaches the store or the event stream.
    async fn drive(&self, run_id: Uuid, project_id: String, cases: Vec<TestCase>) {
        let mut executed: Vec<CaseStatus> = Vec::with_capacity(cases.len());

        for test_case in &cases {
            {
                let mut inner = self.inner.lock().await;
                if !inner.owns(run_id) {
                    return;
                }
                inner.snapshot.current = Some(test_case.id.clone());
                self.broadcaster
                    .send(WsEventMessage::new(WsEvent::case_started(run_id, &test_case.id)));
                inner.push_log(
                    &self.broadcaster,
                    run_id,
                    RunLogEntry::new(
                        LogLevel::Info,
                        Some(&test_case.id),
                        format!("Running test case: {}", test_case.name),
                    ),
                );
            }

            let result = self.executor.execute(test_case).await;

            // Held across the store write: a stop either lands before it and
            // the outcome is dropped, or waits until it is fully published.
            let mut inner = self.inner.lock().await;
            if !inner.owns(run_id) {
                debug!(run_id = %run_id, case_id = %test_case.id, "Discarding outcome of stopped run");
                return;
            }

            let (recorded, entry) = match result {
                Ok(outcome) => {
                    match self
                        .store
                        .record_case_outcome(&project_id, &test_case.id, &outcome)
                        .await
                    {
                        Ok(_) => {
                            executed.push(outcome.status);
                            let (level, verdict) = match outcome.status {
                                CaseStatus::Pass => (LogLevel::Success, "passed"),
                                _ => (LogLevel::Error, "failed"),
                            };
                            let entry = RunLogEntry::new(
                                level,
                                Some(&test_case.id),
                                format!(
                                    "Test case {} {} ({} ms)",
                                    test_case.name, verdict, outcome.duration_ms
                                ),
                            );
                            (Some(outcome.status), entry)
                        }
                        Err(e) => {
                            warn!(run_id = %run_id, case_id = %test_case.id, error = %e, "Could not record outcome");
                            let entry = RunLogEntry::new(
                                LogLevel::Error,
                                Some(&test_case.id),
                                format!("Could not record result for {}: {}", test_case.name, e),
                            );
                            (None, entry)
                        }
                    }
                }
                Err(e) => {
                    warn!(run_id = %run_id, case_id = %test_case.id, error = %e, "Test case execution failed");
                    let entry = RunLogEntry::new(
                        LogLevel::Error,
                        Some(&test_case.id),
                        format!("Error executing {}: {}", test_case.name, e),
                    );
                    (None, entry)
                }
            };

            inner.push_log(&self.broadcaster, run_id, entry);
            inner.snapshot.current = None;
            inner.snapshot.completed.push(test_case.id.clone());
            self.broadcaster.send(WsEventMessage::new(WsEvent::case_completed(
                run_id,
                &test_case.id,
                recorded,
            )));
        }

        self.finish(run_id, &project_id, &executed).await;
    }

    async fn finish(&self, run_id: Uuid, project_id: &str, executed: &[CaseStatus]) {
        let aggregate = if executed.contains(&CaseStatus::Fail) {
            ProjectRunStatus::Failed
        } else {
            ProjectRunStatus::Passed
        };
        let finished_at = Utc::now();

        let mut inner = self.inner.lock().await;
        if !inner.owns(run_id) {
            return;
        }

        let counts = match self
            .store
            .record_run_completion(project_id, aggregate, finished_at)
            .await
        {
            Ok(project) => status_counts(&project.test_cases),
            Err(e) => {
                warn!(run_id = %run_id, project_id = %project_id, error = %e, "Could not record run completion");
                Default::default()
            }
        };

        let summary = RunSummary {
            run_id,
            project_id: project_id.to_string(),
            executed: executed.len(),
            passed: executed.iter().filter(|s| **s == CaseStatus::Pass).count(),
            failed: executed.iter().filter(|s| **s == CaseStatus::Fail).count(),
            counts,
            finished_at,
        };

        let entry = RunLogEntry::new(
            LogLevel::Info,
            None,
            format!(
                "Test run completed: {} passed, {} failed",
                summary.passed, summary.failed
            ),
        );
        inner.push_log(&self.broadcaster, run_id, entry);
        inner.snapshot.state = RunState::Idle;
        inner.snapshot.current = None;

        info!(
            run_id = %run_id,
            project_id = %project_id,
            passed = summary.passed,
            failed = summary.failed,
            status = %aggregate,
            "Test run completed"
        );
        self.broadcaster
            .send(WsEventMessage::new(WsEvent::run_finished(summary, aggregate)));
    }
}
