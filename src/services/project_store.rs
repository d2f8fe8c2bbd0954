//! In-memory project store.
//!
//! Holds every project (with its test cases by value) plus the currently
//! selected project. Nothing here is persisted; the store starts empty on
//! every process start. Every mutation runs under a single write guard that
//! also keeps the selection in sync with the list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{
    CaseOutcome, CreateProjectRequest, NewTestCase, Project, ProjectRunStatus, TestCase,
    UpdateProjectRequest, WsEvent, WsEventMessage,
};
use crate::services::EventBroadcaster;

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    selected: Option<Project>,
}

/// Shared handle to the application's project state.
#[derive(Clone)]
pub struct ProjectStore {
    state: Arc<RwLock<StoreState>>,
    broadcaster: EventBroadcaster,
}

impl ProjectStore {
    pub fn new(broadcaster: EventBroadcaster) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            broadcaster,
        }
    }

    /// Create a project and append it to the list. Never fails.
    pub async fn create_project(&self, data: CreateProjectRequest) -> Project {
        let mut state = self.state.write().await;

        let mut stamp = Utc::now().timestamp_millis();
        while state.projects.iter().any(|p| p.id == stamp.to_string()) {
            stamp += 1;
        }

        let project = Project {
            id: stamp.to_string(),
            name: data.name,
            description: data.description,
            project_type: data.project_type,
            last_run_status: ProjectRunStatus::Pending,
            last_run_date: None,
            credentials: data.credentials,
            files: data.files,
            test_cases: data.test_cases,
        };

        state.projects.push(project.clone());
        info!(project_id = %project.id, name = %project.name, "Project created");
        project
    }

    /// Find the project, mutate it and publish the result under one write
    /// guard, so concurrent edits of the same project never overwrite each
    /// other. `f` must validate before mutating: an `Err` leaves the project
    /// as it was.
    async fn modify<T>(
        &self,
        project_id: &str,
        f: impl FnOnce(&mut Project) -> AppResult<T>,
    ) -> AppResult<(Project, T)> {
        let mut state = self.state.write().await;
        let StoreState { projects, selected } = &mut *state;

        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;
        let out = f(project)?;
        let updated = project.clone();

        if selected.as_ref().is_some_and(|s| s.id == updated.id) {
            *selected = Some(updated.clone());
        }

        // Sent before the guard drops so subscribers see updates in store order.
        self.broadcaster.send(WsEventMessage::new(WsEvent::project_updated(
            &updated.id,
            updated.last_run_status,
            updated.test_cases.len(),
        )));
        Ok((updated, out))
    }

    /// Replace the project with the same id.
    ///
    /// When that project is the current selection the selection is refreshed
    /// to the new value as well.
    pub async fn update_project(&self, project: Project) -> AppResult<Project> {
        let id = project.id.clone();
        let (updated, ()) = self
            .modify(&id, |slot| {
                *slot = project;
                Ok(())
            })
            .await?;
        debug!(project_id = %updated.id, "Project replaced");
        Ok(updated)
    }

    /// Apply a partial edit to the stored project. Test cases and run status
    /// are kept as they are at the time of the edit.
    pub async fn edit_project(&self, project_id: &str, edit: UpdateProjectRequest) -> AppResult<Project> {
        let (updated, ()) = self
            .modify(project_id, |project| {
                edit.apply_to(project);
                Ok(())
            })
            .await?;
        Ok(updated)
    }

    /// Make `project` the active one. The project is not checked against the list.
    pub async fn select_project(&self, project: Project) {
        debug!(project_id = %project.id, "Project selected");
        self.state.write().await.selected = Some(project);
    }

    pub async fn selected_project(&self) -> Option<Project> {
        self.state.read().await.selected.clone()
    }

    /// All projects in insertion order.
    pub async fn list_projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    pub async fn get_project(&self, project_id: &str) -> AppResult<Project> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))
    }

    /// Append a test case to the project's list.
    pub async fn add_test_case(&self, project_id: &str, data: NewTestCase) -> AppResult<TestCase> {
        let test_case = data.into_test_case();
        let (_, added) = self
            .modify(project_id, |project| {
                if project.test_case(&test_case.id).is_some() {
                    return Err(AppError::Conflict(format!(
                        "Test case {} already exists in project {}",
                        test_case.id, project_id
                    )));
                }
                project.test_cases.push(test_case.clone());
                Ok(test_case)
            })
            .await?;
        Ok(added)
    }

    /// Replace the test case with the same id.
    pub async fn update_test_case(&self, project_id: &str, test_case: TestCase) -> AppResult<TestCase> {
        let (_, replaced) = self
            .modify(project_id, |project| {
                let slot = project
                    .test_cases
                    .iter_mut()
                    .find(|tc| tc.id == test_case.id)
                    .ok_or_else(|| AppError::NotFound(format!("Test case {}", test_case.id)))?;
                *slot = test_case.clone();
                Ok(test_case)
            })
            .await?;
        Ok(replaced)
    }

    /// Remove every test case whose id is in `ids`. Returns how many were removed.
    pub async fn delete_test_cases(&self, project_id: &str, ids: &[String]) -> AppResult<usize> {
        let (_, deleted) = self
            .modify(project_id, |project| {
                let before = project.test_cases.len();
                project.test_cases.retain(|tc| !ids.contains(&tc.id));
                Ok(before - project.test_cases.len())
            })
            .await?;
        info!(project_id = %project_id, deleted, "Test cases deleted");
        Ok(deleted)
    }

    /// Overwrite a case's status and actual result after it was executed.
    pub async fn record_case_outcome(
        &self,
        project_id: &str,
        case_id: &str,
        outcome: &CaseOutcome,
    ) -> AppResult<Project> {
        let (project, ()) = self
            .modify(project_id, |project| {
                let test_case = project
                    .test_cases
                    .iter_mut()
                    .find(|tc| tc.id == case_id)
                    .ok_or_else(|| AppError::NotFound(format!("Test case {}", case_id)))?;
                test_case.status = outcome.status;
                test_case.actual_result = outcome.actual_result.clone();
                Ok(())
            })
            .await?;
        Ok(project)
    }

    /// Store the aggregate of a completed run on the project.
    pub async fn record_run_completion(
        &self,
        project_id: &str,
        status: ProjectRunStatus,
        finished_at: DateTime<Utc>,
    ) -> AppResult<Project> {
        let (project, ()) = self
            .modify(project_id, |project| {
                project.last_run_status = status;
                project.last_run_date = Some(finished_at);
                Ok(())
            })
            .await?;
        Ok(project)
    }
}
