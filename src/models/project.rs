//! Project domain models and DTOs.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::test_case::TestCase;

/// Target platform of the application under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Web,
    Mobile,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate status of the most recent completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRunStatus {
    Passed,
    Failed,
    #[default]
    Pending,
    Running,
}

impl ProjectRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Running => "running",
        }
    }
}

impl std::fmt::Display for ProjectRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Login details for the application under test.
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Phone number or mailbox receiving SMS OTP codes.
    #[serde(default)]
    pub sms_otp_contact: String,
    /// Free-text instructions for logging in.
    #[serde(default)]
    pub login_guide: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sms_otp_contact", &self.sms_otp_contact)
            .field("login_guide", &self.login_guide)
            .finish()
    }
}

/// Metadata for a file attached to a project or test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileHandle {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A named collection of test cases plus target-application credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Generated from the creation timestamp.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub last_run_status: ProjectRunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub files: Vec<FileHandle>,
    /// Insertion order is display order.
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Project {
    /// Find a test case by id.
    pub fn test_case(&self, case_id: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|tc| tc.id == case_id)
    }
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub files: Vec<FileHandle>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl CreateProjectRequest {
    /// Embedded test cases follow the same rules as cases added one by one.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Project name is required".to_string());
        }

        let mut seen = HashSet::new();
        for tc in &self.test_cases {
            if tc.name.trim().is_empty() {
                return Err("Test case name is required".to_string());
            }
            if tc.id.trim().is_empty() {
                return Err("Test case id must not be blank".to_string());
            }
            if !seen.insert(tc.id.as_str()) {
                return Err(format!("Duplicate test case id {}", tc.id));
            }
        }
        Ok(())
    }
}

/// Request body for editing a project. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub credentials: Option<Credentials>,
    pub files: Option<Vec<FileHandle>>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("Project name is required".to_string());
        }
        Ok(())
    }

    /// Apply the edit in place. Test cases and run status are never touched.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(project_type) = self.project_type {
            project.project_type = project_type;
        }
        if let Some(credentials) = self.credentials {
            project.credentials = credentials;
        }
        if let Some(files) = self.files {
            project.files = files;
        }
    }
}
