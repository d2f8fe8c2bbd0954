//! Test case model: a single scripted scenario with its last-known outcome.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::project::FileHandle;

/// Last-known outcome of a test case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    #[default]
    Pending,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single test case, owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestCase {
    pub id: String,
    /// External tracker reference, e.g. an issue key.
    #[serde(default)]
    pub tracking_ref: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub input_data: String,
    #[serde(default)]
    pub expected_result: String,
    /// Filled in after a run or by manual edit.
    #[serde(default)]
    pub actual_result: String,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub evidence: Vec<FileHandle>,
}

/// Generate a fresh test case id.
pub fn new_case_id() -> String {
    format!("tc-{}", Uuid::new_v4())
}

/// Request body for adding a test case to a project.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTestCase {
    /// Caller-chosen id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tracking_ref: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub input_data: String,
    #[serde(default)]
    pub expected_result: String,
    #[serde(default)]
    pub actual_result: String,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub evidence: Vec<FileHandle>,
}

impl NewTestCase {
    /// Minimal constructor used by seeding and tests.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            tracking_ref: String::new(),
            name: name.into(),
            prerequisites: String::new(),
            steps: String::new(),
            input_data: String::new(),
            expected_result: String::new(),
            actual_result: String::new(),
            status: CaseStatus::Pending,
            evidence: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Test case name is required".to_string());
        }
        if let Some(id) = &self.id
            && id.trim().is_empty()
        {
            return Err("Test case id must not be blank".to_string());
        }
        Ok(())
    }

    pub fn into_test_case(self) -> TestCase {
        TestCase {
            id: self.id.unwrap_or_else(new_case_id),
            tracking_ref: self.tracking_ref,
            name: self.name,
            prerequisites: self.prerequisites,
            steps: self.steps,
            input_data: self.input_data,
            expected_result: self.expected_result,
            actual_result: self.actual_result,
            status: self.status,
            evidence: self.evidence,
        }
    }
}

/// Request body for batch deletion.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteTestCasesRequest {
    pub ids: Vec<String>,
}

/// Response for deletions.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteTestCasesResponse {
    pub deleted: usize,
}
