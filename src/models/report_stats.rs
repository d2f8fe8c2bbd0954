//! Aggregates derived from store state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Test case counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    pub total: usize,
}

impl StatusCounts {
    /// Percentage of executed cases that passed, rounded to one decimal.
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            return 0.0;
        }
        ((self.passed as f64 / executed as f64) * 1000.0).round() / 10.0
    }
}

impl std::ops::AddAssign for StatusCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.passed += rhs.passed;
        self.failed += rhs.failed;
        self.pending += rhs.pending;
        self.total += rhs.total;
    }
}

/// Project counts by last run status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProjectStatusBreakdown {
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    pub running: usize,
}

/// Dashboard overview numbers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub web_projects: usize,
    pub mobile_projects: usize,
    pub test_cases: StatusCounts,
    pub pass_rate: f64,
    pub projects_by_status: ProjectStatusBreakdown,
}

/// One day of the pass/fail trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub runs: u32,
    pub passed: u32,
    pub failed: u32,
}
