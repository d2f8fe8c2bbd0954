//! Read-side aggregation for the dashboard.
//!
//! Status counts and the dashboard summary are computed from live store
//! state. The run history is fabricated demo data for the charts and CSV
//! export and has no relation to orchestrator runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::AppResult;
use crate::models::{
    CaseStatus, DashboardSummary, Project, ProjectRunStatus, ProjectStatusBreakdown, ProjectType,
    RunRecord, RunRecordStatus, StatusCounts, TestCase, TrendPoint,
};

/// Number of synthetic runs shown on the charts.
pub const DEMO_HISTORY_LEN: usize = 15;

/// CSV header, column order is fixed.
pub const CSV_HEADER: [&str; 9] = [
    "Run ID",
    "Date",
    "Project",
    "Executed By",
    "Total Tests",
    "Passed",
    "Failed",
    "Duration (min)",
    "Status",
];

/// Format of the CSV `Date` column.
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const DEMO_PROJECTS: &[&str] = &["E-commerce Website", "Mobile Banking App", "Admin Portal"];

const DEMO_EXECUTORS: &[&str] = &[
    "Nguyen Van An",
    "Tran Thi Binh",
    "Le Hoang Cuong",
    "Sarah Johnson",
    "CI Pipeline",
];

/// Count test cases by status.
pub fn status_counts(test_cases: &[TestCase]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: test_cases.len(),
        ..Default::default()
    };
    for tc in test_cases {
        match tc.status {
            CaseStatus::Pass => counts.passed += 1,
            CaseStatus::Fail => counts.failed += 1,
            CaseStatus::Pending => counts.pending += 1,
        }
    }
    counts
}

/// Overview numbers across every project.
pub fn dashboard_summary(projects: &[Project]) -> DashboardSummary {
    let mut test_cases = StatusCounts::default();
    let mut by_status = ProjectStatusBreakdown::default();
    let mut web_projects = 0;

    for project in projects {
        test_cases += status_counts(&project.test_cases);
        if project.project_type == ProjectType::Web {
            web_projects += 1;
        }
        match project.last_run_status {
            ProjectRunStatus::Passed => by_status.passed += 1,
            ProjectRunStatus::Failed => by_status.failed += 1,
            ProjectRunStatus::Pending => by_status.pending += 1,
            ProjectRunStatus::Running => by_status.running += 1,
        }
    }

    DashboardSummary {
        total_projects: projects.len(),
        web_projects,
        mobile_projects: projects.len() - web_projects,
        pass_rate: test_cases.pass_rate(),
        test_cases,
        projects_by_status: by_status,
    }
}

/// Fabricate `count` past runs, newest first, ending at `now`.
///
/// Project names are drawn from `project_names`, or from a fixed demo list
/// when it is empty.
pub fn generate_run_history<R: Rng + ?Sized>(
    rng: &mut R,
    project_names: &[String],
    count: usize,
    now: DateTime<Utc>,
) -> Vec<RunRecord> {
    let fallback: Vec<String> = DEMO_PROJECTS.iter().map(|s| s.to_string()).collect();
    let names: &[String] = if project_names.is_empty() {
        &fallback
    } else {
        project_names
    };

    (0..count)
        .map(|i| {
            let timestamp = now
                - Duration::days(i as i64)
                - Duration::hours(rng.random_range(0..12))
                - Duration::minutes(rng.random_range(0..60));
            let total: u32 = rng.random_range(20..=120);
            let failed = rng.random_range(0..=total / 4);
            let passed = total - failed;
            let status = if passed * 10 >= total * 9 {
                RunRecordStatus::Passed
            } else {
                RunRecordStatus::Failed
            };

            RunRecord {
                id: format!("RUN-{:04}", count - i),
                timestamp,
                project: names.choose(rng).cloned().unwrap_or_default(),
                executed_by: DEMO_EXECUTORS
                    .choose(rng)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                total,
                passed,
                failed,
                duration_minutes: rng.random_range(5..=60),
                status,
            }
        })
        .collect()
}

/// Synthetic history generated once at startup, shared by the chart and
/// export endpoints so both show the same runs.
#[derive(Clone)]
pub struct DemoHistory {
    runs: Arc<Vec<RunRecord>>,
}

impl DemoHistory {
    pub fn new(runs: Vec<RunRecord>) -> Self {
        Self {
            runs: Arc::new(runs),
        }
    }

    /// Generate [`DEMO_HISTORY_LEN`] runs from the thread RNG.
    pub fn generate(project_names: &[String]) -> Self {
        let mut rng = rand::rng();
        Self::new(generate_run_history(
            &mut rng,
            project_names,
            DEMO_HISTORY_LEN,
            Utc::now(),
        ))
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }
}

/// Per-day pass/fail sums, oldest day first.
pub fn history_trend(runs: &[RunRecord]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();
    for run in runs {
        let date = run.timestamp.date_naive();
        let point = days.entry(date).or_insert_with(|| TrendPoint {
            date,
            runs: 0,
            passed: 0,
            failed: 0,
        });
        point.runs += 1;
        point.passed += run.passed;
        point.failed += run.failed;
    }
    days.into_values().collect()
}

/// Serialize runs to CSV: the fixed header line plus one line per run.
pub fn export_csv(runs: &[RunRecord]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for run in runs {
        writer.write_record([
            run.id.clone(),
            run.timestamp.format(CSV_DATE_FORMAT).to_string(),
            run.project.clone(),
            run.executed_by.clone(),
            run.total.to_string(),
            run.passed.to_string(),
            run.failed.to_string(),
            run.duration_minutes.to_string(),
            run.status.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::AppError::Storage(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| crate::error::AppError::Storage(format!("CSV is not UTF-8: {}", e)))
}

/// Download file name for an export made on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("test-results-{}.csv", date.format("%Y-%m-%d"))
}
