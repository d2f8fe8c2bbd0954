//! Test execution backends.
//!
//! The orchestrator only sequences cases; how a single case is executed is
//! behind [`TestExecutor`]. The only backend today is [`SimulatedExecutor`],
//! which waits a random time and flips a weighted coin. A real automation
//! backend would implement the same trait and surface its failures
//! (timeouts, crashes) as `Err`.

use std::ops::Range;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::AppResult;
use crate::models::{CaseOutcome, CaseStatus, TestCase};

/// Probability that a simulated case passes. Not configurable.
pub const SIMULATED_PASS_PROBABILITY: f64 = 0.8;

/// Simulated execution time in milliseconds, `[start, end)`.
pub const SIMULATED_DELAY_MS: Range<u64> = 1000..4000;

const PASS_RESULT: &str = "Test case executed successfully. Actual result matches expected result.";
const FAIL_RESULT: &str = "Test case failed. Actual result does not match expected result.";

/// Executes one test case and reports its outcome.
#[async_trait]
pub trait TestExecutor: Send + Sync {
    async fn execute(&self, test_case: &TestCase) -> AppResult<CaseOutcome>;
}

/// Random pass/fail stand-in for real test automation.
pub struct SimulatedExecutor {
    rng: Mutex<StdRng>,
    delay_ms: Range<u64>,
}

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            delay_ms: SIMULATED_DELAY_MS,
        }
    }

    /// Deterministic executor for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay_ms: SIMULATED_DELAY_MS,
        }
    }

    /// Override the delay range. An empty range means no delay.
    pub fn with_delay_range(mut self, delay_ms: Range<u64>) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn roll(&self) -> (u64, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let delay = if self.delay_ms.is_empty() {
            0
        } else {
            rng.random_range(self.delay_ms.clone())
        };
        (delay, rng.random_bool(SIMULATED_PASS_PROBABILITY))
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TestExecutor for SimulatedExecutor {
    async fn execute(&self, test_case: &TestCase) -> AppResult<CaseOutcome> {
        let (delay_ms, passed) = self.roll();
        let started = Instant::now();

        debug!(case_id = %test_case.id, delay_ms, "Simulating test case");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let (status, actual_result) = if passed {
            (CaseStatus::Pass, PASS_RESULT)
        } else {
            (CaseStatus::Fail, FAIL_RESULT)
        };

        Ok(CaseOutcome {
            status,
            actual_result: actual_result.to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}
