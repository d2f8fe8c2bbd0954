//! HTTP end-to-end tests.
//!
//! Each test builds a fresh in-process app with its own stores, so tests
//! never share state.
//!
//! Run with: cargo test --test api_e2e

mod test_helpers;

mod test_projects;
mod test_reports;
mod test_runs;
mod test_session;
mod test_test_cases;
