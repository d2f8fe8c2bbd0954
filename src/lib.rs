//! QA dashboard server library.
//!
//! Holds projects and test cases in memory, runs selected test cases one at a
//! time through a pluggable executor, and serves reporting aggregates, a
//! mocked session and live run events over HTTP and WebSocket.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
