//! Business logic services.

pub mod demo;
pub mod event_broadcaster;
pub mod executor;
pub mod orchestrator;
pub mod project_store;
pub mod reporting;
pub mod session;

pub use demo::seed_demo_projects;
pub use event_broadcaster::EventBroadcaster;
pub use executor::{SimulatedExecutor, TestExecutor};
pub use orchestrator::RunOrchestrator;
pub use project_store::ProjectStore;
pub use reporting::DemoHistory;
pub use session::SessionStore;
