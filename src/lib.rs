// src/lib.rs
pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod orchestrator;
pub mod state;
pub mod ui;

pub use analysis::{AnalysisResult, LocalBackend, StatementBackend};
pub use error::{BackendError, OrchestratorError, PickerError};
pub use orchestrator::{AnalysisOrchestrator, Dispatch, Outcome};
