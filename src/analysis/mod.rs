// src/analysis/mod.rs
pub mod parser;
pub mod statement;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisSettings;
use crate::error::{panic_message, BackendError};

// Re-export commonly used types
pub use parser::{parse_statement, ParseError, Transaction};
pub use statement::{analyze_statement, categorize_description, sample_analysis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: f64,
    pub count: u32,
}

/// Analysis returned by a statement backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub spending_categories: Vec<CategoryTotal>,
    pub top_merchants: Vec<MerchantTotal>,
    pub insights: Vec<String>,
    #[serde(default)]
    pub monthly_total: f64,
    #[serde(default)]
    pub transaction_count: usize,
}

/// The `analyze_statement` command. Implementations own all parsing and
/// validation of the file behind `path`.
pub trait StatementBackend: Send + Sync {
    fn analyze_statement(&self, path: &Path) -> Result<AnalysisResult, BackendError>;
}

/// Backend that analyzes statements on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    settings: AnalysisSettings,
}

impl LocalBackend {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }
}

impl StatementBackend for LocalBackend {
    fn analyze_statement(&self, path: &Path) -> Result<AnalysisResult, BackendError> {
        analyze_statement(path, &self.settings)
    }
}

/// Runs one backend call, turning a panic into a `BackendError`.
pub fn call_backend(backend: &dyn StatementBackend, path: &Path) -> Result<AnalysisResult, BackendError> {
    tracing::info!(path = %path.display(), "analyzing statement");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| backend.analyze_statement(path)))
        .unwrap_or_else(|payload| {
            Err(BackendError::new(format!(
                "backend crashed: {}",
                panic_message(payload.as_ref())
            )))
        });

    match &outcome {
        Ok(result) => tracing::info!(
            categories = result.spending_categories.len(),
            merchants = result.top_merchants.len(),
            "analysis finished"
        ),
        Err(e) => tracing::warn!(error = %e, "analysis failed"),
    }

    outcome
}
