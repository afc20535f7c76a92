// src/state/mod.rs

/// Text of the three result regions, plus a one-line summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub summary: Option<String>,
    pub categories: Vec<String>,
    /// (category, percentage) pairs for the chart, same order as `categories`.
    pub category_shares: Vec<(String, f64)>,
    pub merchants: Vec<String>,
    pub insights: Vec<String>,
}

// Core view state, owned by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub results_visible: bool,
    pub analyze_enabled: bool,
    pub results: ResultsView,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: false,
            results_visible: false,
            analyze_enabled: true,
            results: ResultsView::default(),
        }
    }
}

impl ViewState {
    pub fn is_busy(&self) -> bool {
        self.loading
    }

    pub fn enter_busy(&mut self) {
        self.loading = true;
        self.analyze_enabled = false;
        self.results_visible = false;
    }

    pub fn finish_success(&mut self, results: ResultsView) {
        self.results = results;
        self.results_visible = true;
        self.exit_busy();
    }

    /// Prior results stay hidden after a failure.
    pub fn finish_failure(&mut self) {
        self.results_visible = false;
        self.exit_busy();
    }

    fn exit_busy(&mut self) {
        self.loading = false;
        self.analyze_enabled = true;
    }
}
