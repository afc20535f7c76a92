// src/app.rs
use eframe::egui;
use std::sync::Arc;

use crate::analysis::LocalBackend;
use crate::config::Settings;
use crate::file::detect_picker;
use crate::orchestrator::{AnalysisOrchestrator, Dispatch, Outcome};
use crate::ui::{show_statement_view, StatementAction};

const MANUAL_PATH_KEY: &str = "manual_path";

pub struct StatementApp {
    orchestrator: AnalysisOrchestrator,
    manual_path: String,
    error_message: Option<String>,
}

impl StatementApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        let picker = detect_picker(&settings.picker);
        let backend = Arc::new(LocalBackend::new(settings.analysis.clone()));
        let orchestrator = AnalysisOrchestrator::new(picker, backend, settings.picker.filter());

        let manual_path = cc
            .storage
            .and_then(|storage| eframe::get_value::<String>(storage, MANUAL_PATH_KEY))
            .unwrap_or_default();

        Self {
            orchestrator,
            manual_path,
            error_message: None,
        }
    }

    fn handle_action(&mut self, action: StatementAction) {
        let outcome = match action {
            StatementAction::AnalyzeViaPicker => self.orchestrator.analyze_via_picker(Dispatch::Background),
            StatementAction::AnalyzeViaManual => self
                .orchestrator
                .analyze_via_manual(&self.manual_path, Dispatch::Background),
        };
        self.handle_outcome(outcome);
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Error(e) => {
                tracing::warn!(error = %e, "request ended with an error");
                self.error_message = Some(e.to_string());
            }
            Outcome::Success(_) | Outcome::Pending | Outcome::Cancelled => {}
        }
    }
}

impl eframe::App for StatementApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(outcome) = self.orchestrator.poll() {
            self.handle_outcome(outcome);
        }
        if self.orchestrator.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Financial Statement Analyzer");
        });

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = show_statement_view(
                ui,
                self.orchestrator.view(),
                &mut self.manual_path,
                self.orchestrator.filter(),
                self.orchestrator.picker_available(),
            );
        });

        if let Some(action) = action {
            self.handle_action(action);
        }

        // Show error modal if needed
        let error_msg = self.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, MANUAL_PATH_KEY, &self.manual_path);
    }
}
