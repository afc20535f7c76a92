// src/ui/statement.rs
use eframe::egui;
use std::path::Path;

use crate::file::FileFilter;
use crate::state::{ResultsView, ViewState};

const ANALYZE_BUTTON_SPACE: f32 = 90.0;
const MIN_PATH_FIELD_WIDTH: f32 = 120.0;

/// Requests raised by the statement view for the app to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementAction {
    AnalyzeViaPicker,
    AnalyzeViaManual,
}

pub fn show_statement_view(
    ui: &mut egui::Ui,
    view: &ViewState,
    manual_path: &mut String,
    filter: &FileFilter,
    picker_available: bool,
) -> Option<StatementAction> {
    let mut action = None;

    // File selection Section
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Statement");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let button = egui::Button::new("📂 Choose & Analyze...");
            if ui.add_enabled(view.analyze_enabled, button).clicked() {
                action = Some(StatementAction::AnalyzeViaPicker);
            }
            ui.label(format!(
                "{} ({})",
                filter.name,
                filter.extensions.join(", ")
            ));
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("File path:");
            let response = ui.add_sized(
                [path_field_width(ui.available_width()), 20.0],
                egui::TextEdit::singleline(&mut *manual_path)
                    .hint_text("/path/to/statement.csv"),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if ui
                .add_enabled(view.analyze_enabled, egui::Button::new("Analyze"))
                .clicked()
                || (submitted && view.analyze_enabled)
            {
                action = Some(StatementAction::AnalyzeViaManual);
            }
        });

        let trimmed = manual_path.trim();
        if !trimmed.is_empty() && !filter.accepts(Path::new(trimmed)) {
            ui.label(
                egui::RichText::new("Unrecognized file type, the analyzer may fall back to sample data")
                    .small()
                    .color(egui::Color32::YELLOW),
            );
        }

        if !picker_available {
            ui.label(
                egui::RichText::new("File dialog not available. Enter the statement path manually.")
                    .small()
                    .weak(),
            );
        }
    });

    ui.add_space(16.0);

    if view.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Analyzing statement...");
        });
    }

    if view.results_visible {
        show_results(ui, &view.results);
    }

    action
}

/// Leaves room for the Analyze button without collapsing on narrow windows.
fn path_field_width(available: f32) -> f32 {
    (available - ANALYZE_BUTTON_SPACE).max(MIN_PATH_FIELD_WIDTH)
}

fn show_results(ui: &mut egui::Ui, results: &ResultsView) {
    egui::ScrollArea::vertical()
        .id_source("results_scroll")
        .show(ui, |ui| {
            if let Some(summary) = &results.summary {
                ui.label(egui::RichText::new(summary).strong());
                ui.add_space(8.0);
            }

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Spending Categories");
                for line in &results.categories {
                    ui.label(line);
                }
                if !results.category_shares.is_empty() {
                    show_category_chart(ui, &results.category_shares);
                }
            });
            ui.add_space(8.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Top Merchants");
                for line in &results.merchants {
                    ui.label(line);
                }
            });
            ui.add_space(8.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Insights");
                for insight in &results.insights {
                    ui.label(format!("• {}", insight));
                }
            });
        });
}

fn show_category_chart(ui: &mut egui::Ui, shares: &[(String, f64)]) {
    let plot = egui_plot::Plot::new("category_shares")
        .height(180.0)
        .allow_zoom(false)
        .allow_drag(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0);

    plot.show(ui, |plot_ui| {
        let bars: Vec<egui_plot::Bar> = shares
            .iter()
            .enumerate()
            .map(|(i, (category, percentage))| {
                egui_plot::Bar::new(i as f64, *percentage)
                    .name(category)
                    .width(0.6)
                    .fill(egui::Color32::from_rgb(100, 150, 255))
            })
            .collect();

        plot_ui.bar_chart(egui_plot::BarChart::new(bars));
    });
}
