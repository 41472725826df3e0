use std::collections::BTreeSet;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label("Pick platforms, genres and a year range to explore the market.");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Release years");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.year_from, dataset.year_min..=dataset.year_max)
                        .text("From"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.year_to, dataset.year_min..=dataset.year_max)
                        .text("To"),
                )
                .changed();
            if state.year_from > state.year_to {
                ui.label(
                    RichText::new("From > To: showing the previous selection")
                        .color(Color32::YELLOW),
                );
            }
            ui.separator();

            // ---- Category checkbox lists ----
            changed |= category_filter(
                ui,
                "Platforms",
                &dataset.platforms,
                &mut state.selected_platforms,
            );
            changed |= category_filter(ui, "Genres", &dataset.genres, &mut state.selected_genres);
        });

    // Push the new control tuple through the pipeline as one batch.
    if changed {
        state.recompute();
    }
}

/// One collapsible checkbox list with All/None shortcuts.
/// Returns whether the selection changed this frame.
fn category_filter(
    ui: &mut Ui,
    title: &str,
    all_values: &BTreeSet<String>,
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;

    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.as_str()).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(out)) = (&state.dataset, state.output()) {
            ui.label(format!(
                "{} games loaded, {} matching",
                ds.len(),
                out.total_games
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open games dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_dataset(state, &path);
    }
}

/// Load a dataset file into the app state; failures become a status message.
pub fn load_dataset(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} games across {} platforms and {} genres ({}–{})",
                dataset.len(),
                dataset.platforms.len(),
                dataset.genres.len(),
                dataset.year_min,
                dataset.year_max
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
