// Resource Table UI - draws the TableView produced by cmdb-core

use crate::state_manager::ResourceStateManager;
use cmdb_core::{registry, RenderedTable, TableView};
use egui::{Color32, RichText};

pub fn show_resource_table(ui: &mut egui::Ui, state: &mut ResourceStateManager) {
    let selected_key = state.selection().map(|selection| selection.key.clone());

    let clicked = match state.view() {
        TableView::Idle => {
            ui.label("Select a resource category to load its inventory.");
            None
        }
        TableView::Loading => {
            let label = state
                .selected_category()
                .map(|category| registry::resolve(category).label)
                .unwrap_or("resources");
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {}...", label));
            });
            None
        }
        TableView::Error(message) => {
            ui.colored_label(Color32::RED, format!("❌ {}", message));
            ui.small("Use Refresh to try again.");
            None
        }
        TableView::Empty => {
            ui.label("No resources found");
            None
        }
        TableView::Table(table) => show_table(ui, table, selected_key.as_deref()),
    };

    if let Some((index, key)) = clicked {
        if selected_key.as_deref() == Some(key.as_str()) {
            state.clear_selection();
        } else {
            state.select_row(index, &key);
        }
    }
}

/// Draws the grid and returns the row clicked this frame, if any.
fn show_table(
    ui: &mut egui::Ui,
    table: &RenderedTable,
    selected_key: Option<&str>,
) -> Option<(usize, String)> {
    let mut clicked = None;

    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("resource_table")
            .num_columns(table.headers.len())
            .spacing([12.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for header in &table.headers {
                    ui.strong(*header);
                }
                ui.end_row();

                for row in &table.rows {
                    let is_selected = selected_key == Some(row.key.as_str());
                    let mut cells = row.cells.iter();

                    // The first column doubles as the row's click target.
                    if let Some(first) = cells.next() {
                        if ui.selectable_label(is_selected, first).clicked() {
                            clicked = Some((row.index, row.key.clone()));
                        }
                    }
                    for cell in cells {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    });

    clicked
}

/// Side panel body for the selected record. Draws nothing without a selection.
pub fn show_record_details(ui: &mut egui::Ui, state: &mut ResourceStateManager) {
    let Some(record) = state.selected_record() else {
        return;
    };

    let title = record.name().unwrap_or_else(|| "Unnamed resource".to_string());
    let details = record.details();
    let tags = record.tags();
    let mut close = false;

    ui.horizontal(|ui| {
        ui.heading(title);
        if ui.small_button("✖").clicked() {
            close = true;
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("record_details")
            .num_columns(2)
            .spacing([10.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for (field, value) in &details {
                    ui.label(RichText::new(field).color(Color32::LIGHT_GRAY));
                    ui.label(value);
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label(RichText::new("Tags").strong());
        if tags.is_empty() {
            ui.label("No tags");
        } else {
            egui::Grid::new("record_tags")
                .num_columns(2)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for (key, value) in &tags {
                        ui.label(RichText::new(key).color(Color32::LIGHT_BLUE));
                        ui.label(value);
                        ui.end_row();
                    }
                });
        }
    });

    if close {
        state.clear_selection();
    }
}
