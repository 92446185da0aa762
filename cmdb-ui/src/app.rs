use crate::category_selector::CategorySelector;
use crate::resource_table_ui;
use crate::state_manager::ResourceStateManager;
use crate::wasm_utils;
use cmdb_core::{registry, CmdbConfig, InventoryClient, TableView};
use eframe::egui;

/// CMDB resource browser
pub struct CmdbApp {
    state: ResourceStateManager,
    selector: CategorySelector,
    config: CmdbConfig,
    api_url_input: String,
    connection_error: Option<String>,
    started: bool,
}

impl CmdbApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: CmdbConfig) -> Self {
        wasm_utils::set_panic_hook();
        log::info!("🚀 Starting CMDB resource browser against {}", config.api_base_url);

        let state = ResourceStateManager::from_config(&config).with_repaint(cc.egui_ctx.clone());

        Self {
            state,
            selector: CategorySelector::new(config.default_category),
            api_url_input: config.api_base_url.clone(),
            config,
            connection_error: None,
            started: false,
        }
    }

    fn reconnect(&mut self) {
        let url = self.api_url_input.trim();
        if url.is_empty() {
            self.connection_error = Some("API URL must not be empty".to_string());
            return;
        }

        let config = CmdbConfig {
            api_base_url: url.to_string(),
            ..self.config.clone()
        };
        match InventoryClient::from_config(&config) {
            Ok(client) => {
                self.config = config;
                self.connection_error = None;
                self.state.set_client(client);
            }
            Err(e) => {
                log::error!("❌ [UI] Reconnect failed: {}", e);
                self.connection_error = Some(e.to_string());
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("🗄 CMDB");
            ui.label("Resource configuration management database");
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Resource type:");
            self.selector.show(ui, &mut self.state);

            let loading = self.state.is_loading();
            if ui
                .add_enabled(!loading, egui::Button::new("🔄 Refresh"))
                .clicked()
            {
                self.state.refresh();
            }

            ui.separator();

            ui.menu_button("🔌 Connection", |ui| {
                ui.label("API base URL");
                let edit = ui.text_edit_singleline(&mut self.api_url_input);
                let submitted =
                    edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Reconnect").clicked() || submitted {
                    self.reconnect();
                }
                if let Some(error) = &self.connection_error {
                    ui.colored_label(egui::Color32::RED, error);
                }
            });
        });
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = self
                .state
                .selected_category()
                .map(|category| registry::resolve(category).label)
                .unwrap_or("No category selected");
            ui.label(label);

            if let TableView::Table(table) = self.state.view() {
                ui.separator();
                ui.label(format!("{} resources", table.rows.len()));
            }

            if let Some(url) = self.state.endpoint_url() {
                ui.separator();
                ui.small(url);
            } else if self.state.client().is_none() {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, "⚠ No inventory client");
            }
        });
    }
}

impl eframe::App for CmdbApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update state from async operations
        self.state.update_from_async();

        // Load the default category on first render
        if !self.started {
            self.started = true;
            self.state.select_category(self.selector.selected());
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        if self.state.selected_record().is_some() {
            egui::SidePanel::right("record_details")
                .default_width(320.0)
                .show(ctx, |ui| {
                    resource_table_ui::show_record_details(ui, &mut self.state);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            resource_table_ui::show_resource_table(ui, &mut self.state);
        });
    }
}
