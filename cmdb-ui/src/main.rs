// Desktop entry point for the CMDB resource browser
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cmdb_core::CmdbConfig;
    use cmdb_ui::app::CmdbApp;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CmdbConfig::load();
    log::info!(
        "Config: api_base_url={} timeout={}s default_category={}",
        config.api_base_url,
        config.request_timeout_secs,
        config.default_category
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("CMDB Resource Browser"),
        ..Default::default()
    };

    eframe::run_native(
        "CMDB Resource Browser",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(CmdbApp::new(cc, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run desktop app: {}", e))
}

// The browser build starts through `cmdb_ui::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
