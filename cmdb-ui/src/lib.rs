//! egui shell for the CMDB resource browser: the WASM entry point and the
//! widgets drawing `cmdb-core` state. The desktop binary in `main.rs` reuses
//! the same [`app::CmdbApp`].

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

pub mod app;
pub mod category_selector;
pub mod resource_table_ui;
pub mod state_manager;
pub mod wasm_utils;

/// This is the entry-point for all the web-assembly.
/// This is called once from the HTML with the id of the canvas to draw into.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    wasm_utils::set_panic_hook();

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("No canvas element with id '{}'", canvas_id)))?;

    let web_options = eframe::WebOptions::default();
    let config = cmdb_core::CmdbConfig::default();

    wasm_utils::spawn_async(async move {
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| {
                    cc.egui_ctx.set_visuals(egui::Visuals::dark());
                    Ok(Box::new(app::CmdbApp::new(cc, config)))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading_text"))
        {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("❌ Failed to start eframe: {:?}", e);
                }
            }
        }
    });

    Ok(())
}
