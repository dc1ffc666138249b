use eframe::egui;

use tool_launcher::gui::LauncherApp;
use tool_launcher::logging;
use tool_launcher::store::ConfigStore;
use tool_launcher::APP_NAME;

fn main() -> anyhow::Result<()> {
    let store = ConfigStore::locate();
    store.ensure_exists();
    let settings = store.load().settings;
    logging::init(
        settings.debug_logging,
        Some(logging::log_path_for(store.path())),
    );
    tracing::info!(config = %store.path().display(), "starting {APP_NAME}");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([400.0, 220.0])
            .with_min_inner_size([320.0, 160.0])
            .with_position([-10000.0, -10000.0])
            .with_taskbar(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Box::new(LauncherApp::new(cc, store))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;
    tracing::info!("exiting");
    Ok(())
}
