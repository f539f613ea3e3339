use dyslexia_reader::{
    config::AppConfig,
    gui::ReaderApp,
};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dyslexia_reader=info")),
        )
        .init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dyslexia Reader")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dyslexia Reader",
        options,
        Box::new(|cc| Ok(Box::new(ReaderApp::new(cc, config)?))),
    )
}
