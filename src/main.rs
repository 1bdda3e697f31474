mod app;
mod catalog;
mod config;
mod convert;
mod error;
mod suggest;
mod utils;
mod workflow;

#[cfg(test)]
mod test_support;

use app::FileConverter;
use config::AppConfig;
use tracing::{error, info};

/// Set up logging and tracing
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn main() {
    init_tracing();

    let converter = match AppConfig::load().and_then(FileConverter::from_config) {
        Ok(converter) => converter,
        Err(e) => {
            error!("Failed to start IntelliConvert: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 680.0])
            .with_min_inner_size([420.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    info!("Starting IntelliConvert");
    if let Err(e) = eframe::run_native(
        "IntelliConvert File Converter",
        options,
        Box::new(move |_cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
            Box::new(converter)
        }),
    ) {
        error!("Window closed with an error: {}", e);
    }
}
