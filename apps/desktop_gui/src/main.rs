mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{FormApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Override the user-search endpoint from settings.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _backend = backend_bridge::runtime::launch(
        StartupConfig {
            endpoint: args.endpoint,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Search Form")
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    let shutdown_tx = cmd_tx.clone();
    let result = eframe::run_native(
        "User Search Form",
        options,
        Box::new(|_cc| Ok(Box::new(FormApp::new(cmd_tx, ui_rx)))),
    );
    let _ = shutdown_tx.try_send(BackendCommand::Shutdown);
    result
}
