mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_config;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::LookupFormApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured lookup service address.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = load_config();
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    tracing::info!(base_url = %config.base_url, "starting case lookup form");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let max_identifier_len = config.max_identifier_len;
    backend_bridge::runtime::launch(cmd_rx, ui_tx, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Case Information Lookup")
            .with_inner_size([720.0, 680.0])
            .with_min_inner_size([420.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Case Information Lookup",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(LookupFormApp::new(
                cmd_tx,
                ui_rx,
                max_identifier_len,
            )))
        }),
    )
}
