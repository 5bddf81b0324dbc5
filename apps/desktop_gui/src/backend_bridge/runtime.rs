//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{
    perform_lookup, ClientConfig, HttpLookupTransport, LookupTransport, MissingLookupTransport,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: ClientConfig) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match build_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("{err:#}");
                let _ = ui_tx.try_send(UiEvent::WorkerUnavailable(format!("{err:#}")));
                return;
            }
        };

        runtime.block_on(async move {
            let transport = lookup_transport(&config, &ui_tx);
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Lookup(pending) => {
                        let transport = transport.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = perform_lookup(&transport, &pending.request).await;
                            let event = UiEvent::LookupResolved {
                                ticket: pending.ticket,
                                outcome,
                            };
                            if ui_tx.try_send(event).is_err() {
                                tracing::error!(
                                    ticket = pending.ticket.sequence(),
                                    "ui event queue rejected lookup outcome"
                                );
                            }
                        });
                    }
                }
            }
            tracing::info!("ui command queue closed; lookup worker exiting");
        });
    });
}

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("backend worker startup failure: failed to build runtime")
}

/// An unusable base URL is not fatal: every lookup then fails as a transport
/// error and the form reports it.
fn lookup_transport(config: &ClientConfig, ui_tx: &Sender<UiEvent>) -> Arc<dyn LookupTransport> {
    match HttpLookupTransport::new(config) {
        Ok(transport) => {
            tracing::info!(base_url = transport.base_url(), "lookup transport ready");
            Arc::new(transport)
        }
        Err(err) => {
            tracing::error!(base_url = %config.base_url, %err, "lookup transport unavailable");
            let _ = ui_tx.try_send(UiEvent::Info(format!("Lookup service unavailable: {err}")));
            Arc::new(MissingLookupTransport::new(err.to_string()))
        }
    }
}
