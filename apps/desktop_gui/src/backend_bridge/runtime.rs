//! Backend worker: a tokio runtime on its own thread that owns the
//! [`FormSession`] and forwards its view events to the UI.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{load_settings, FormSession, GithubUserSearch, SearchSettings, ViewSnapshot};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::StartupConfig;

pub fn launch(
    startup: StartupConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let settings = match resolve_settings(&startup) {
                Ok(settings) => settings,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Settings,
                        format!("{err:#}"),
                    )));
                    tracing::error!("failed to resolve search settings: {err:#}");
                    return;
                }
            };
            let api = match GithubUserSearch::new(&settings) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build user search client: {err}");
                    return;
                }
            };

            let session = FormSession::new(Arc::new(api), settings.request_timeout);
            let mut events = session.subscribe();
            let forward_tx = ui_tx.clone();
            let forward_task = tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if !forward_view_update(&forward_tx, event.snapshot) {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "ui forwarder lagged behind view events");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let _ = ui_tx.try_send(UiEvent::ViewUpdated(Box::new(session.snapshot().await)));
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Backend worker ready ({})",
                settings.search_endpoint
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Dispatch(intent) => session.dispatch(intent).await,
                    BackendCommand::Shutdown => break,
                }
            }

            forward_task.abort();
            tracing::info!("backend worker stopped");
        });
    })
}

/// Hands a snapshot to the UI without blocking the runtime. Returns `false`
/// once the UI side is gone.
pub(crate) fn forward_view_update(ui_tx: &Sender<UiEvent>, snapshot: ViewSnapshot) -> bool {
    match ui_tx.try_send(UiEvent::ViewUpdated(Box::new(snapshot))) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            // A later snapshot supersedes this one.
            tracing::warn!("ui event queue is full; dropping view update");
            true
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue disconnected; stopping view forwarder");
            false
        }
    }
}

fn resolve_settings(startup: &StartupConfig) -> anyhow::Result<SearchSettings> {
    let mut settings = load_settings().context("failed to load search settings")?;
    if let Some(endpoint) = &startup.endpoint {
        settings = settings
            .with_endpoint(endpoint)
            .context("invalid --endpoint")?;
    }
    Ok(settings)
}
