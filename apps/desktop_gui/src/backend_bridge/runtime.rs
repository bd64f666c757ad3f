//! Worker thread owning the async runtime that talks to the backend.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use wizard_core::{connect_backend, BackendSettings, SubmissionCoordinator};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: BackendSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Démarrage du service d'envoi...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "Le service d'envoi n'a pas pu démarrer: {err}"
                )));
                return;
            }
        };

        let coordinator =
            SubmissionCoordinator::from_settings(connect_backend(&settings), &settings);
        let ready = if settings.is_configured() {
            "Service d'inscription prêt".to_string()
        } else {
            "Service d'inscription non configuré (clés Supabase manquantes)".to_string()
        };
        let _ = ui_tx.try_send(UiEvent::Info(ready));

        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend worker picked up command");
            match cmd {
                BackendCommand::Submit { draft } => {
                    let outcome = runtime.block_on(coordinator.submit(&draft));
                    if ui_tx.send(UiEvent::SubmissionFinished(outcome)).is_err() {
                        tracing::warn!("ui event channel closed; stopping backend worker");
                        break;
                    }
                }
            }
        }
    });
}
