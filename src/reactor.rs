//! # Completion Reactor
//!
//! Listener degli eventi host. Alla notifica `ExportFileFinished` risolve il
//! path reale tramite il `TaskPathRegistry` e avvia l'import.
//!
//! ## Stati di un task:
//! `Submitted → Succeeded | Failed`, entrambi terminali.
//!
//! ## Regole:
//! - `errorCode == 0`: il path registrato ha precedenza su quello riportato dall'host
//! - task id sconosciuto o già consumato: si usa il path riportato così com'è
//! - altrimenti: il fallimento viene mostrato, nessun import
//! - in entrambi i casi la correlazione viene consumata secondo la policy del registry

use crate::error::BridgeError;
use crate::host::Host;
use crate::import::ImportDispatcher;
use crate::registry::TaskPathRegistry;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EXPORT_FILE_FINISHED: &str = "ExportFileFinished";

/// `CommandErrorType.NOERROR`
pub const NO_ERROR: i32 = 0;

/// Payload of the `ExportFileFinished` host event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFinished {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub export_path: String,
    #[serde(default)]
    pub error_string: String,
    pub error_code: i32,
}

/// What handling one host event led to
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Not an event this bridge listens to
    Ignored,
    Imported { path: String },
    ImportFailed { path: String, error: BridgeError },
    ExportFailed { error_code: i32, message: String },
}

pub struct CompletionReactor {
    registry: Arc<TaskPathRegistry>,
    importer: Arc<ImportDispatcher>,
    host: Arc<dyn Host>,
}

impl CompletionReactor {
    pub fn new(registry: Arc<TaskPathRegistry>, importer: Arc<ImportDispatcher>, host: Arc<dyn Host>) -> Self {
        Self {
            registry,
            importer,
            host,
        }
    }

    /// Entry point for every host event
    pub async fn on_event(&self, event_name: &str, event_data: &str) -> Result<CompletionOutcome, BridgeError> {
        info!("Event received: {}", event_name);
        if event_name != EXPORT_FILE_FINISHED {
            return Ok(CompletionOutcome::Ignored);
        }

        let notification: ExportFinished = serde_json::from_str(event_data).map_err(|e| {
            warn!("Malformed {} payload: {}", EXPORT_FILE_FINISHED, e);
            BridgeError::InvalidEvent(e.to_string())
        })?;
        debug!("jsonData.taskId: {}", notification.task_id);
        Ok(self.on_export_finished(notification).await)
    }

    pub async fn on_export_finished(&self, notification: ExportFinished) -> CompletionOutcome {
        // consumed on every terminal state so failed tasks don't linger
        let registered = self.registry.resolve(&notification.task_id).await;

        if notification.error_code != NO_ERROR {
            warn!(
                "Export error: Unexpected error: ErrorType = {}, message = \"{}\"",
                notification.error_code, notification.error_string
            );
            self.host.set_status(&format!(
                "Error: Export failed - {}",
                notification.error_string
            ));
            return CompletionOutcome::ExportFailed {
                error_code: notification.error_code,
                message: notification.error_string,
            };
        }

        let path = match registered {
            Some(registered) => registered,
            None => {
                debug!(
                    "No path registered for task {}, using reported path",
                    notification.task_id
                );
                notification.export_path
            }
        };

        info!("Export file finished successfully. Path: {}", path);
        self.host
            .set_status(&format!("Success: Export completed - {}", path));
        self.host.set_status("Processing: Importing to bin...");

        match self.importer.import_into(&path).await {
            Ok(()) => CompletionOutcome::Imported { path },
            Err(error) => CompletionOutcome::ImportFailed { path, error },
        }
    }
}
