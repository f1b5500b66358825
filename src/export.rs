//! # Export Dispatcher
//!
//! Costruisce e invia la richiesta `ExportFile` per un asset, registra la
//! correlazione task → path e classifica l'esito della submission.
//!
//! ## Mapping media kind → profilo:
//! - `sequence` → profilo di export sequence
//! - `masterclip`, `subclip` → profilo di export clip
//! - qualsiasi altro valore → `UnknownMediaKind`, nessuna chiamata di rete
//!
//! ## Classificazione errori (due livelli):
//! 1. Il messaggio d'errore viene prima interpretato come JSON `{ErrorType, ErrorMessage}`:
//!    errore di dominio, mostrato solo localmente
//! 2. Altrimenti si classifica lo status code di trasporto (`DATA_LOSS` ha un
//!    messaggio dedicato) e l'errore viene anche segnalato all'host
//!
//! Il risultato vero dell'export arriva più tardi tramite `CompletionReactor`.

use crate::error::BridgeError;
use crate::host::Host;
use crate::profiles::{profile_name, Flavor, ProfileRole};
use crate::registry::TaskPathRegistry;
use crate::rpc::{ExportFileRequest, McapiClient, RpcStatus, StatusKind};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

/// Domain error type the gateway uses when the named export profile is not loaded;
/// `McapiClient::export_file` reports `ErrorType` by variant name
pub const EXPORT_SETTINGS_NOT_FOUND: &str = "MC_EXPORTSETTINGSNOTFOUND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Sequence,
    MasterClip,
    SubClip,
    Video,
    Audio,
}

impl FromStr for MediaKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(Self::Sequence),
            "masterclip" => Ok(Self::MasterClip),
            "subclip" => Ok(Self::SubClip),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            other => Err(BridgeError::UnknownMediaKind(other.to_string())),
        }
    }
}

impl MediaKind {
    /// Export profile role for this kind; only mobs can be exported
    pub fn export_role(&self) -> Option<ProfileRole> {
        match self {
            Self::Sequence => Some(ProfileRole::SequenceExport),
            Self::MasterClip | Self::SubClip => Some(ProfileRole::ClipExport),
            Self::Video | Self::Audio => None,
        }
    }
}

/// Resolves a media kind tag to the export profile role, or `UnknownMediaKind`
pub fn export_role_for(kind: &str) -> Result<ProfileRole, BridgeError> {
    kind.parse::<MediaKind>()?
        .export_role()
        .ok_or_else(|| BridgeError::UnknownMediaKind(kind.to_string()))
}

/// One export request, discarded once submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub asset_id: String,
    pub kind: String,
    pub destination_directory: String,
    pub base_name: String,
}

/// Path the exported artifact ends up at
pub fn artifact_path(directory: &str, base_name: &str, extension: &str) -> String {
    format!("{}/{}.{}", directory.trim_end_matches('/'), base_name, extension)
}

#[derive(Debug, Deserialize)]
struct CommandError {
    #[serde(rename = "ErrorType")]
    error_type: serde_json::Value,
    #[serde(rename = "ErrorMessage", default)]
    error_message: String,
}

/// A submission failure with the text shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFailure {
    pub error: BridgeError,
    pub user_message: String,
    /// Only transport failures are escalated to the host
    pub escalate: bool,
}

/// Structured JSON body first, transport status code as fallback
pub fn classify_export_error(status: &RpcStatus) -> ClassifiedFailure {
    if let Ok(body) = serde_json::from_str::<CommandError>(&status.message) {
        let error_type = match body.error_type {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let user_message = if error_type == EXPORT_SETTINGS_NOT_FOUND {
            "Error: Export settings not found".to_string()
        } else {
            format!("Error: {}", body.error_message)
        };
        return ClassifiedFailure {
            error: BridgeError::Domain {
                error_type,
                message: body.error_message,
            },
            user_message,
            escalate: false,
        };
    }

    let user_message = match status.kind() {
        StatusKind::DataLoss => "Error: Data loss during export".to_string(),
        _ => format!("Error: Export failed with code {}", status.code),
    };
    ClassifiedFailure {
        error: BridgeError::from(status.clone()),
        user_message,
        escalate: true,
    }
}

pub struct ExportDispatcher {
    client: Arc<dyn McapiClient>,
    host: Arc<dyn Host>,
    registry: Arc<TaskPathRegistry>,
}

impl ExportDispatcher {
    pub fn new(client: Arc<dyn McapiClient>, host: Arc<dyn Host>, registry: Arc<TaskPathRegistry>) -> Self {
        Self {
            client,
            host,
            registry,
        }
    }

    /// Submits `job`; on success the task id is registered against the
    /// artifact path and returned
    pub async fn submit(&self, job: &ExportJob, flavor: Flavor, extension: &str) -> Result<String, BridgeError> {
        debug!(
            "exportToFile: {}, mobType: {}, destinationPath: {}, fileName: {}",
            job.asset_id, job.kind, job.destination_directory, job.base_name
        );
        self.host
            .set_status(&format!("Processing: Preparing export for {}", job.base_name));

        let role = match export_role_for(&job.kind) {
            Ok(role) => role,
            Err(e) => {
                error!("Unknown mobType: {}", job.kind);
                self.host
                    .set_status(&format!("Error: Unknown media type - {}", job.kind));
                return Err(e);
            }
        };
        let settings_name = profile_name(flavor, role);

        debug!("exportSettingsName: {}", settings_name);
        self.host.set_status(&format!(
            "Processing: Exporting with {} settings...",
            settings_name
        ));

        let request = ExportFileRequest {
            mob_id: job.asset_id.clone(),
            export_settings_name: settings_name.to_string(),
            destination_path: job.destination_directory.clone(),
            in_directory: String::new(),
            file_name: job.base_name.clone(),
        };

        match self.client.export_file(request, &self.host.metadata()).await {
            Ok(response) => {
                let header = response
                    .header
                    .filter(|h| !h.task_id.is_empty())
                    .ok_or_else(|| {
                        error!("Error: Export Response header is missing or invalid.");
                        self.host
                            .set_status("Error: Export response header is missing or invalid");
                        BridgeError::InvalidResponseHeader
                    })?;

                debug!(
                    "File export request submitted successfully. taskID: {}, status: {}, progress: {}",
                    header.task_id, header.status, header.progress
                );
                let path = artifact_path(&job.destination_directory, &job.base_name, extension);
                self.registry.register(&header.task_id, &path).await;
                self.host.set_status("Status: Export started successfully");
                Ok(header.task_id)
            }
            Err(status) => {
                let failure = classify_export_error(&status);
                error!("Export error: {}", failure.error);
                self.host.set_status(&failure.user_message);
                if failure.escalate {
                    self.host.report_error(status.code, &status.message);
                }
                Err(failure.error)
            }
        }
    }
}
