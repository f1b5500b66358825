//! # Bridge Pipeline
//!
//! Orchestratore principale che collega i componenti attorno a un'unica
//! `SessionState`.
//!
//! ## Flusso:
//! 1. Evento UI o drop → `SettingsProvisioner::ensure_ready`
//! 2. Risoluzione dell'asset (viewer record o payload del drop)
//! 3. Nome di export dallo stream dei metadata (o override della sessione)
//! 4. `ExportDispatcher::submit` registra task → path
//! 5. Più tardi, fuori banda: `CompletionReactor` → `ImportDispatcher`
//!
//! ## Concorrenza:
//! Gli asset di un drop partono in ordine di input e vengono portati avanti
//! insieme sullo stesso task (`join_all`), senza spawn. Il fallimento di un
//! asset non tocca gli altri; i completamenti possono arrivare in qualsiasi ordine.

use crate::config::Config;
use crate::error::BridgeError;
use crate::export::{ExportDispatcher, ExportJob};
use crate::host::Host;
use crate::import::ImportDispatcher;
use crate::metadata;
use crate::profiles::{profile_name, ProfileRole};
use crate::provisioner::{ProvisionReport, SettingsProvisioner};
use crate::reactor::{CompletionOutcome, CompletionReactor};
use crate::registry::TaskPathRegistry;
use crate::rpc::McapiClient;
use crate::selection::{self, DropTransfer, DroppedAsset};
use crate::session::SessionState;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Per-asset result of a pipeline run: the task id the export was accepted under
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOutcome {
    pub asset_id: String,
    pub export_name: String,
    pub result: Result<String, BridgeError>,
}

pub struct Bridge {
    config: Config,
    client: Arc<dyn McapiClient>,
    host: Arc<dyn Host>,
    session: SessionState,
    provisioner: SettingsProvisioner,
    registry: Arc<TaskPathRegistry>,
    exporter: ExportDispatcher,
    reactor: CompletionReactor,
}

impl Bridge {
    pub fn new(config: Config, client: Arc<dyn McapiClient>, host: Arc<dyn Host>) -> Self {
        let session = SessionState::new(config.flavor, config.export_directory.clone());
        let provisioner = SettingsProvisioner::new(client.clone(), host.clone());
        let registry = Arc::new(TaskPathRegistry::new(config.registry_policy));
        let exporter = ExportDispatcher::new(client.clone(), host.clone(), registry.clone());
        // the import profile is shared by both flavors
        let importer = Arc::new(ImportDispatcher::new(
            client.clone(),
            host.clone(),
            config.bin_name.clone(),
            profile_name(config.flavor, ProfileRole::Import),
        ));
        let reactor = CompletionReactor::new(registry.clone(), importer, host.clone());

        Self {
            config,
            client,
            host,
            session,
            provisioner,
            registry,
            exporter,
            reactor,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn registry(&self) -> &TaskPathRegistry {
        &self.registry
    }

    /// Provisions the profiles of the currently selected flavor
    pub async fn ensure_ready(&self) -> ProvisionReport {
        let flavor = self.session.flavor().await;
        self.provisioner.ensure_ready(flavor).await
    }

    /// Text typed in the panel; names every following export
    pub async fn set_export_name(&self, text: &str) {
        self.session.set_export_name(text).await;
        self.host.set_status(&format!("Processing: {}", text.trim()));
    }

    pub async fn clear_export_name(&self) {
        self.session.clear_export_name().await;
    }

    /// Exports every asset of a drop; a malformed payload aborts the whole batch
    pub async fn handle_drop(&self, transfer: &DropTransfer) -> Result<Vec<AssetOutcome>, BridgeError> {
        let assets = selection::resolve_drop(transfer).map_err(|e| {
            error!("{}", e);
            self.host.set_status("Error: Dropped item format not recognized");
            e
        })?;

        self.ensure_ready().await;
        info!("Processing {} dropped asset(s)", assets.len());

        let outcomes = join_all(assets.iter().map(|asset| self.export_dropped(asset))).await;
        Ok(outcomes)
    }

    /// Exports the sequence loaded in the record viewer
    pub async fn submit_active_sequence(&self) -> Result<AssetOutcome, BridgeError> {
        info!("Sending active sequence...");
        self.host.set_status("Processing: Creating settings...");
        self.ensure_ready().await;

        self.host.set_status("Processing: Getting sequence ID...");
        let mob_id = selection::resolve_active(self.client.as_ref(), self.host.as_ref())
            .await
            .map_err(|e| {
                error!("Error getting active sequence ID: {}", e);
                self.host.set_status("Error: Failed to get sequence ID");
                e
            })?;

        info!("Exporting sequence: {}", mob_id);
        self.host
            .set_status(&format!("Processing: Exporting sequence {}", mob_id));
        Ok(self.export_asset(&mob_id, "sequence").await)
    }

    /// Host event channel; only export completions lead anywhere
    pub async fn on_host_event(&self, event_name: &str, event_data: &str) -> Result<CompletionOutcome, BridgeError> {
        self.reactor.on_event(event_name, event_data).await
    }

    async fn export_dropped(&self, asset: &DroppedAsset) -> AssetOutcome {
        self.export_asset(&asset.id, &asset.kind).await
    }

    async fn export_asset(&self, asset_id: &str, kind: &str) -> AssetOutcome {
        let streamed = metadata::name_for(self.client.as_ref(), self.host.as_ref(), asset_id).await;
        let export_name = self.session.effective_name(streamed).await;
        info!("Export fileName: {}", export_name);

        let job = ExportJob {
            asset_id: asset_id.to_string(),
            kind: kind.to_string(),
            destination_directory: self.session.export_directory().await,
            base_name: export_name.clone(),
        };
        let flavor = self.session.flavor().await;
        let result = self
            .exporter
            .submit(&job, flavor, self.config.artifact_extension_for(flavor))
            .await;

        AssetOutcome {
            asset_id: asset_id.to_string(),
            export_name,
            result,
        }
    }
}
