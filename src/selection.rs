//! # Active Selection Resolver
//!
//! Determina su quale asset opera la pipeline.
//!
//! ## Modalità:
//! - **Active selection**: interroga i viewer slot e prende il primo marcato `RECORD`
//! - **Drop**: interpreta il payload JSON di un drag-and-drop (lista di asset)
//!
//! ## Drop payload:
//! Array di record `{id, head, in, out, systemID, systemType, type}` consegnato
//! con uno dei due MIME type riconosciuti. Un payload malformato annulla
//! l'intero batch: nessuna elaborazione parziale.

use crate::error::BridgeError;
use crate::host::Host;
use crate::rpc::{McapiClient, ViewerType};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub const ASSET_LIST_MIME_TYPE: &str = "text/x.avid.mc-api-asset-list+json";
pub const PLUGIN_ASSET_LIST_MIME_TYPE: &str = "text/x.avid.panel-sdk-plugin-asset-list+json";

/// Mob id the host uses for "no mob"
pub const NULL_MOB_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Data carried by a drag-and-drop transfer, keyed by MIME type
#[derive(Debug, Clone, Default)]
pub struct DropTransfer {
    items: Vec<(String, String)>,
}

impl DropTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.items.push((mime_type.into(), data.into()));
        self
    }

    pub fn types(&self) -> Vec<&str> {
        self.items.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn get_data(&self, mime_type: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(t, _)| t == mime_type)
            .map(|(_, d)| d.as_str())
    }
}

/// One asset record of a drop payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedAsset {
    pub id: String,
    #[serde(default)]
    pub head: serde_json::Value,
    #[serde(rename = "in", default)]
    pub in_mark: serde_json::Value,
    #[serde(rename = "out", default)]
    pub out_mark: serde_json::Value,
    #[serde(rename = "systemID", default)]
    pub system_id: String,
    #[serde(rename = "systemType", default)]
    pub system_type: String,
    /// Media kind tag, validated at export time
    #[serde(rename = "type")]
    pub kind: String,
}

/// Id of the mob loaded in the record viewer; first one wins
pub async fn resolve_active(client: &dyn McapiClient, host: &dyn Host) -> Result<String, BridgeError> {
    debug!("submitting getViewerMobs request");
    let mobs = client.get_viewer_mobs(&host.metadata()).await.map_err(|status| {
        error!("Unexpected error: {}", status);
        host.report_error(status.code, &status.message);
        BridgeError::from(status)
    })?;

    match mobs.into_iter().find(|m| m.view_type == ViewerType::Record) {
        Some(mob) if mob.mob_id != NULL_MOB_ID => {
            debug!("Active sequence found, resolving: {}", mob.mob_id);
            Ok(mob.mob_id)
        }
        _ => {
            error!("Active sequence not found, rejecting");
            Err(BridgeError::NoActiveSelection)
        }
    }
}

/// Assets of a drop transfer, in payload order
pub fn resolve_drop(transfer: &DropTransfer) -> Result<Vec<DroppedAsset>, BridgeError> {
    debug!("Media Composer drop event detected: {:?}", transfer.types());

    let mime_type = [ASSET_LIST_MIME_TYPE, PLUGIN_ASSET_LIST_MIME_TYPE]
        .into_iter()
        .find(|m| transfer.get_data(m).is_some())
        .ok_or_else(|| {
            BridgeError::UnrecognizedDropFormat(format!("types: {:?}", transfer.types()))
        })?;

    let data = transfer.get_data(mime_type).unwrap_or_default();
    debug!("{}", data);
    parse_asset_list(data)
}

/// Parses the JSON asset list of a drop payload
pub fn parse_asset_list(data: &str) -> Result<Vec<DroppedAsset>, BridgeError> {
    let assets: Vec<DroppedAsset> = serde_json::from_str(data)
        .map_err(|e| BridgeError::UnrecognizedDropFormat(e.to_string()))?;

    for asset in &assets {
        debug!(
            "id: {}, head: {}, systemID: {}, systemType: {}, type: {}",
            asset.id, asset.head, asset.system_id, asset.system_type, asset.kind
        );
    }
    Ok(assets)
}
