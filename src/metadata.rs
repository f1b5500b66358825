//! # Asset Metadata Streamer
//!
//! Apre lo stream `GetMobInfo` per un mob e lo riduce al nome da usare per
//! l'export.
//!
//! ## Regole:
//! - Ogni record con colonna `Name` aggiorna il nome candidato (vince l'ultimo)
//! - Le altre colonne sono ignorate
//! - Un errore nello stream viene segnalato all'host e chiude la riduzione con
//!   quanto raccolto fino a quel momento
//! - Senza alcuna colonna `Name` il risultato è l'id del mob

use crate::error::BridgeError;
use crate::host::Host;
use crate::rpc::{GetMobInfoRequest, McapiClient};
use futures::StreamExt;
use tracing::{debug, error, info};

const NAME_COLUMN: &str = "Name";

/// Outcome of folding a metadata stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamedName {
    /// Last `Name` value seen, if any
    pub name: Option<String>,
    /// Set when the stream ended with an error instead of a clean end
    pub error: Option<BridgeError>,
}

impl StreamedName {
    pub fn or_id(self, mob_id: &str) -> String {
        self.name.unwrap_or_else(|| mob_id.to_string())
    }
}

/// Folds the `GetMobInfo` stream of `mob_id`; never fails
pub async fn stream_name(client: &dyn McapiClient, host: &dyn Host, mob_id: &str) -> StreamedName {
    let request = GetMobInfoRequest {
        mob_id: mob_id.to_string(),
        only_visible_columns: false,
        includes_empty_columns: false,
    };

    let mut stream = client.get_mob_info(request, &host.metadata());
    let mut name = None;

    while let Some(item) = stream.next().await {
        match item {
            Ok(column) if column.column_name == NAME_COLUMN => {
                name = Some(column.column_value);
            }
            Ok(_) => {}
            Err(status) => {
                error!("Unexpected stream error: {}", status);
                host.report_error(status.code, &status.message);
                return StreamedName {
                    name,
                    error: Some(BridgeError::Stream {
                        code: status.code,
                        message: status.message,
                    }),
                };
            }
        }
    }

    StreamedName { name, error: None }
}

/// Display name of `mob_id`, falling back to the id itself
pub async fn name_for(client: &dyn McapiClient, host: &dyn Host, mob_id: &str) -> String {
    debug!("getMobInfo: {}", mob_id);
    let name = stream_name(client, host, mob_id).await.or_id(mob_id);
    info!("Completed, mob name: {}", name);
    name
}
