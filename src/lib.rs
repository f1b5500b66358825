//! # MCAPI Bridge Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare del bridge export/import
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per l'host che incorpora il pannello
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tassonomia degli errori (trasporto, dominio, validazione, ...)
//! - `rpc`: Tipi di messaggio e trait del client verso il gateway
//! - `host`: Interfaccia verso l'applicazione host (token, escalation, stato)
//! - `profiles`: Tabella dei profili di impostazioni per flavor
//! - `session`: Stato di sessione (flavor, override del nome, directory)
//! - `registry`: Correlazione task id → path dell'artefatto
//! - `provisioner`: Caricamento una-tantum dei profili
//! - `selection`: Risoluzione dell'asset (viewer record o drop)
//! - `metadata`: Nome di export dallo stream dei metadata
//! - `export`: Submission dell'export e classificazione errori
//! - `reactor`: Reazione alla notifica di completamento
//! - `import`: Import dell'artefatto nel bin di destinazione
//! - `pipeline`: Orchestratore che collega tutti i componenti
//!
//! ## Utilizzo:
//! ```ignore
//! use mcapi_bridge::{Bridge, Config};
//!
//! let bridge = Bridge::new(Config::default(), client, host);
//! bridge.handle_drop(&transfer).await?;
//! bridge.on_host_event("ExportFileFinished", &event_json).await?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod import;
pub mod metadata;
pub mod pipeline;
pub mod profiles;
pub mod provisioner;
pub mod reactor;
pub mod registry;
pub mod rpc;
pub mod selection;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::BridgeError;
pub use host::Host;
pub use pipeline::{AssetOutcome, Bridge};
pub use profiles::Flavor;
pub use reactor::CompletionOutcome;
pub use registry::{RegistryPolicy, TaskPathRegistry};
pub use rpc::McapiClient;
pub use selection::DropTransfer;
