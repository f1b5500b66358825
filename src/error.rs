//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom del bridge.
//!
//! ## Responsabilità:
//! - Definisce `BridgeError` enum per categorizzare gli esiti negativi di ogni stage
//! - Separa gli errori di trasporto (status code RPC) da quelli di dominio (JSON strutturato)
//! - Raggruppa gli errori di validazione (media kind, drop payload, header di risposta)
//! - Integra con `thiserror` per messaggi descrittivi
//!
//! ## Categorie di errori:
//! - `Transport`: fallimento a livello RPC con codice e messaggio
//! - `Domain`: corpo d'errore JSON `{ErrorType, ErrorMessage}` restituito da ExportFile
//! - `UnknownMediaKind`, `UnrecognizedDropFormat`, `InvalidResponseHeader`, `InvalidEvent`: validazione
//! - `NoActiveSelection`: nessun viewer "record" trovato
//! - `Stream`: stream di metadata interrotto (tollerato dal chiamante)
//! - `BinCreationFailed`: il bin di destinazione non esiste e non può essere creato
//!
//! ## Esempio:
//! ```ignore
//! if role.is_none() {
//!     return Err(BridgeError::UnknownMediaKind(kind.to_string()));
//! }
//! ```

use crate::rpc::RpcStatus;

/// Custom error types for the export/import bridge
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Transport error: code = {code}, message = \"{message}\"")]
    Transport { code: i32, message: String },

    #[error("Domain error: ErrorType = {error_type}, message = \"{message}\"")]
    Domain { error_type: String, message: String },

    #[error("Unknown media kind: {0}")]
    UnknownMediaKind(String),

    #[error("Dropped item format not recognized: {0}")]
    UnrecognizedDropFormat(String),

    #[error("Export response header is missing or invalid")]
    InvalidResponseHeader,

    #[error("Invalid host event: {0}")]
    InvalidEvent(String),

    #[error("Active sequence not found")]
    NoActiveSelection,

    #[error("Metadata stream error: code = {code}, message = \"{message}\"")]
    Stream { code: i32, message: String },

    #[error("Failed to create bin: {0}")]
    BinCreationFailed(String),
}

impl BridgeError {
    /// True for the input/response shape errors that never reach the network
    /// or that reject a response the network did return
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownMediaKind(_)
                | Self::UnrecognizedDropFormat(_)
                | Self::InvalidResponseHeader
                | Self::InvalidEvent(_)
        )
    }
}

impl From<RpcStatus> for BridgeError {
    fn from(status: RpcStatus) -> Self {
        Self::Transport {
            code: status.code,
            message: status.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_grouping() {
        assert!(BridgeError::UnknownMediaKind("video".into()).is_validation());
        assert!(BridgeError::InvalidResponseHeader.is_validation());
        assert!(!BridgeError::NoActiveSelection.is_validation());
        assert!(!BridgeError::Transport { code: 14, message: "offline".into() }.is_validation());
    }

    #[test]
    fn test_transport_from_status() {
        let err: BridgeError = RpcStatus::new(14, "unavailable").into();
        assert_eq!(
            err.to_string(),
            "Transport error: code = 14, message = \"unavailable\""
        );
    }
}
