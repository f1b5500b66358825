//! # Host Application Seam
//!
//! Interfaccia verso l'applicazione host che ospita il pannello: fornisce il
//! token di accesso, riceve le segnalazioni d'errore (escalation) e mostra la
//! riga di stato visibile all'utente.

use crate::rpc::Metadata;

/// Services the embedding host application exposes to the bridge
pub trait Host: Send + Sync {
    /// Access token forwarded on every RPC call
    fn access_token(&self) -> String;

    /// Escalate a failure to the host, which may never have seen the request
    fn report_error(&self, code: i32, message: &str);

    /// Replace the user-visible status line
    fn set_status(&self, text: &str);

    fn metadata(&self) -> Metadata {
        Metadata::new(self.access_token())
    }
}
