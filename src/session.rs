//! # Session State
//!
//! Stato condiviso per la durata del processo: flavor di export selezionato,
//! override del nome di export digitato nel pannello e directory di
//! destinazione. Il flag "settings provisioned" vive nel `SettingsProvisioner`.

use crate::profiles::Flavor;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct SessionState {
    flavor: Mutex<Flavor>,
    export_name: Mutex<Option<String>>,
    export_directory: Mutex<String>,
}

impl SessionState {
    pub fn new(flavor: Flavor, export_directory: impl Into<String>) -> Self {
        Self {
            flavor: Mutex::new(flavor),
            export_name: Mutex::new(None),
            export_directory: Mutex::new(export_directory.into()),
        }
    }

    pub async fn flavor(&self) -> Flavor {
        *self.flavor.lock().await
    }

    pub async fn set_flavor(&self, flavor: Flavor) {
        *self.flavor.lock().await = flavor;
    }

    /// Sets the name used for every following export; blank text clears it
    pub async fn set_export_name(&self, name: &str) {
        let name = name.trim();
        debug!("Export name override: {:?}", name);
        *self.export_name.lock().await = (!name.is_empty()).then(|| name.to_string());
    }

    pub async fn clear_export_name(&self) {
        *self.export_name.lock().await = None;
    }

    pub async fn export_name(&self) -> Option<String> {
        self.export_name.lock().await.clone()
    }

    /// Override if one is pending, otherwise `streamed`
    pub async fn effective_name(&self, streamed: String) -> String {
        self.export_name().await.unwrap_or(streamed)
    }

    pub async fn export_directory(&self) -> String {
        self.export_directory.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_override_is_sticky_until_cleared() {
        let session = SessionState::new(Flavor::Video, "D:/DND-POC");
        assert_eq!(session.effective_name("Clip A".into()).await, "Clip A");

        session.set_export_name("  Final Mix ").await;
        assert_eq!(session.effective_name("Clip A".into()).await, "Final Mix");
        assert_eq!(session.effective_name("Clip B".into()).await, "Final Mix");

        session.clear_export_name().await;
        assert_eq!(session.effective_name("Clip B".into()).await, "Clip B");
    }

    #[tokio::test]
    async fn test_blank_override_clears() {
        let session = SessionState::new(Flavor::Audio, "D:/out");
        session.set_export_name("Take 2").await;
        session.set_export_name("   ").await;
        assert_eq!(session.export_name().await, None);
    }
}
