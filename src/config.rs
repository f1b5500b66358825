//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione del bridge.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri di deployment
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `gateway_address`: indirizzo del gateway RPC (default: "localhost:50051")
//! - `flavor`: set di profili da caricare, video o audio (default: video)
//! - `export_directory`: directory di destinazione degli export (default: "D:/DND-POC")
//! - `bin_name`: bin in cui importare gli artefatti (default: "ESION processed.avb")
//! - `export_extension`: estensione dell'artefatto, se diversa da quella del flavor
//! - `registry_policy`: rimozione o conservazione delle correlazioni task → path
//! - `log_level`: livello di log (trace, debug, info, warn, error)
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     flavor: Flavor::Audio,
//!     export_directory: "E:/exports".to_string(),
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::profiles::Flavor;
use crate::registry::RegistryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the export/import bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the Media Composer RPC gateway
    pub gateway_address: String,
    /// Deployment flavor (profile set and artifact container)
    pub flavor: Flavor,
    /// Directory the exports are written to
    pub export_directory: String,
    /// Bin the exported artifacts are imported into
    pub bin_name: String,
    /// Artifact extension without the dot (None = flavor default)
    pub export_extension: Option<String>,
    /// What happens to a task correlation once it has been looked up
    pub registry_policy: RegistryPolicy,
    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_address: "localhost:50051".to_string(),
            flavor: Flavor::Video,
            export_directory: "D:/DND-POC".to_string(),
            bin_name: "ESION processed.avb".to_string(),
            export_extension: None,
            registry_policy: RegistryPolicy::Evict,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.gateway_address.trim().is_empty() {
            return Err(anyhow::anyhow!("Gateway address must not be empty"));
        }

        if self.export_directory.trim().is_empty() {
            return Err(anyhow::anyhow!("Export directory must not be empty"));
        }

        if self.bin_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Bin name must not be empty"));
        }

        if let Some(ref ext) = self.export_extension {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(anyhow::anyhow!(
                    "Export extension must be non-empty and without a leading dot: {:?}",
                    ext
                ));
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of {}: {}",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    /// Extension appended to the registered artifact path
    pub fn artifact_extension(&self) -> &str {
        self.artifact_extension_for(self.flavor)
    }

    /// Same as `artifact_extension`, for a flavor selected after startup
    pub fn artifact_extension_for(&self, flavor: Flavor) -> &str {
        self.export_extension
            .as_deref()
            .unwrap_or_else(|| flavor.default_extension())
    }

    /// Default config location: `~/.mcapi-bridge/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".mcapi-bridge");
        Ok(dir.join("config.json"))
    }

    /// Load configuration from file
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.bin_name = "  ".to_string();
        assert!(config.validate().is_err());

        config.bin_name = "ESION processed.avb".to_string();
        config.export_extension = Some(".wav".to_string());
        assert!(config.validate().is_err());

        config.export_extension = Some("wav".to_string());
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.export_directory, "D:/DND-POC");
        assert_eq!(config.bin_name, "ESION processed.avb");
        assert_eq!(config.flavor, Flavor::Video);
        assert_eq!(config.registry_policy, RegistryPolicy::Evict);
        assert_eq!(config.artifact_extension(), "mxf");
    }

    #[test]
    fn test_extension_override() {
        let config = Config {
            flavor: Flavor::Audio,
            ..Default::default()
        };
        assert_eq!(config.artifact_extension(), "wav");

        let config = Config {
            export_extension: Some("mov".to_string()),
            ..config
        };
        assert_eq!(config.artifact_extension(), "mov");
        assert_eq!(config.artifact_extension_for(Flavor::Video), "mov");
    }

    #[test]
    fn test_extension_follows_requested_flavor() {
        let config = Config::default();
        assert_eq!(config.artifact_extension_for(Flavor::Audio), "wav");
        assert_eq!(config.artifact_extension_for(Flavor::Video), "mxf");
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let original_config = Config {
            flavor: Flavor::Audio,
            export_directory: "E:/renders".to_string(),
            registry_policy: RegistryPolicy::Retain,
            log_level: "debug".to_string(),
            ..Default::default()
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config, original_config);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, r#"{"flavor":"audio"}"#).await.unwrap();

        let loaded = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded.flavor, Flavor::Audio);
        assert_eq!(loaded.bin_name, "ESION processed.avb");
    }

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::from_file(&temp_dir.path().join("absent.json")).await.unwrap();
        assert_eq!(loaded, Config::default());
    }
}
