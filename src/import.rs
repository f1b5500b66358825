//! # Import Dispatcher
//!
//! Importa l'artefatto esportato nel bin di destinazione.
//!
//! ## Flusso:
//! 1. `OpenBin` con il nome fisso del bin
//! 2. Se l'apertura fallisce, `CreateBin` nel container di default
//! 3. Se anche la creazione fallisce: `BinCreationFailed`, nessun import
//! 4. `ImportFile` con il path e il profilo di import caricato
//!
//! Gli errori di `ImportFile` vengono solo loggati: l'artefatto resta su disco.

use crate::error::BridgeError;
use crate::host::Host;
use crate::rpc::{CreateBinRequest, ImportFileRequest, McapiClient, OpenBinOption};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ImportDispatcher {
    client: Arc<dyn McapiClient>,
    host: Arc<dyn Host>,
    bin_name: String,
    import_settings_name: String,
}

impl ImportDispatcher {
    pub fn new(
        client: Arc<dyn McapiClient>,
        host: Arc<dyn Host>,
        bin_name: impl Into<String>,
        import_settings_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            host,
            bin_name: bin_name.into(),
            import_settings_name: import_settings_name.into(),
        }
    }

    /// Imports `file_path` into the destination bin, creating the bin if needed
    pub async fn import_into(&self, file_path: &str) -> Result<(), BridgeError> {
        debug!("Importing file into bin: {}", file_path);
        self.ensure_bin().await?;

        let request = ImportFileRequest {
            file_path: file_path.to_string(),
            import_settings_name: self.import_settings_name.clone(),
            destination_bin: self.bin_name.clone(),
        };
        debug!("Importing file: {} into bin: {}", file_path, self.bin_name);

        match self.client.import_file(request, &self.host.metadata()).await {
            Ok(()) => {
                info!("File import submitted successfully: {}", file_path);
                self.host
                    .set_status(&format!("Status: Import submitted - {}", file_path));
                Ok(())
            }
            Err(status) => {
                error!("Error importing file: {}", status);
                self.host
                    .set_status(&format!("Error: Import failed - {}", status.message));
                Err(status.into())
            }
        }
    }

    async fn ensure_bin(&self) -> Result<(), BridgeError> {
        let md = self.host.metadata();

        match self.client.open_bin(&self.bin_name, &md).await {
            Ok(()) => {
                debug!("Bin opened successfully.");
                return Ok(());
            }
            Err(status) => {
                debug!("Bin does not exist, creating it. {} ({})", self.bin_name, status);
            }
        }

        let request = CreateBinRequest {
            bin_name: self.bin_name.clone(),
            folder_path: String::new(),
            option: OpenBinOption::LastActiveBinContainer,
        };

        self.client.create_bin(request, &md).await.map_err(|status| {
            error!("Error creating bin: {}", status);
            self.host.set_status("Error: Failed to create bin");
            BridgeError::BinCreationFailed(format!("{}: {}", self.bin_name, status))
        })?;

        debug!("Bin created successfully, importing file.");
        Ok(())
    }
}
