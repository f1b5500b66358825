//! # Settings Provisioner
//!
//! Caricamento una-tantum dei profili di impostazioni richiesti prima di
//! qualsiasi export/import.
//!
//! ## Responsabilità:
//! - Invia un `LoadSetting` per ogni profilo del flavor, con il nome sostituito nel template
//! - Tratta lo status `AlreadyExists` come successo (il profilo persiste lato server)
//! - Registra ogni altro errore per profilo senza interrompere gli altri
//! - Garantisce che chiamanti concorrenti eseguano il provisioning una sola volta
//!
//! ## Concorrenza:
//! Il check-and-set del flag e le chiamate di provisioning sono un'unica sezione
//! "run-once" (`tokio::sync::OnceCell`): il primo chiamante esegue, gli altri
//! attendono lo stesso risultato. Nessun retry automatico nella stessa sessione.

use crate::host::Host;
use crate::profiles::{profiles_for, Flavor, ProfileRole, SettingProfile};
use crate::rpc::{LoadSettingRequest, McapiClient, StatusKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

/// Result of loading one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    pub role: ProfileRole,
    pub name: &'static str,
    pub success: bool,
}

/// Aggregated per-profile results of one provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub flavor: Flavor,
    pub outcomes: Vec<ProfileOutcome>,
}

impl ProvisionReport {
    pub fn succeeded(&self, role: ProfileRole) -> bool {
        self.outcomes.iter().any(|o| o.role == role && o.success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

pub struct SettingsProvisioner {
    client: Arc<dyn McapiClient>,
    host: Arc<dyn Host>,
    video: OnceCell<ProvisionReport>,
    audio: OnceCell<ProvisionReport>,
    attempted: [AtomicBool; 2],
}

impl SettingsProvisioner {
    pub fn new(client: Arc<dyn McapiClient>, host: Arc<dyn Host>) -> Self {
        Self {
            client,
            host,
            video: OnceCell::new(),
            audio: OnceCell::new(),
            attempted: [AtomicBool::new(false), AtomicBool::new(false)],
        }
    }

    fn slot(&self, flavor: Flavor) -> (&OnceCell<ProvisionReport>, &AtomicBool) {
        match flavor {
            Flavor::Video => (&self.video, &self.attempted[0]),
            Flavor::Audio => (&self.audio, &self.attempted[1]),
        }
    }

    /// True once provisioning for `flavor` has been entered, whatever its outcome
    pub fn is_ready(&self, flavor: Flavor) -> bool {
        self.slot(flavor).1.load(Ordering::Acquire)
    }

    /// Loads the profiles of `flavor` the first time it is called; every other
    /// call, concurrent or later, gets the report of that first run
    pub async fn ensure_ready(&self, flavor: Flavor) -> ProvisionReport {
        let (cell, attempted) = self.slot(flavor);
        cell.get_or_init(|| async move {
            attempted.store(true, Ordering::Release);
            debug!("setting guard now true");
            self.provision(flavor).await
        })
        .await
        .clone()
    }

    async fn provision(&self, flavor: Flavor) -> ProvisionReport {
        let mut outcomes = Vec::new();

        for profile in profiles_for(flavor) {
            debug!("Creating {} settings...", profile.role.label());
            let success = self.load(profile).await;
            if success {
                debug!("{} settings loaded successfully: {}", profile.role.label(), profile.name);
            } else {
                error!("Error loading {} settings: {}", profile.role.label(), profile.name);
            }
            outcomes.push(ProfileOutcome {
                role: profile.role,
                name: profile.name,
                success,
            });
        }

        let report = ProvisionReport { flavor, outcomes };
        if report.all_succeeded() {
            info!("Settings created successfully ({:?})", flavor);
        }
        report
    }

    async fn load(&self, profile: &SettingProfile) -> bool {
        debug!(
            "Loading setting: {} with uniqueId: {}",
            profile.name, profile.unique_id
        );
        let request = LoadSettingRequest {
            unique_id: profile.unique_id,
            name: profile.name.to_string(),
            xml_setting: profile.render(),
        };

        match self.client.load_setting(request, &self.host.metadata()).await {
            Ok(()) => {
                debug!("Setting loaded successfully: {}", profile.name);
                true
            }
            Err(status) if status.kind() == StatusKind::AlreadyExists => {
                debug!("Setting already exists: {}", profile.name);
                true
            }
            Err(status) => {
                error!(
                    "Unexpected error: {}, settingsName = {}",
                    status, profile.name
                );
                false
            }
        }
    }
}
