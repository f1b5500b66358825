//! # MCAPI Bridge - Main Entry Point
//!
//! Questo è il punto di ingresso della CLI di supporto del bridge.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Caricamento e validazione della configurazione
//! - Comandi offline che non richiedono un host collegato
//!
//! ## Comandi:
//! - `init-config`: scrive la configurazione di default
//! - `profiles`: elenca i profili che il provisioning caricherà
//! - `inspect-drop`: interpreta un payload di drop salvato su file
//!
//! ## Esempio di utilizzo:
//! ```bash
//! mcapi-bridge --verbose inspect-drop drop.json
//! mcapi-bridge profiles --flavor audio
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcapi_bridge::export::{artifact_path, export_role_for};
use mcapi_bridge::profiles::{profiles_for, Flavor};
use mcapi_bridge::selection::{resolve_drop, DropTransfer, ASSET_LIST_MIME_TYPE};
use mcapi_bridge::Config;

#[derive(Parser)]
#[command(name = "mcapi-bridge")]
#[command(about = "Export/import bridge between Media Composer and an external pipeline")]
struct Args {
    /// Configuration file (default: ~/.mcapi-bridge/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default configuration file
    InitConfig {
        /// Destination path (default: the configuration path)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Print the setting profiles provisioning submits
    Profiles {
        /// Profile set to print (default: the configured flavor)
        #[arg(long, value_enum)]
        flavor: Option<Flavor>,
    },

    /// Parse a saved drop payload and print the resolved assets
    InspectDrop {
        /// File holding the JSON asset list
        file: PathBuf,

        /// MIME type the payload was delivered with
        #[arg(long, default_value = ASSET_LIST_MIME_TYPE)]
        mime: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = match args.config {
        Some(ref path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::from_file(&config_path).await?;

    // Initialize logging
    let level = if args.verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::InitConfig { path } => {
            let path = path.unwrap_or(config_path);
            Config::default().save_to_file(&path).await?;
            info!("Wrote default configuration: {}", path.display());
        }
        Command::Profiles { flavor } => {
            let flavor = flavor.unwrap_or(config.flavor);
            for profile in profiles_for(flavor) {
                println!(
                    "{}  {:<22} {:<16} {} bytes",
                    profile.unique_id,
                    profile.name,
                    profile.role.label(),
                    profile.render().len()
                );
            }
        }
        Command::InspectDrop { file, mime } => {
            if !file.exists() {
                return Err(anyhow::anyhow!("Drop payload does not exist: {}", file.display()));
            }
            let data = tokio::fs::read_to_string(&file).await?;
            let transfer = DropTransfer::new().with(mime, data);
            let assets = resolve_drop(&transfer)?;

            info!("Found {} asset(s) in {}", assets.len(), file.display());
            for asset in assets {
                match export_role_for(&asset.kind) {
                    Ok(role) => println!(
                        "{}  {:<10} {} -> {}",
                        asset.id,
                        asset.kind,
                        role.label(),
                        artifact_path(&config.export_directory, &asset.id, config.artifact_extension())
                    ),
                    Err(e) => println!("{}  {:<10} {}", asset.id, asset.kind, e),
                }
            }
        }
    }

    Ok(())
}
