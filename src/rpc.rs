//! # RPC Client Seam
//!
//! Tipi di messaggio e trait del client RPC verso il gateway di Media Composer.
//! Il trasporto reale (client generato) vive fuori da questo crate: qui c'è solo
//! la forma delle chiamate che la pipeline usa.
//!
//! ## Chiamate:
//! - `LoadSetting`: carica un profilo di impostazioni (import/export)
//! - `GetViewerMobs`: elenco dei viewer slot con il mob caricato
//! - `GetMobInfo`: stream di colonne `{columnName, columnValue}` per un mob
//! - `ExportFile`: avvia un export, risponde con l'header del task
//! - `OpenBin` / `CreateBin` / `ImportFile`: gestione del bin di destinazione
//!
//! Ogni chiamata riceve l'envelope `Metadata { access_token }`.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status code the gateway returns when a setting with the same unique id is already loaded
pub const ALREADY_EXISTS: i32 = 2;

/// Status code the gateway uses for an export that lost data on the way
pub const DATA_LOSS: i32 = 3;

/// Named interpretation of the numeric status codes this bridge reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    AlreadyExists,
    DataLoss,
    Other,
}

/// Transport-level failure of an RPC call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcStatus {
    pub code: i32,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self.code {
            ALREADY_EXISTS => StatusKind::AlreadyExists,
            DATA_LOSS => StatusKind::DataLoss,
            _ => StatusKind::Other,
        }
    }
}

impl std::fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code = {}, message = \"{}\"", self.code, self.message)
    }
}

/// Envelope attached to every outbound call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl Metadata {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSettingRequest {
    pub unique_id: Uuid,
    pub name: String,
    pub xml_setting: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerType {
    Source,
    Record,
    Popup,
    Center,
}

/// One viewer slot as reported by `GetViewerMobs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerMob {
    pub mob_id: String,
    pub view_type: ViewerType,
    pub current_frame: i64,
    pub current_timecode: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMobInfoRequest {
    pub mob_id: String,
    pub only_visible_columns: bool,
    pub includes_empty_columns: bool,
}

/// One streamed bin column of a mob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobColumn {
    pub column_name: String,
    pub column_value: String,
}

impl MobColumn {
    pub fn new(column_name: impl Into<String>, column_value: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_value: column_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFileRequest {
    pub mob_id: String,
    pub export_settings_name: String,
    pub destination_path: String,
    /// Sub-directory under `destination_path`; always empty here
    pub in_directory: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHeader {
    pub task_id: String,
    pub status: String,
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportFileResponse {
    pub header: Option<TaskHeader>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenBinOption {
    LastActiveBinContainer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBinRequest {
    pub bin_name: String,
    pub folder_path: String,
    pub option: OpenBinOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFileRequest {
    pub file_path: String,
    pub import_settings_name: String,
    pub destination_bin: String,
}

/// Stream of bin columns; ends with `None` or an `Err` item
pub type MobInfoStream = BoxStream<'static, Result<MobColumn, RpcStatus>>;

/// Client for the Media Composer gateway
#[async_trait]
pub trait McapiClient: Send + Sync {
    async fn load_setting(&self, request: LoadSettingRequest, md: &Metadata) -> Result<(), RpcStatus>;

    async fn get_viewer_mobs(&self, md: &Metadata) -> Result<Vec<ViewerMob>, RpcStatus>;

    fn get_mob_info(&self, request: GetMobInfoRequest, md: &Metadata) -> MobInfoStream;

    /// A domain failure comes back as a status whose message is the JSON body
    /// `{"ErrorType": .., "ErrorMessage": ..}`. Implementations render
    /// `ErrorType` as the `CommandErrorType` variant name
    /// (e.g. `"MC_EXPORTSETTINGSNOTFOUND"`), not its wire number.
    async fn export_file(
        &self,
        request: ExportFileRequest,
        md: &Metadata,
    ) -> Result<ExportFileResponse, RpcStatus>;

    async fn open_bin(&self, bin_path: &str, md: &Metadata) -> Result<(), RpcStatus>;

    async fn create_bin(&self, request: CreateBinRequest, md: &Metadata) -> Result<(), RpcStatus>;

    async fn import_file(&self, request: ImportFileRequest, md: &Metadata) -> Result<(), RpcStatus>;
}
