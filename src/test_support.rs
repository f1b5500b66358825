//! Scripted collaborators for unit tests: a gateway client that answers from
//! tables and records every call, and a host that records escalations and
//! status lines.

use crate::host::Host;
use crate::rpc::{
    CreateBinRequest, ExportFileRequest, ExportFileResponse, GetMobInfoRequest, ImportFileRequest,
    LoadSettingRequest, McapiClient, Metadata, MobColumn, MobInfoStream, RpcStatus, TaskHeader,
    ViewerMob, ViewerType,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedClient {
    pub load_results: Mutex<HashMap<String, RpcStatus>>,
    pub viewer_mobs: Mutex<Option<Result<Vec<ViewerMob>, RpcStatus>>>,
    pub mob_columns: Mutex<HashMap<String, Vec<Result<MobColumn, RpcStatus>>>>,
    pub export_results: Mutex<HashMap<String, Result<ExportFileResponse, RpcStatus>>>,
    pub open_bin_error: Mutex<Option<RpcStatus>>,
    pub create_bin_error: Mutex<Option<RpcStatus>>,
    pub import_error: Mutex<Option<RpcStatus>>,

    pub load_calls: Mutex<Vec<LoadSettingRequest>>,
    pub mob_info_calls: Mutex<Vec<GetMobInfoRequest>>,
    pub export_calls: Mutex<Vec<ExportFileRequest>>,
    pub open_bin_calls: Mutex<Vec<String>>,
    pub create_bin_calls: Mutex<Vec<CreateBinRequest>>,
    pub import_calls: Mutex<Vec<ImportFileRequest>>,
    pub tokens: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_load(&self, name: &str, status: RpcStatus) {
        self.load_results.lock().unwrap().insert(name.to_string(), status);
    }

    pub fn set_viewers(&self, viewers: Vec<(&str, ViewerType)>) {
        let mobs = viewers
            .into_iter()
            .map(|(id, view_type)| ViewerMob {
                mob_id: id.to_string(),
                view_type,
                current_frame: 0,
                current_timecode: "00:00:00:00".to_string(),
            })
            .collect();
        *self.viewer_mobs.lock().unwrap() = Some(Ok(mobs));
    }

    pub fn set_columns(&self, mob_id: &str, items: Vec<Result<MobColumn, RpcStatus>>) {
        self.mob_columns.lock().unwrap().insert(mob_id.to_string(), items);
    }

    pub fn set_task(&self, mob_id: &str, task_id: &str) {
        self.set_export(
            mob_id,
            Ok(ExportFileResponse {
                header: Some(TaskHeader {
                    task_id: task_id.to_string(),
                    status: "Submitted".to_string(),
                    progress: 0,
                }),
            }),
        );
    }

    pub fn set_export(&self, mob_id: &str, result: Result<ExportFileResponse, RpcStatus>) {
        self.export_results.lock().unwrap().insert(mob_id.to_string(), result);
    }

    fn record_token(&self, md: &Metadata) {
        self.tokens.lock().unwrap().push(md.access_token.clone());
    }
}

#[async_trait]
impl McapiClient for ScriptedClient {
    async fn load_setting(&self, request: LoadSettingRequest, md: &Metadata) -> Result<(), RpcStatus> {
        self.record_token(md);
        let name = request.name.clone();
        self.load_calls.lock().unwrap().push(request);
        // let concurrent callers interleave at the call boundary
        tokio::task::yield_now().await;
        match self.load_results.lock().unwrap().get(&name) {
            Some(status) => Err(status.clone()),
            None => Ok(()),
        }
    }

    async fn get_viewer_mobs(&self, md: &Metadata) -> Result<Vec<ViewerMob>, RpcStatus> {
        self.record_token(md);
        self.viewer_mobs
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn get_mob_info(&self, request: GetMobInfoRequest, md: &Metadata) -> MobInfoStream {
        self.record_token(md);
        let items = self
            .mob_columns
            .lock()
            .unwrap()
            .get(&request.mob_id)
            .cloned()
            .unwrap_or_default();
        self.mob_info_calls.lock().unwrap().push(request);
        stream::iter(items).boxed()
    }

    async fn export_file(
        &self,
        request: ExportFileRequest,
        md: &Metadata,
    ) -> Result<ExportFileResponse, RpcStatus> {
        self.record_token(md);
        let mob_id = request.mob_id.clone();
        self.export_calls.lock().unwrap().push(request);
        tokio::task::yield_now().await;
        self.export_results
            .lock()
            .unwrap()
            .get(&mob_id)
            .cloned()
            .unwrap_or_else(|| {
                Ok(ExportFileResponse {
                    header: Some(TaskHeader {
                        task_id: format!("task-{}", mob_id),
                        status: "Submitted".to_string(),
                        progress: 0,
                    }),
                })
            })
    }

    async fn open_bin(&self, bin_path: &str, md: &Metadata) -> Result<(), RpcStatus> {
        self.record_token(md);
        self.open_bin_calls.lock().unwrap().push(bin_path.to_string());
        match self.open_bin_error.lock().unwrap().clone() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    async fn create_bin(&self, request: CreateBinRequest, md: &Metadata) -> Result<(), RpcStatus> {
        self.record_token(md);
        self.create_bin_calls.lock().unwrap().push(request);
        match self.create_bin_error.lock().unwrap().clone() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    async fn import_file(&self, request: ImportFileRequest, md: &Metadata) -> Result<(), RpcStatus> {
        self.record_token(md);
        self.import_calls.lock().unwrap().push(request);
        match self.import_error.lock().unwrap().clone() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub reports: Mutex<Vec<(i32, String)>>,
    pub statuses: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(i32, String)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().unwrap().last().cloned()
    }
}

impl Host for RecordingHost {
    fn access_token(&self) -> String {
        "test-token".to_string()
    }

    fn report_error(&self, code: i32, message: &str) {
        self.reports.lock().unwrap().push((code, message.to_string()));
    }

    fn set_status(&self, text: &str) {
        self.statuses.lock().unwrap().push(text.to_string());
    }
}
