//! # Task Path Registry
//!
//! Correlazione in memoria tra l'identificativo del task restituito da
//! ExportFile e il path dell'artefatto scelto al momento della submission.
//! La notifica di completamento arriva su un canale separato: il path viene
//! recuperato da qui, non da closure catturate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// What a lookup does with the entry it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryPolicy {
    /// Remove on first lookup; a task id is consumed at most once
    #[default]
    Evict,
    /// Keep entries for the life of the process
    Retain,
}

/// Maps task ids to destination artifact paths
#[derive(Debug, Default)]
pub struct TaskPathRegistry {
    policy: RegistryPolicy,
    entries: Mutex<HashMap<String, String>>,
}

impl TaskPathRegistry {
    pub fn new(policy: RegistryPolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn register(&self, task_id: &str, path: &str) {
        debug!("registerTaskPath: taskId: {}, path: {}", task_id, path);
        self.entries
            .lock()
            .await
            .insert(task_id.to_string(), path.to_string());
    }

    /// Registered path for `task_id`, applying the eviction policy
    pub async fn resolve(&self, task_id: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let result = match self.policy {
            RegistryPolicy::Evict => entries.remove(task_id),
            RegistryPolicy::Retain => entries.get(task_id).cloned(),
        };
        debug!("getPathByTaskId: taskId: {}, path: {:?}", task_id, result);
        result
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_evict_consumes_once() {
        let registry = TaskPathRegistry::new(RegistryPolicy::Evict);
        registry.register("t1", "D:/out/a.wav").await;

        assert_eq!(registry.resolve("t1").await.as_deref(), Some("D:/out/a.wav"));
        assert_eq!(registry.resolve("t1").await, None);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_retain_keeps_entry() {
        let registry = TaskPathRegistry::new(RegistryPolicy::Retain);
        registry.register("t1", "D:/out/a.wav").await;

        assert_eq!(registry.resolve("t1").await.as_deref(), Some("D:/out/a.wav"));
        assert_eq!(registry.resolve("t1").await.as_deref(), Some("D:/out/a.wav"));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_task_misses() {
        let registry = TaskPathRegistry::default();
        assert_eq!(registry.resolve("never").await, None);
    }
}
