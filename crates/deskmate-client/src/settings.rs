//! Settings sink: where received configuration snapshots land.
//!
//! The client never owns a process-wide settings store. Whoever constructs
//! the client hands it a sink; the client writes snapshots it receives from
//! the runtime into it and reads the current one back when pushing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use deskmate_core::protocol::ConfigSettings;

#[async_trait]
pub trait SettingsSink: Send + Sync {
    /// Current snapshot.
    async fn snapshot(&self) -> ConfigSettings;
    /// Replace the snapshot with one received from the runtime.
    async fn apply(&self, settings: ConfigSettings);
}

/// In-memory sink, for tests and for frontends that keep settings in their
/// own state layer.
#[derive(Default)]
pub struct MemorySettings {
    inner: RwLock<ConfigSettings>,
}

impl MemorySettings {
    pub fn new(initial: ConfigSettings) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }
}

#[async_trait]
impl SettingsSink for MemorySettings {
    async fn snapshot(&self) -> ConfigSettings {
        self.inner.read().await.clone()
    }

    async fn apply(&self, settings: ConfigSettings) {
        *self.inner.write().await = settings;
    }
}
