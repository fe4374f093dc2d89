use serde::Deserialize;

use deskmate_core::error::{LinkError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub connection: ConnectionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LinkError::BadConfig("version must be 1".into()));
        }
        self.connection.validate()?;
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            connection: ConnectionSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Capacity of the bounded event channels. A consumer this many events
    /// behind backpressures the socket read.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for ConnectionSection {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            user_id: default_user_id(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl ConnectionSection {
    pub fn validate(&self) -> Result<()> {
        if !self.server_url.starts_with("ws://") && !self.server_url.starts_with("wss://") {
            return Err(LinkError::BadConfig(
                "connection.server_url must start with ws:// or wss://".into(),
            ));
        }
        if self.user_id.is_empty() {
            return Err(LinkError::BadConfig(
                "connection.user_id must not be empty".into(),
            ));
        }
        if !(16..=4096).contains(&self.event_buffer) {
            return Err(LinkError::BadConfig(
                "connection.event_buffer must be between 16 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_server_url() -> String {
    "ws://127.0.0.1:8080/".into()
}
fn default_user_id() -> String {
    "user01".into()
}
fn default_event_buffer() -> usize {
    256
}
