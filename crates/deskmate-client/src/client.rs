//! Session/request layer.
//!
//! One async call per supported outbound operation; each builds the correct
//! envelope and hands it to the transport. Chat turns carry the session
//! identifier current at call time. The event pump decodes inbound traffic,
//! applies received settings snapshots to the sink, and forwards events to
//! the consumer.
//!
//! The protocol has no request/response correlation id; a config response is
//! matched to a prior request only by the caller's own sequencing.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use deskmate_core::error::{LinkError, Result};
use deskmate_core::protocol::{
    decode_envelope, encode_envelope, ChatMessagePayload, ConfigMessagePayload,
    ConfigRequestPayload, ConfigSettings, ConfigUpdatePayload, ControlMessagePayload, MessageType,
};

use crate::config::ClientConfig;
use crate::dispatch::{dispatch, ClientEvent};
use crate::settings::SettingsSink;
use crate::transport::{TransportEvent, WsTransport};

fn new_session_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("session_{}", &id[..8])
}

/// Companion link client: transport plus session state.
pub struct Client {
    transport: WsTransport,
    user_id: String,
    session_id: Mutex<String>,
}

impl Client {
    /// Build a client and spawn its event pump. Must be called from within a
    /// Tokio runtime. Dropping the returned receiver stops the pump.
    pub fn new(
        cfg: &ClientConfig,
        settings: Arc<dyn SettingsSink>,
    ) -> (Self, mpsc::Receiver<ClientEvent>) {
        let conn = &cfg.connection;
        let (transport, transport_rx) = WsTransport::new(conn.server_url.clone(), conn.event_buffer);
        let (events_tx, events_rx) = mpsc::channel(conn.event_buffer);
        tokio::spawn(event_pump(transport_rx, events_tx, settings));
        (
            Self {
                transport,
                user_id: conn.user_id.clone(),
                session_id: Mutex::new(new_session_id()),
            },
            events_rx,
        )
    }

    pub async fn connect(&self) -> Result<()> {
        self.transport.connect().await
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.transport.disconnect().await
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub async fn session_id(&self) -> String {
        self.session_id.lock().await.clone()
    }

    /// Start a fresh logical conversation. Leaves the connection alone.
    pub async fn new_session(&self) {
        let fresh = new_session_id();
        tracing::debug!(session = %fresh, "new chat session");
        *self.session_id.lock().await = fresh;
    }

    /// Send one chat turn under the current session.
    pub async fn send_chat(&self, message: impl Into<String>) -> Result<()> {
        let payload = ChatMessagePayload {
            user_id: self.user_id.clone(),
            session_id: self.session_id().await,
            message: message.into(),
        };
        self.send(MessageType::Chat, &payload).await
    }

    /// Ask the runtime for its full settings snapshot.
    pub async fn request_config(&self) -> Result<()> {
        self.send(MessageType::Config, &ConfigRequestPayload::get())
            .await
    }

    /// Push a full settings snapshot to the runtime.
    pub async fn update_config(&self, settings: ConfigSettings) -> Result<()> {
        self.send(MessageType::Config, &ConfigUpdatePayload::update(settings))
            .await
    }

    /// Legacy single-key change, kept for older runtimes.
    pub async fn change_config(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let payload = ConfigMessagePayload {
            setting_key: key.into(),
            value: value.into(),
        };
        self.send(MessageType::Config, &payload).await
    }

    /// Send a control command.
    pub async fn send_control(
        &self,
        command: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<()> {
        let payload = ControlMessagePayload {
            command: command.into(),
            reason: reason.into(),
        };
        self.send(MessageType::Control, &payload).await
    }

    async fn send<P: Serialize>(&self, tag: MessageType, payload: &P) -> Result<()> {
        if !self.transport.is_connected() {
            return Err(LinkError::NotConnected);
        }
        let text = encode_envelope(tag, payload)?;
        self.transport.send(text).await
    }
}

/// Drains transport events, decodes and dispatches inbound messages, and
/// forwards the result to the consumer. A malformed message becomes a
/// diagnostic event; the pump keeps going.
async fn event_pump(
    mut transport_rx: mpsc::Receiver<TransportEvent>,
    events: mpsc::Sender<ClientEvent>,
    settings: Arc<dyn SettingsSink>,
) {
    while let Some(event) = transport_rx.recv().await {
        let out = match event {
            TransportEvent::Connected => Some(ClientEvent::Connected),
            TransportEvent::Disconnected => Some(ClientEvent::Disconnected),
            TransportEvent::ConnectionError(msg) => Some(ClientEvent::Error(msg)),
            TransportEvent::MessageReceived(text) => {
                match decode_envelope(&text).and_then(|env| dispatch(&env)) {
                    Ok(Some(ClientEvent::ConfigResponse(resp))) => {
                        if let Some(snapshot) = resp.settings.clone() {
                            settings.apply(snapshot).await;
                        }
                        Some(ClientEvent::ConfigResponse(resp))
                    }
                    Ok(other) => other,
                    Err(e) => {
                        tracing::warn!(error = %e, "inbound message dropped");
                        Some(ClientEvent::Error(e.to_string()))
                    }
                }
            }
        };
        if let Some(ev) = out {
            if events.send(ev).await.is_err() {
                break;
            }
        }
    }
}
