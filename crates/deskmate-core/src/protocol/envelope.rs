//! Envelope codec.
//!
//! Two-phase decode: the shell (`type`, `timestamp`, opaque `payload`) is
//! parsed first with case-insensitive field matching, then the payload is
//! re-parsed into the concrete type selected by the tag. The payload is kept
//! as a `serde_json::Value` here so unknown tags survive decoding and can be
//! ignored by the dispatcher.

use chrono::{Local, SecondsFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LinkError, Result};

/// Message type tags understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Chat,
    Config,
    Control,
    Status,
    System,
}

impl MessageType {
    /// Lower-case wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Chat => "chat",
            MessageType::Config => "config",
            MessageType::Control => "control",
            MessageType::Status => "status",
            MessageType::System => "system",
        }
    }

    /// Parse a wire tag, case-insensitively. Unknown tags yield `None`; the
    /// caller decides whether that is an error (it is not, for inbound
    /// traffic: unknown types are ignored for forward compatibility).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "chat" => Some(MessageType::Chat),
            "config" => Some(MessageType::Config),
            "control" => Some(MessageType::Control),
            "status" => Some(MessageType::Status),
            "system" => Some(MessageType::System),
            _ => None,
        }
    }
}

/// Decoded envelope shell.
///
/// `tag` is kept as the lower-cased string rather than `MessageType` so that
/// envelopes with unrecognized tags still decode and can be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub tag: String,
    /// Informational only. Never used for ordering.
    pub timestamp: Option<String>,
    pub payload: Value,
}

impl Envelope {
    /// The recognized message type, if any.
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::parse(&self.tag)
    }

    /// Second decode phase: parse the opaque payload into a concrete type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| LinkError::Decode(format!("{} payload: {e}", self.tag)))
    }
}

#[derive(Serialize)]
struct WireEnvelope<'a, P: Serialize> {
    #[serde(rename = "type")]
    tag: &'static str,
    timestamp: String,
    payload: &'a P,
}

/// Serialize one outbound message: lower-cased tag, ISO-8601 timestamp taken
/// at encode time, payload as-is. serde_json's default output keeps escaping
/// minimal, which is what the peer expects.
pub fn encode_envelope<P: Serialize>(tag: MessageType, payload: &P) -> Result<String> {
    let env = WireEnvelope {
        tag: tag.as_str(),
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        payload,
    };
    serde_json::to_string(&env).map_err(|e| LinkError::Encode(e.to_string()))
}

fn field<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Parse the envelope shell out of one received text message.
///
/// Field matching is case-insensitive. A missing payload decodes as
/// `Value::Null` so that tag-only messages still produce a shell.
pub fn decode_envelope(text: &str) -> Result<Envelope> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| LinkError::Decode(format!("invalid envelope json: {e}")))?;
    let map = value
        .as_object()
        .ok_or_else(|| LinkError::Decode("envelope must be a json object".into()))?;
    let tag = field(map, "type")
        .and_then(Value::as_str)
        .ok_or_else(|| LinkError::Decode("envelope missing type tag".into()))?
        .to_ascii_lowercase();
    let timestamp = field(map, "timestamp")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let payload = field(map, "payload").cloned().unwrap_or(Value::Null);
    Ok(Envelope {
        tag,
        timestamp,
        payload,
    })
}
