//! Maps one decoded envelope onto the client event surface.

use deskmate_core::protocol::{
    ChatResponsePayload, ConfigResponsePayload, Envelope, MessageType, StatusMessagePayload,
    SystemMessagePayload,
};
use deskmate_core::Result;

/// Events surfaced to the embedding frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Connected,
    Disconnected,
    /// Reply text for the current chat session.
    ChatReply(String),
    /// Result of a config get/push, possibly carrying a settings snapshot.
    ConfigResponse(ConfigResponsePayload),
    /// Runtime health report.
    StatusUpdate(StatusMessagePayload),
    /// Diagnostic: connection fault or undecodable inbound message.
    Error(String),
}

/// Dispatch one envelope.
///
/// Unrecognized tags yield `Ok(None)` so an older client survives a newer
/// peer. A payload that fails to parse for a recognized tag is an error the
/// caller reports as a diagnostic without stopping the receive pipeline.
pub fn dispatch(env: &Envelope) -> Result<Option<ClientEvent>> {
    let Some(tag) = env.message_type() else {
        tracing::debug!(tag = %env.tag, "ignoring unknown message type");
        return Ok(None);
    };
    match tag {
        MessageType::Chat => {
            let p: ChatResponsePayload = env.payload_as()?;
            Ok(Some(ClientEvent::ChatReply(p.response)))
        }
        MessageType::Config => Ok(Some(ClientEvent::ConfigResponse(env.payload_as()?))),
        MessageType::Status => Ok(Some(ClientEvent::StatusUpdate(env.payload_as()?))),
        MessageType::System => {
            // Reserved in the current protocol surface; worth a log line.
            match env.payload_as::<SystemMessagePayload>() {
                Ok(p) => tracing::info!(level = %p.level, message = %p.message, "system notice"),
                Err(e) => tracing::debug!(error = %e, "unreadable system payload"),
            }
            Ok(None)
        }
        // control is outbound-only
        MessageType::Control => Ok(None),
    }
}
