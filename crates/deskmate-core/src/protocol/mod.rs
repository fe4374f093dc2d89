//! Wire protocol: envelope codec and typed payloads.
//!
//! Every application message is one JSON object sent as a WebSocket text
//! message, shaped `{ "type": ..., "timestamp": ..., "payload": {...} }`.
//! The payload shape is fully determined by the type tag and is decoded in a
//! second phase, only after the tag is known.
//!
//! All parsers are panic-free: malformed input is reported as `LinkError`
//! instead of panicking, keeping the client resilient to a misbehaving peer.

pub mod envelope;
pub mod payloads;

pub use envelope::{decode_envelope, encode_envelope, Envelope, MessageType};
pub use payloads::{
    CharacterSettings, ChatMessagePayload, ChatResponsePayload, ConfigMessagePayload,
    ConfigRequestPayload, ConfigResponsePayload, ConfigSettings, ConfigUpdatePayload,
    ControlMessagePayload, StatusMessagePayload, SystemMessagePayload,
};
