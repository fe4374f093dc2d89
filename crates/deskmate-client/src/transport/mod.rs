//! WebSocket transport: connection lifecycle and raw message handling.
//!
//! Exactly one logical connection at a time. One successful connect owns one
//! background receive task; lifecycle notifications and reassembled inbound
//! text messages flow out through a bounded event channel.

pub mod ws;

pub use ws::{LinkState, TransportEvent, WsTransport};
