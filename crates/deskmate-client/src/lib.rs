//! deskmate client library.
//!
//! Wires the WebSocket transport, the protocol dispatcher, and the
//! session/request client into a cohesive link stack. It is intended to be
//! consumed by the terminal binary (`main.rs`), by a desktop frontend, and
//! by integration tests.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod settings;
pub mod transport;

pub use client::Client;
pub use dispatch::ClientEvent;
pub use settings::{MemorySettings, SettingsSink};
pub use transport::{LinkState, TransportEvent, WsTransport};
