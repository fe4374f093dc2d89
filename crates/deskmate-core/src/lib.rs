//! deskmate core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the wire-level contracts shared by the client and by
//! test tooling: the message envelope, the typed payloads, and the error
//! surface. It intentionally carries no transport or runtime dependencies so
//! it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `LinkError`/`Result` so the client
//! process does not crash on malformed traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{LinkError, Result};
