//! Top-level facade crate for deskmate.
//!
//! Re-exports the protocol core and the client library so embedders can
//! depend on a single crate.

pub mod core {
    pub use deskmate_core::*;
}

pub mod client {
    pub use deskmate_client::*;
}
