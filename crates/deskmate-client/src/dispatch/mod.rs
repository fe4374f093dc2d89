//! Protocol dispatcher: decoded envelope to outward-facing event.

pub mod dispatcher;

pub use dispatcher::{dispatch, ClientEvent};
