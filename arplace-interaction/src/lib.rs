//! # arplace interaction
//!
//! Turns tap, pan, pinch and rotate gestures into anchor requests and
//! transform changes on a single placed model.
//!
//! The controller never owns scene nodes. Each gesture hit-tests the host,
//! walks the parent chain of the touched node to the model's root node and
//! manipulates the wrapper node above it.

pub mod config;
pub mod controller;
pub mod resolution;

pub use config::*;
pub use controller::*;
pub use resolution::*;
