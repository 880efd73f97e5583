//! In-memory tracking session for arplace
//!
//! This crate stands in for a platform AR framework:
//! - Session lifecycle and configuration
//! - Virtual camera with projection and screen-to-world rays
//! - Detected planes and hit-testing against planes and scene nodes
//! - Model library resolving placement anchors to model subtrees
//! - `ArView`, which feeds gestures and session events to the controller

pub mod camera;
pub mod config;
pub mod model;
pub mod plane;
pub mod session;
pub mod view;

pub use camera::*;
pub use config::*;
pub use model::*;
pub use plane::*;
pub use session::*;
pub use view::*;
