//! Error types for arplace

use thiserror::Error;

use crate::scene::NodeId;

/// Session-level tracking failures reported to observers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingFault {
    #[error("Camera access not authorized")]
    CameraUnauthorized,

    #[error("Sensor failure: {0}")]
    SensorFailure(String),

    #[error("World tracking failed: {0}")]
    WorldTrackingFailed(String),
}

/// Main error type for arplace operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown scene node: {0}")]
    UnknownNode(NodeId),

    #[error("Tracking session is not running")]
    SessionNotRunning,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingFault),
}

/// Result type alias for arplace operations
pub type Result<T> = std::result::Result<T, Error>;
