//! Anchors: named world poses the tracker keeps content attached to

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::WorldPose;

/// Identifier assigned to an anchor by the tracking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// What an anchor was created for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnchorKind {
    /// A surface found by plane detection, with its width (X) and length (Z)
    Plane { width: f32, length: f32 },
    /// Content placement requested by the application
    Placement,
}

/// A tracked pose in world space, optionally named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: AnchorId,
    pub name: Option<String>,
    pub pose: WorldPose,
    pub kind: AnchorKind,
}

impl Anchor {
    /// Create a named placement anchor
    pub fn placement(id: AnchorId, name: impl Into<String>, pose: WorldPose) -> Self {
        Self {
            id,
            name: Some(name.into()),
            pose,
            kind: AnchorKind::Placement,
        }
    }

    /// Create an unnamed plane anchor
    pub fn plane(id: AnchorId, pose: WorldPose, width: f32, length: f32) -> Self {
        Self {
            id,
            name: None,
            pose,
            kind: AnchorKind::Plane { width, length },
        }
    }

    pub fn is_plane(&self) -> bool {
        matches!(self.kind, AnchorKind::Plane { .. })
    }

    /// Check whether the anchor carries `name`
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}
