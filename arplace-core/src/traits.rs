//! Collaborator traits between the interaction layer and the tracking host

use serde::{Deserialize, Serialize};

use crate::anchor::{Anchor, AnchorId};
use crate::error::{Result, TrackingFault};
use crate::point::{Point3f, ScreenPoint};
use crate::scene::{CategoryMask, NodeId, SceneGraph, SceneSubtree};
use crate::transform::WorldPose;

/// Result of hit-testing a screen point against detected planes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneHit {
    /// The plane anchor that was hit
    pub plane: AnchorId,
    /// Pose at the hit location; its translation is the world hit point
    pub world_pose: WorldPose,
    /// Distance from the camera along the ray
    pub distance: f32,
}

impl PlaneHit {
    pub fn world_point(&self) -> Point3f {
        self.world_pose.translation()
    }
}

/// Result of hit-testing a screen point against scene nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeHit {
    pub node: NodeId,
    pub world_point: Point3f,
    pub distance: f32,
}

/// The tracking and scene service gestures are interpreted against.
///
/// Hit-tests return the nearest result only.
pub trait TrackingScene {
    /// Project a screen point onto the detected planes
    fn hit_test_planes(&self, point: ScreenPoint) -> Option<PlaneHit>;

    /// Project a screen point onto nodes whose category intersects `mask`
    fn hit_test_nodes(&self, point: ScreenPoint, mask: CategoryMask) -> Option<NodeHit>;

    /// Ask the tracker to start tracking a named anchor at `pose`
    fn add_anchor(&mut self, name: &str, pose: WorldPose) -> Result<AnchorId>;

    fn scene(&self) -> &SceneGraph;

    fn scene_mut(&mut self) -> &mut SceneGraph;
}

/// Maps a newly tracked anchor to the content rendered at it.
///
/// Implementations must be pure: the returned subtree is the only effect.
pub trait AnchorResolver {
    fn resolve_anchor(&self, anchor: &Anchor) -> SceneSubtree;
}

/// Session delegate hooks. Every method defaults to doing nothing.
pub trait SessionObserver {
    /// A node was created for `anchor` and added to the scene
    fn did_add_node(&mut self, _node: NodeId, _anchor: &Anchor) {}

    /// The session stopped because of a tracking fault
    fn session_did_fail(&mut self, _fault: &TrackingFault) {}

    /// Tracking was suspended, e.g. the app moved to the background
    fn session_was_interrupted(&mut self) {}

    /// Tracking resumed after an interruption
    fn session_interruption_ended(&mut self) {}
}
