//! Gesture handling for the placed model
//!
//! A tap places the model on a detected plane. Pan, pinch and rotate resolve
//! the model under the touch and mutate the transform of its wrapper node.
//! Frames without a target are skipped silently; the returned
//! [`GestureOutcome`] records what happened.

use arplace_core::{
    Anchor, AnchorId, GestureEvent, GesturePhase, NodeId, PanGesture, PinchGesture,
    RotationGesture, ScreenPoint, SessionObserver, TapGesture, TrackingFault, TrackingScene,
    Vector3f,
};
use tracing::{debug, info, trace, warn};

use crate::config::{InteractionConfig, PlacementPolicy};
use crate::resolution::resolve_manipulation_target;

/// Yaw committed by the last finished rotate gesture, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    current_angle_y: f32,
}

impl RotationState {
    pub fn new(current_angle_y: f32) -> Self {
        Self { current_angle_y }
    }

    pub fn current_angle_y(&self) -> f32 {
        self.current_angle_y
    }

    fn commit(&mut self, angle_y: f32) {
        self.current_angle_y = angle_y;
    }
}

/// Why a gesture frame was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No detected plane under the touch
    NoPlane,
    /// No node in the interactable category under the touch
    NoInteractableNode,
    /// The touched node does not belong to a wrapped model
    NoModelNode,
    /// A model is already placed and the policy allows only one
    AlreadyPlaced,
    /// The tracker refused the anchor
    AnchorRejected,
}

/// Effect of a single gesture frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    AnchorRequested(AnchorId),
    Moved { node: NodeId, position: Vector3f },
    Scaled { node: NodeId, scale: Vector3f },
    Rotated { node: NodeId, angle_y: f32 },
    RotationCommitted { node: NodeId, angle_y: f32 },
    /// A target was found but the phase carries no action
    Idle,
    Skipped(SkipReason),
}

impl GestureOutcome {
    /// Check whether the frame changed anchors or the scene
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Idle | Self::Skipped(_))
    }
}

fn skip(gesture: &'static str, reason: SkipReason) -> GestureOutcome {
    trace!(gesture, ?reason, "gesture frame skipped");
    GestureOutcome::Skipped(reason)
}

/// Translates gestures into anchor requests and wrapper transforms
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    rotation: RotationState,
    placed: Vec<AnchorId>,
}

impl InteractionController {
    /// Create a controller with no committed rotation
    pub fn new(config: InteractionConfig) -> Self {
        Self::with_rotation_state(config, RotationState::default())
    }

    /// Create a controller resuming from a previously committed rotation
    pub fn with_rotation_state(config: InteractionConfig, rotation: RotationState) -> Self {
        Self {
            config,
            rotation,
            placed: Vec::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn rotation_state(&self) -> RotationState {
        self.rotation
    }

    /// Anchors requested by taps so far
    pub fn placed_anchors(&self) -> &[AnchorId] {
        &self.placed
    }

    /// Route any gesture to its handler
    pub fn handle_event<S>(&mut self, host: &mut S, event: &mut GestureEvent) -> GestureOutcome
    where
        S: TrackingScene + ?Sized,
    {
        match event {
            GestureEvent::Tap(gesture) => self.handle_tap(host, gesture),
            GestureEvent::Pan(gesture) => self.handle_pan(host, gesture),
            GestureEvent::Pinch(gesture) => self.handle_pinch(host, gesture),
            GestureEvent::Rotate(gesture) => self.handle_rotate(host, gesture),
        }
    }

    /// Request a model anchor where the tap meets a detected plane
    pub fn handle_tap<S>(&mut self, host: &mut S, gesture: &TapGesture) -> GestureOutcome
    where
        S: TrackingScene + ?Sized,
    {
        if self.config.placement == PlacementPolicy::SingleInstance && !self.placed.is_empty() {
            return skip("tap", SkipReason::AlreadyPlaced);
        }

        let Some(hit) = host.hit_test_planes(gesture.location) else {
            return skip("tap", SkipReason::NoPlane);
        };

        match host.add_anchor(&self.config.anchor_name, hit.world_pose) {
            Ok(anchor) => {
                debug!(%anchor, point = ?hit.world_point(), "placement anchor requested");
                self.placed.push(anchor);
                GestureOutcome::AnchorRequested(anchor)
            }
            Err(err) => {
                warn!(error = %err, "placement anchor rejected");
                skip("tap", SkipReason::AnchorRejected)
            }
        }
    }

    /// Slide the model across the plane under the finger, keeping its height
    pub fn handle_pan<S>(&mut self, host: &mut S, gesture: &PanGesture) -> GestureOutcome
    where
        S: TrackingScene + ?Sized,
    {
        let target = match self.manipulation_target(host, gesture.location) {
            Ok(target) => target,
            Err(reason) => return skip("pan", reason),
        };

        if gesture.phase != GesturePhase::Changed {
            return GestureOutcome::Idle;
        }

        let Some(plane) = host.hit_test_planes(gesture.location) else {
            return skip("pan", SkipReason::NoPlane);
        };
        let world = plane.world_point();

        let Some(node) = host.scene_mut().node_mut(target) else {
            return skip("pan", SkipReason::NoModelNode);
        };
        node.transform.position.x = world.x;
        node.transform.position.z = world.z;

        let position = node.transform.position;
        debug!(node = %target, ?position, "model moved");
        GestureOutcome::Moved { node: target, position }
    }

    /// Scale the model by the pinch factor and reset the factor to 1
    pub fn handle_pinch<S>(&mut self, host: &mut S, gesture: &mut PinchGesture) -> GestureOutcome
    where
        S: TrackingScene + ?Sized,
    {
        let target = match self.manipulation_target(host, gesture.location) {
            Ok(target) => target,
            Err(reason) => return skip("pinch", reason),
        };

        if gesture.phase != GesturePhase::Changed {
            return GestureOutcome::Idle;
        }

        let Some(node) = host.scene_mut().node_mut(target) else {
            return skip("pinch", SkipReason::NoModelNode);
        };
        node.transform.scale *= gesture.scale;
        gesture.scale = 1.0;

        let scale = node.transform.scale;
        debug!(node = %target, ?scale, "model scaled");
        GestureOutcome::Scaled { node: target, scale }
    }

    /// Yaw the model by the gesture rotation on top of the committed angle
    pub fn handle_rotate<S>(&mut self, host: &mut S, gesture: &RotationGesture) -> GestureOutcome
    where
        S: TrackingScene + ?Sized,
    {
        let target = match self.manipulation_target(host, gesture.location) {
            Ok(target) => target,
            Err(reason) => return skip("rotate", reason),
        };

        let Some(node) = host.scene_mut().node_mut(target) else {
            return skip("rotate", SkipReason::NoModelNode);
        };

        match gesture.phase {
            GesturePhase::Changed => {
                let angle_y = self.rotation.current_angle_y() + gesture.rotation;
                node.transform.euler_angles.y = angle_y;
                debug!(node = %target, angle_y, "model rotated");
                GestureOutcome::Rotated { node: target, angle_y }
            }
            phase if phase.is_finished() => {
                let angle_y = node.transform.euler_angles.y;
                self.rotation.commit(angle_y);
                debug!(node = %target, angle_y, "rotation committed");
                GestureOutcome::RotationCommitted { node: target, angle_y }
            }
            _ => GestureOutcome::Idle,
        }
    }

    fn manipulation_target<S>(&self, host: &S, location: ScreenPoint) -> Result<NodeId, SkipReason>
    where
        S: TrackingScene + ?Sized,
    {
        let hit = host
            .hit_test_nodes(location, self.config.interactable_mask)
            .ok_or(SkipReason::NoInteractableNode)?;
        resolve_manipulation_target(host.scene(), hit.node, &self.config.model_node_name)
            .ok_or(SkipReason::NoModelNode)
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

/// Session hooks only log; no recovery is attempted on faults or
/// interruptions.
impl SessionObserver for InteractionController {
    fn did_add_node(&mut self, node: NodeId, anchor: &Anchor) {
        if anchor.is_plane() {
            info!(%node, anchor = %anchor.id, "plane detected");
        } else if anchor.has_name(&self.config.anchor_name) {
            info!(%node, anchor = %anchor.id, "model placed");
        } else {
            debug!(%node, anchor = %anchor.id, name = ?anchor.name, "node added for anchor");
        }
    }

    fn session_did_fail(&mut self, fault: &TrackingFault) {
        warn!(%fault, "tracking session failed");
    }

    fn session_was_interrupted(&mut self) {
        info!("tracking session interrupted");
    }

    fn session_interruption_ended(&mut self) {
        info!("tracking session interruption ended");
    }
}
