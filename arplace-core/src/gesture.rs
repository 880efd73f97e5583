//! Gesture events delivered by the host's gesture recognizers

use serde::{Deserialize, Serialize};

use crate::point::ScreenPoint;

/// Lifecycle phase of a continuous gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// `Ended`, `Cancelled` and `Failed` all finish a gesture
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// A discrete tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapGesture {
    pub location: ScreenPoint,
}

/// A one-finger drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanGesture {
    pub location: ScreenPoint,
    pub phase: GesturePhase,
}

/// A two-finger pinch.
///
/// `scale` is relative to the last time it was reset to `1.0`; handlers that
/// consume it incrementally write `1.0` back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchGesture {
    pub location: ScreenPoint,
    pub scale: f32,
    pub phase: GesturePhase,
}

/// A two-finger twist. `rotation` is in radians, accumulated since the
/// gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationGesture {
    pub location: ScreenPoint,
    pub rotation: f32,
    pub phase: GesturePhase,
}

/// Any gesture the interaction layer understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Tap(TapGesture),
    Pan(PanGesture),
    Pinch(PinchGesture),
    Rotate(RotationGesture),
}

impl GestureEvent {
    pub fn tap(location: ScreenPoint) -> Self {
        Self::Tap(TapGesture { location })
    }

    pub fn pan(location: ScreenPoint, phase: GesturePhase) -> Self {
        Self::Pan(PanGesture { location, phase })
    }

    pub fn pinch(location: ScreenPoint, scale: f32, phase: GesturePhase) -> Self {
        Self::Pinch(PinchGesture { location, scale, phase })
    }

    pub fn rotate(location: ScreenPoint, rotation: f32, phase: GesturePhase) -> Self {
        Self::Rotate(RotationGesture { location, rotation, phase })
    }

    /// Where on screen the gesture happened
    pub fn location(&self) -> ScreenPoint {
        match self {
            Self::Tap(g) => g.location,
            Self::Pan(g) => g.location,
            Self::Pinch(g) => g.location,
            Self::Rotate(g) => g.location,
        }
    }

    /// Phase of the gesture; taps are reported as `Ended`
    pub fn phase(&self) -> GesturePhase {
        match self {
            Self::Tap(_) => GesturePhase::Ended,
            Self::Pan(g) => g.phase,
            Self::Pinch(g) => g.phase,
            Self::Rotate(g) => g.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_phases() {
        assert!(!GesturePhase::Began.is_finished());
        assert!(!GesturePhase::Changed.is_finished());
        assert!(GesturePhase::Ended.is_finished());
        assert!(GesturePhase::Cancelled.is_finished());
        assert!(GesturePhase::Failed.is_finished());
    }

    #[test]
    fn test_event_accessors() {
        let at = ScreenPoint::new(10.0, 20.0);
        let event = GestureEvent::pinch(at, 1.5, GesturePhase::Changed);
        assert_eq!(event.location(), at);
        assert_eq!(event.phase(), GesturePhase::Changed);
        assert_eq!(GestureEvent::tap(at).phase(), GesturePhase::Ended);
    }
}
