//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A location in view coordinates.
///
/// The origin is the top-left corner of the view, `x` grows to the right and
/// `y` grows downwards, matching the coordinates touch events are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another screen point
    pub fn distance_to(&self, other: &ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<Point2<f32>> for ScreenPoint {
    fn from(point: Point2<f32>) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<ScreenPoint> for Point2<f32> {
    fn from(point: ScreenPoint) -> Self {
        Point2::new(point.x, point.y)
    }
}
