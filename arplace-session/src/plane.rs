//! Detected planes and ray intersection against them

use arplace_core::{
    Aabb, AnchorId, CategoryMask, Point3f, Ray, SceneSubtree, Vector3f, WorldPose,
};
use serde::{Deserialize, Serialize};

/// Thickness given to plane visualization bounds
const PLANE_VISUAL_THICKNESS: f32 = 0.002;

/// Orientation of a detected surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneAlignment {
    /// Floors and tabletops; the plane spans X (width) and Z (length)
    Horizontal,
    /// Walls facing +Z; the plane spans X (width) and Y (length)
    Vertical,
}

/// A bounded planar surface found by plane detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPlane {
    pub anchor: AnchorId,
    pub center: Point3f,
    pub width: f32,
    pub length: f32,
    pub alignment: PlaneAlignment,
}

impl DetectedPlane {
    /// Unit normal of the plane
    pub fn normal(&self) -> Vector3f {
        match self.alignment {
            PlaneAlignment::Horizontal => Vector3f::y(),
            PlaneAlignment::Vertical => Vector3f::z(),
        }
    }

    /// Check whether a point on the plane lies within its extent
    pub fn contains(&self, point: &Point3f) -> bool {
        let offset = point - self.center;
        let (along_width, along_length) = match self.alignment {
            PlaneAlignment::Horizontal => (offset.x, offset.z),
            PlaneAlignment::Vertical => (offset.x, offset.y),
        };
        along_width.abs() <= self.width / 2.0 && along_length.abs() <= self.length / 2.0
    }

    /// Ray parameter where the ray meets the bounded plane
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let normal = self.normal();
        let denominator = normal.dot(&ray.direction);
        if denominator.abs() < 1e-8 {
            return None;
        }

        let t = normal.dot(&(self.center - ray.origin)) / denominator;
        if t < 0.0 {
            return None;
        }

        self.contains(&ray.point_at(t)).then_some(t)
    }

    /// Pose of the plane anchor
    pub fn pose(&self) -> WorldPose {
        WorldPose::from_translation(self.center.coords)
    }

    /// Visualization node, used as the plane's anchor node.
    ///
    /// It carries thin bounds in the default category so hit-tests filtered
    /// to interactable objects pass through it.
    pub fn visualization(&self) -> SceneSubtree {
        let size = match self.alignment {
            PlaneAlignment::Horizontal => {
                Vector3f::new(self.width, PLANE_VISUAL_THICKNESS, self.length)
            }
            PlaneAlignment::Vertical => {
                Vector3f::new(self.width, self.length, PLANE_VISUAL_THICKNESS)
            }
        };
        SceneSubtree::named("plane")
            .with_category(CategoryMask::DEFAULT)
            .with_bounds(Aabb::from_center_size(Point3f::origin(), size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor() -> DetectedPlane {
        DetectedPlane {
            anchor: AnchorId(1),
            center: Point3f::new(0.0, 0.0, 0.0),
            width: 4.0,
            length: 2.0,
            alignment: PlaneAlignment::Horizontal,
        }
    }

    #[test]
    fn test_ray_hits_floor() {
        let ray = Ray::new(Point3f::new(1.0, 2.0, 0.5), Vector3f::new(0.0, -1.0, 0.0));
        let t = floor().intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!(ray.point_at(t), Point3f::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_ray_outside_extent_misses() {
        let ray = Ray::new(Point3f::new(0.0, 2.0, 1.5), Vector3f::new(0.0, -1.0, 0.0));
        assert!(floor().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_parallel_and_receding_rays_miss() {
        let parallel = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let receding = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        assert!(floor().intersect_ray(&parallel).is_none());
        assert!(floor().intersect_ray(&receding).is_none());
    }

    #[test]
    fn test_vertical_plane_spans_x_and_y() {
        let wall = DetectedPlane {
            center: Point3f::new(0.0, 1.0, -3.0),
            alignment: PlaneAlignment::Vertical,
            ..floor()
        };
        let ray = Ray::new(Point3f::new(0.5, 1.5, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        assert_relative_eq!(wall.intersect_ray(&ray).unwrap(), 3.0);
        assert!(!wall.contains(&Point3f::new(0.5, 2.5, -3.0)));
    }

    #[test]
    fn test_visualization_is_not_interactable() {
        let node = floor().visualization();
        assert!(!node.category.intersects(CategoryMask::INTERACTABLE_OBJECT));
        assert_relative_eq!(node.bounds.unwrap().size().x, 4.0);
    }
}
