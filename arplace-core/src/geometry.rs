//! Bounding volumes and rays used for hit-testing

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::point::{Point3f, Vector3f};

/// An axis-aligned bounding box in a node's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Create a bounding box from its corners
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Create a box centered on `center` with the given full size
    pub fn from_center_size(center: Point3f, size: Vector3f) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Full extent along each axis
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Slab test. Returns the ray parameter of the entry point, or of the
    /// exit point when the ray starts inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];

            if direction.abs() < 1e-12 {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (self.min[axis] - origin) * inv;
            let mut t1 = (self.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }
}

/// A half-line `origin + t * direction` for `t >= 0`.
///
/// The direction is not required to be unit length, so a ray carried into a
/// scaled local frame keeps the same parameterisation as in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self { origin, direction }
    }

    /// Point along the ray at parameter `t`
    pub fn point_at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }

    /// Carry the ray through an affine transform
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self {
            origin: matrix.transform_point(&self.origin),
            direction: matrix.transform_vector(&self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_ray_hits_box_front_face() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        let t = unit_box().intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 4.0);
        assert_relative_eq!(ray.point_at(t), Point3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_misses_box() {
        let ray = Ray::new(Point3f::new(3.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside_returns_exit() {
        let ray = Ray::new(Point3f::origin(), Vector3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(unit_box().intersect_ray(&ray).unwrap(), 1.0);
    }

    #[test]
    fn test_transformed_ray_keeps_parameter() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, 10.0), Vector3f::new(0.0, 0.0, -1.0));
        let to_local = Matrix4::new_scaling(0.5);
        let local = ray.transformed(&to_local);

        let t = unit_box().intersect_ray(&local).unwrap();
        assert_relative_eq!(ray.point_at(t), Point3f::new(0.0, 0.0, 2.0), epsilon = 1e-6);
    }
}
