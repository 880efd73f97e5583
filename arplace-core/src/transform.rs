//! World poses and node transforms

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::point::{Point3f, Vector3f};

/// A world-space pose (position and orientation) reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPose {
    pub matrix: Matrix4<f32>,
}

impl WorldPose {
    /// Create an identity pose
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a pose at a world position with no rotation
    pub fn from_translation(translation: Vector3f) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// World position of the pose (the translation column)
    pub fn translation(&self) -> Point3f {
        Point3f::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Pose of `other` expressed relative to this pose
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for WorldPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f32>> for WorldPose {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

/// Local transform of a scene node.
///
/// Euler angles are in radians: `x` is pitch, `y` is yaw and `z` is roll.
/// The rotation is composed as `Ry * Rx * Rz` and the full local matrix as
/// `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub position: Vector3f,
    pub euler_angles: Vector3f,
    pub scale: Vector3f,
}

impl NodeTransform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            euler_angles: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a transform that only translates
    pub fn from_position(position: Vector3f) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Rotation part of the transform
    pub fn rotation(&self) -> Rotation3<f32> {
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), self.euler_angles.y);
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), self.euler_angles.x);
        let roll = Rotation3::from_axis_angle(&Vector3::z_axis(), self.euler_angles.z);
        yaw * pitch * roll
    }

    /// Local transformation matrix
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::new_translation(&self.position);
        let rotation = self.rotation().to_homogeneous();
        let scaling = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * rotation * scaling
    }

    /// Decompose a translation-rotation-scale matrix.
    ///
    /// Returns `None` when an axis has collapsed to zero scale. Shear is not
    /// representable and is discarded.
    pub fn from_matrix(matrix: &Matrix4<f32>) -> Option<Self> {
        let position = Vector3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let linear: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();

        let scale = Vector3::new(
            linear.column(0).norm(),
            linear.column(1).norm(),
            linear.column(2).norm(),
        );
        if scale.iter().any(|s| *s < 1e-8) {
            return None;
        }

        let mut r = linear;
        for (axis, s) in scale.iter().enumerate() {
            let mut column = r.column_mut(axis);
            column /= *s;
        }

        let pitch = (-r[(1, 2)]).clamp(-1.0, 1.0).asin();
        let yaw = r[(0, 2)].atan2(r[(2, 2)]);
        let roll = r[(1, 0)].atan2(r[(1, 1)]);

        Some(Self {
            position,
            euler_angles: Vector3::new(pitch, yaw, roll),
            scale,
        })
    }

    /// Create a node transform carrying a world pose
    pub fn from_pose(pose: &WorldPose) -> Option<Self> {
        Self::from_matrix(&pose.matrix)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pose_translation() {
        let pose = WorldPose::from_translation(Vector3::new(1.0, 0.0, 2.0));
        assert_eq!(pose.translation(), Point3f::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_compose_applies_outer_pose_last() {
        let anchor = WorldPose::from_translation(Vector3::new(1.0, 0.0, 2.0));
        let local = WorldPose::from(
            NodeTransform {
                euler_angles: Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
                ..NodeTransform::identity()
            }
            .to_matrix(),
        );
        let placed = anchor.compose(local);
        assert_relative_eq!(placed.translation(), Point3f::new(1.0, 0.0, 2.0));
        assert_relative_eq!(
            placed.matrix.transform_point(&Point3f::new(1.0, 0.0, 0.0)),
            Point3f::new(1.0, 0.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(NodeTransform::identity().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_yaw_rotates_x_towards_negative_z() {
        let transform = NodeTransform {
            euler_angles: Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            ..NodeTransform::identity()
        };
        let rotated = transform.to_matrix().transform_point(&Point3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Point3f::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_decompose_trs_matrix() {
        let original = NodeTransform {
            position: Vector3::new(1.0, -0.5, 3.0),
            euler_angles: Vector3::new(0.3, -1.1, 0.2),
            scale: Vector3::new(2.0, 0.5, 1.5),
        };
        let decomposed = NodeTransform::from_matrix(&original.to_matrix()).unwrap();

        assert_relative_eq!(decomposed.position, original.position, epsilon = 1e-5);
        assert_relative_eq!(decomposed.euler_angles, original.euler_angles, epsilon = 1e-5);
        assert_relative_eq!(decomposed.scale, original.scale, epsilon = 1e-5);
    }

    #[test]
    fn test_decompose_rejects_degenerate_scale() {
        let matrix = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0));
        assert!(NodeTransform::from_matrix(&matrix).is_none());
    }

    #[test]
    fn test_node_transform_from_pose() {
        let pose = WorldPose::from_translation(Vector3::new(1.0, 0.0, 2.0));
        let transform = NodeTransform::from_pose(&pose).unwrap();
        assert_relative_eq!(transform.position, Vector3::new(1.0, 0.0, 2.0));
        assert_relative_eq!(transform.scale, Vector3::new(1.0, 1.0, 1.0));
    }
}
