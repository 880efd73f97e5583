//! Virtual camera for projecting between screen and world

use arplace_core::{Point3f, Ray, ScreenPoint, Vector3f};
use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};

/// A pinhole camera looking into the tracked world
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking at `target` with default optics
    pub fn looking_at(position: Point3f, target: Point3f) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio(), self.fov, self.near, self.far);
        perspective.into_inner()
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Screen location of a world point, or `None` when it is behind the camera
    pub fn project(&self, world: &Point3f) -> Option<ScreenPoint> {
        let clip = self.view_projection() * world.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(ScreenPoint::new(
            (ndc_x + 1.0) * 0.5 * self.viewport_width,
            (1.0 - ndc_y) * 0.5 * self.viewport_height,
        ))
    }

    /// Ray from the camera through a screen location, unit-length direction
    pub fn ray_through(&self, point: ScreenPoint) -> Option<Ray> {
        let inverse = self.view_projection().try_inverse()?;
        let ndc_x = 2.0 * point.x / self.viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / self.viewport_height;

        let far = inverse.transform_point(&Point3::new(ndc_x, ndc_y, 1.0));
        let direction: Vector3f = far - self.position;
        if direction.norm() < f32::EPSILON {
            return None;
        }
        Some(Ray::new(self.position, direction.normalize()))
    }

    /// Rotate the camera around the target.
    ///
    /// `horizontal` turns around the up axis, `vertical` tilts towards or away
    /// from it. Tilts that would pass over the poles are dropped.
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius < f32::EPSILON {
            return;
        }

        let up = Unit::new_normalize(self.up);
        let turned = Rotation3::from_axis_angle(&up, horizontal) * offset;

        let right = turned.cross(&up);
        let tilted = match Unit::try_new(right, f32::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, vertical) * turned,
            None => turned,
        };

        let offset = if tilted.normalize().dot(&up).abs() < 0.99 {
            tilted
        } else {
            turned
        };
        self.position = self.target + offset.normalize() * radius;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 1.5, 3.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_3,
            viewport_width: 390.0,
            viewport_height: 844.0,
            near: 0.01,
            far: 100.0,
        }
    }
}
