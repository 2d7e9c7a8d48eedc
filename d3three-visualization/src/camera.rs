//! Camera utilities for the chart scene

use crate::ray::Ray;
use d3three_core::{WorldPoint, WorldVector};
use nalgebra::{Matrix4, Perspective3};

/// Vertical field of view of the default chart camera, in degrees
pub const DEFAULT_FOV_DEGREES: f64 = 30.0;

/// A perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: WorldPoint,
    pub target: WorldPoint,
    pub up: WorldVector,
    /// Vertical field of view in radians
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: WorldPoint,
        target: WorldPoint,
        up: WorldVector,
        fov: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }

    /// Camera-to-world transform
    pub fn world_matrix(&self) -> Option<Matrix4<f64>> {
        self.view_matrix().try_inverse()
    }

    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn look_at(&mut self, target: WorldPoint) {
        self.target = target;
    }

    /// World position of a point given in normalized device coordinates.
    ///
    /// Returns `None` when the camera matrices are singular.
    pub fn unproject(&self, ndc: &WorldPoint) -> Option<WorldPoint> {
        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let world = inverse.transform_point(ndc);
        world.coords.iter().all(|c| c.is_finite()).then_some(world)
    }

    /// Ray from the camera position through an NDC point
    pub fn ray_through(&self, ndc: &WorldPoint) -> Option<Ray> {
        let target = self.unproject(ndc)?;
        Ray::towards(self.position, target)
    }

    /// Yaw of the camera orientation, taken from a YXZ Euler decomposition
    /// of its world matrix. Labels rotated by this angle about world-y face
    /// the camera while staying upright.
    pub fn label_yaw(&self) -> f64 {
        let Some(m) = self.world_matrix() else {
            return 0.0;
        };
        if m[(1, 2)].abs() < 0.999_999_9 {
            m[(0, 2)].atan2(m[(2, 2)])
        } else {
            (-m[(2, 0)]).atan2(m[(0, 0)])
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            WorldPoint::new(-800.0, 600.0, -1000.0),
            WorldPoint::origin(),
            WorldVector::y(),
            DEFAULT_FOV_DEGREES.to_radians(),
            4.0 / 3.0,
            1.0,
            100_000.0,
        )
    }
}
