//! Rays and the intersection tests used for picking

use crate::renderer::ObjectId;
use d3three_core::{WorldPoint, WorldVector};

const EPSILON: f64 = 1e-12;

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: WorldPoint,
    pub direction: WorldVector,
}

/// One ray intersection, as reported by [`crate::Renderer::raycast`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    /// Distance from the ray origin
    pub distance: f64,
    pub point: WorldPoint,
    /// Intersected face, for surface meshes
    pub face: Option<usize>,
}

impl Ray {
    /// Ray along `direction`, or `None` for a zero-length direction
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Option<Self> {
        let direction = direction.try_normalize(EPSILON)?;
        Some(Self { origin, direction })
    }

    /// Ray from `origin` through `target`
    pub fn towards(origin: WorldPoint, target: WorldPoint) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    pub fn at(&self, distance: f64) -> WorldPoint {
        self.origin + self.direction * distance
    }

    /// Distance from `point` to the closest point of the ray
    pub fn distance_to_point(&self, point: &WorldPoint) -> f64 {
        let along = (point - self.origin).dot(&self.direction).max(0.0);
        (self.at(along) - point).magnitude()
    }

    /// Distance to the first intersection with a sphere.
    ///
    /// An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: &WorldPoint, radius: f64) -> Option<f64> {
        let offset = self.origin - center;
        let b = offset.dot(&self.direction);
        let c = offset.magnitude_squared() - radius * radius;
        let discriminant = b * b - c;
        // also rejects NaN from a non-finite center
        if !(discriminant >= 0.0) {
            return None;
        }

        let root = discriminant.sqrt();
        let (near, far) = (-b - root, -b + root);
        if far < 0.0 {
            None
        } else if near < 0.0 {
            Some(far)
        } else {
            Some(near)
        }
    }

    /// Möller–Trumbore intersection, accepting hits from either side
    pub fn intersect_triangle(&self, a: &WorldPoint, b: &WorldPoint, c: &WorldPoint) -> Option<f64> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(&edge2);
        let det = edge1.dot(&p);
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = self.direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(&q) * inv_det;
        (t >= 0.0 && t.is_finite()).then_some(t)
    }
}
