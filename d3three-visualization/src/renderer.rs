//! Rendering capability consumed by charts
//!
//! Charts never talk to a graphics API directly. They create and mutate
//! [`SceneObject`]s through a [`Renderer`]; a host backend turns those into
//! draw calls, while [`crate::HeadlessRenderer`] keeps them in memory.

use crate::camera::Camera;
use crate::material::Material;
use crate::picking::HighlightState;
use crate::ray::{Hit, Ray};
use d3three_core::{DataPoint, Drawable, Result, TriangleMesh, WorldPoint};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Handle to an object owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape of a scene object, in object-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Sphere centered on the object position
    Sphere { radius: f64 },
    /// Polyline through the given points
    Line { points: Vec<WorldPoint> },
    /// Triangle surface
    Surface { mesh: TriangleMesh },
    /// Text label anchored at the object position
    Label { text: String, size: f64 },
}

/// Everything a renderer needs to know to draw one object
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub geometry: Geometry,
    pub position: WorldPoint,
    /// Rotation about world-y, in radians
    pub rotation_y: f64,
    pub material: Material,
    pub visible: bool,
    pub highlight: HighlightState,
    /// Datum the object was bound to, if any
    pub user_data: Option<DataPoint>,
}

impl SceneObject {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            position: WorldPoint::origin(),
            rotation_y: 0.0,
            material,
            visible: true,
            highlight: HighlightState::Normal,
            user_data: None,
        }
    }

    /// Switch highlight state; the material opacity follows it
    pub fn set_highlight(&mut self, state: HighlightState) {
        self.highlight = state;
        self.material.opacity = state.opacity();
    }

    /// Nearest intersection of `ray` with this object, as (distance, face).
    ///
    /// Hidden objects, lines and labels are never hit.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, Option<usize>)> {
        if !self.visible {
            return None;
        }
        match &self.geometry {
            Geometry::Sphere { radius } => ray.intersect_sphere(&self.position, *radius).map(|d| (d, None)),
            Geometry::Surface { mesh } => {
                let offset = self.position.coords;
                // bounding sphere first; most pointer rays miss the surface
                let (min, max) = mesh.bounding_box();
                if ray.distance_to_point(&(mesh.center() + offset)) > (max - min).magnitude() / 2.0 {
                    return None;
                }
                (0..mesh.face_count())
                    .filter_map(|face| {
                        let [a, b, c] = mesh.face_vertices(face)?.map(|v| v + offset);
                        ray.intersect_triangle(&a, &b, &c).map(|d| (d, Some(face)))
                    })
                    .min_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal))
            }
            Geometry::Line { .. } | Geometry::Label { .. } => None,
        }
    }
}

/// Scene-graph operations a rendering backend provides
pub trait Renderer {
    /// Create a sphere marker; it is not part of the scene until added
    fn create_point_mesh(&mut self, radius: f64, material: Material) -> ObjectId;

    fn create_line_segment(&mut self, points: Vec<WorldPoint>, material: Material) -> ObjectId;

    fn create_surface_mesh(&mut self, mesh: TriangleMesh, material: Material) -> ObjectId;

    fn create_label(&mut self, text: &str, position: WorldPoint) -> ObjectId;

    fn add_to_scene(&mut self, id: ObjectId) -> Result<()>;

    /// Detach and release an object
    fn remove_from_scene(&mut self, id: ObjectId) -> Result<()>;

    fn object(&self, id: ObjectId) -> Option<&SceneObject>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject>;

    /// Draw one frame from `camera`
    fn render(&mut self, camera: &Camera) -> Result<()>;

    /// Intersect `ray` with `candidates`, nearest hit first
    fn raycast(&self, ray: &Ray, candidates: &[ObjectId]) -> Vec<Hit> {
        let mut hits: Vec<Hit> = candidates
            .iter()
            .filter_map(|&id| {
                let (distance, face) = self.object(id)?.intersect(ray)?;
                Some(Hit {
                    object: id,
                    distance,
                    point: ray.at(distance),
                    face,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        hits
    }

    /// World position of an NDC point as seen by `camera`
    fn unproject(&self, ndc: &WorldPoint, camera: &Camera) -> Option<WorldPoint> {
        camera.unproject(ndc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use d3three_core::WorldVector;

    fn down_from(x: f64, z: f64) -> Ray {
        Ray::new(WorldPoint::new(x, 10.0, z), -WorldVector::y()).unwrap()
    }

    #[test]
    fn test_hidden_objects_are_not_hit() {
        let mut sphere = SceneObject::new(Geometry::Sphere { radius: 1.0 }, Material::default());
        assert!(sphere.intersect(&down_from(0.0, 0.0)).is_some());
        sphere.visible = false;
        assert!(sphere.intersect(&down_from(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_surface_reports_nearest_face() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                WorldPoint::new(-1.0, 0.0, -1.0),
                WorldPoint::new(1.0, 0.0, -1.0),
                WorldPoint::new(0.0, 0.0, 1.0),
                WorldPoint::new(-1.0, 2.0, -1.0),
                WorldPoint::new(1.0, 2.0, -1.0),
                WorldPoint::new(0.0, 2.0, 1.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        let mut surface = SceneObject::new(Geometry::Surface { mesh }, Material::default());
        assert_eq!(surface.intersect(&down_from(0.0, 0.0)), Some((8.0, Some(1))));

        surface.position = WorldPoint::new(10.0, 0.0, 0.0);
        assert_eq!(surface.intersect(&down_from(0.0, 0.0)), None);
        assert_eq!(surface.intersect(&down_from(10.0, 0.0)), Some((8.0, Some(1))));
    }

    #[test]
    fn test_dangling_face_is_skipped() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                WorldPoint::new(-1.0, 0.0, -1.0),
                WorldPoint::new(1.0, 0.0, -1.0),
                WorldPoint::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 1, 7], [0, 1, 2]],
        );
        let surface = SceneObject::new(Geometry::Surface { mesh }, Material::default());
        assert_eq!(surface.intersect(&down_from(0.0, 0.0)), Some((10.0, Some(1))));
    }

    #[test]
    fn test_lines_and_labels_are_not_pickable() {
        let line = SceneObject::new(
            Geometry::Line {
                points: vec![WorldPoint::new(0.0, 0.0, 0.0), WorldPoint::new(0.0, 20.0, 0.0)],
            },
            Material::new(Color::LIGHT_GRAY),
        );
        assert!(line.intersect(&down_from(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_highlight_sets_opacity() {
        let mut object = SceneObject::new(Geometry::Sphere { radius: 1.0 }, Material::default());
        object.set_highlight(HighlightState::Highlighted);
        assert_eq!(object.material.opacity, 0.5);
        object.set_highlight(HighlightState::Normal);
        assert_eq!(object.material.opacity, 1.0);
    }
}
