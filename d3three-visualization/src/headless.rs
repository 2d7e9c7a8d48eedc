//! In-memory renderer

use crate::camera::Camera;
use crate::material::{Color, Material};
use crate::renderer::{Geometry, ObjectId, Renderer, SceneObject};
use d3three_core::{Error, Result, TriangleMesh, WorldPoint};
use std::collections::BTreeMap;

/// Text size of labels, in scene units
pub const LABEL_SIZE: f64 = 5.0;

/// Keeps scene objects in memory and counts frames instead of drawing.
///
/// Used by tests and the command-line front end, and as a reference for
/// host backends.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    objects: BTreeMap<ObjectId, SceneObject>,
    /// Attached objects in the order they were added
    scene: Vec<ObjectId>,
    next_id: u64,
    frames: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    /// Objects currently attached to the scene
    pub fn scene_objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.scene
            .iter()
            .filter_map(|id| self.objects.get(id).map(|object| (*id, object)))
    }

    pub fn in_scene(&self, id: ObjectId) -> bool {
        self.scene.contains(&id)
    }

    /// Number of live objects, attached or not
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn create_point_mesh(&mut self, radius: f64, material: Material) -> ObjectId {
        self.insert(SceneObject::new(Geometry::Sphere { radius }, material))
    }

    fn create_line_segment(&mut self, points: Vec<WorldPoint>, material: Material) -> ObjectId {
        self.insert(SceneObject::new(Geometry::Line { points }, material))
    }

    fn create_surface_mesh(&mut self, mesh: TriangleMesh, material: Material) -> ObjectId {
        self.insert(SceneObject::new(Geometry::Surface { mesh }, material))
    }

    fn create_label(&mut self, text: &str, position: WorldPoint) -> ObjectId {
        let mut label = SceneObject::new(
            Geometry::Label {
                text: text.to_string(),
                size: LABEL_SIZE,
            },
            Material::new(Color::LIGHT_GRAY),
        );
        label.position = position;
        self.insert(label)
    }

    fn add_to_scene(&mut self, id: ObjectId) -> Result<()> {
        if !self.objects.contains_key(&id) {
            return Err(Error::Visualization(format!("cannot add unknown object {id}")));
        }
        if !self.scene.contains(&id) {
            self.scene.push(id);
        }
        Ok(())
    }

    fn remove_from_scene(&mut self, id: ObjectId) -> Result<()> {
        self.objects
            .remove(&id)
            .ok_or_else(|| Error::Visualization(format!("cannot remove unknown object {id}")))?;
        self.scene.retain(|attached| *attached != id);
        Ok(())
    }

    fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    fn render(&mut self, camera: &Camera) -> Result<()> {
        self.frames += 1;
        log::trace!(
            target: "d3three",
            "frame {}: {} visible objects, camera at {:?}",
            self.frames,
            self.scene_objects().filter(|(_, o)| o.visible).count(),
            camera.position
        );
        Ok(())
    }
}
