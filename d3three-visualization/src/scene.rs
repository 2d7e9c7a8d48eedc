//! Scene context, scenes and the scene manager
//!
//! A [`SceneContext`] owns everything charts share: the renderer, the
//! camera, the viewport and the axis registry. A [`Scene`] adds the charts
//! drawn into it, and the [`SceneManager`] drives every scene it owns one
//! frame per [`SceneManager::tick`].

use crate::axis_geometry::{AxisLayout, AxisObjects};
use crate::camera::Camera;
use crate::chart::Chart;
use crate::picking::{pointer_ray, PickOutcome, PointerEvent, Viewport};
use crate::ray::Ray;
use crate::renderer::{ObjectId, Renderer};
use crate::tooltip::TooltipSink;
use d3three_core::{DataPoint, Error, Result};
use d3three_scale::{AxisRegistry, AxisScale, DEFAULT_CHART_OFFSET};

/// Shared state of one scene
#[derive(Debug)]
pub struct SceneContext<R: Renderer> {
    renderer: R,
    camera: Camera,
    viewport: Viewport,
    axes: AxisRegistry,
    axis_objects: Vec<AxisObjects>,
    vertical_offset: f64,
}

impl<R: Renderer> SceneContext<R> {
    /// Context with the default chart camera, fitted to `viewport`
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        let mut camera = Camera::default();
        camera.set_aspect(viewport.width, viewport.height);
        Self {
            renderer,
            camera,
            viewport,
            axes: AxisRegistry::new(),
            axis_objects: Vec::new(),
            vertical_offset: DEFAULT_CHART_OFFSET,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the drawing surface; the camera aspect follows
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn axes(&self) -> &AxisRegistry {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut AxisRegistry {
        &mut self.axes
    }

    /// Register an axis under its orientation
    pub fn register_axis(&mut self, axis: AxisScale) -> Option<AxisScale> {
        self.axes.register(axis)
    }

    /// Axis registry and renderer borrowed together
    pub fn axes_and_renderer(&mut self) -> (&AxisRegistry, &mut R) {
        (&self.axes, &mut self.renderer)
    }

    /// Vertical offset added to every mapped point
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub fn set_vertical_offset(&mut self, offset: f64) {
        self.vertical_offset = offset;
    }

    /// Pick ray under the pointer, if the camera can be inverted
    pub fn pointer_ray(&self, event: &PointerEvent) -> Option<Ray> {
        pointer_ray(&self.renderer, &self.camera, &self.viewport, event)
    }

    /// Draw all three axes, replacing any previously drawn
    pub fn render_axes(&mut self) -> Result<()> {
        for objects in std::mem::take(&mut self.axis_objects) {
            objects.remove(&mut self.renderer)?;
        }
        let axes = self.axes.axes()?;
        for layout in AxisLayout::all(axes, self.vertical_offset) {
            let objects = layout.render(&mut self.renderer)?;
            self.axis_objects.push(objects);
        }
        Ok(())
    }

    pub fn axis_objects(&self) -> &[AxisObjects] {
        &self.axis_objects
    }

    /// Tick labels of every drawn axis
    pub fn labels(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.axis_objects.iter().flat_map(|axis| axis.labels.iter().copied())
    }

    /// Turn every label to face the camera
    pub fn billboard_labels(&mut self) {
        let yaw = self.camera.label_yaw();
        let labels: Vec<ObjectId> = self.labels().collect();
        for id in labels {
            if let Some(label) = self.renderer.object_mut(id) {
                label.rotation_y = yaw;
            }
        }
    }

    /// Draw one frame
    pub fn render_frame(&mut self) -> Result<()> {
        self.renderer.render(&self.camera)?;
        self.billboard_labels();
        Ok(())
    }
}

/// Handle to a chart inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(pub usize);

/// A scene context and the charts drawn into it
pub struct Scene<R: Renderer> {
    context: SceneContext<R>,
    charts: Vec<Box<dyn Chart<R>>>,
}

impl<R: Renderer> Scene<R> {
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self::from_context(SceneContext::new(renderer, viewport))
    }

    pub fn from_context(context: SceneContext<R>) -> Self {
        Self {
            context,
            charts: Vec::new(),
        }
    }

    pub fn context(&self) -> &SceneContext<R> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SceneContext<R> {
        &mut self.context
    }

    pub fn add_chart(&mut self, chart: impl Chart<R> + 'static) -> ChartId {
        self.charts.push(Box::new(chart));
        ChartId(self.charts.len() - 1)
    }

    pub fn chart(&self, id: ChartId) -> Option<&dyn Chart<R>> {
        self.charts.get(id.0).map(|chart| chart.as_ref())
    }

    /// Mutable access, e.g. to `configure` a chart before its next render
    pub fn chart_mut(&mut self, id: ChartId) -> Option<&mut dyn Chart<R>> {
        let chart = self.charts.get_mut(id.0)?;
        Some(chart.as_mut())
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Render `data` with one chart
    pub fn render_chart(&mut self, id: ChartId, data: &[DataPoint]) -> Result<()> {
        let chart = self
            .charts
            .get_mut(id.0)
            .ok_or_else(|| Error::Visualization(format!("no chart with index {}", id.0)))?;
        chart.render(&mut self.context, data)
    }

    /// Forward a pointer move to every chart, in the order they were added
    pub fn pointer_move(&mut self, event: &PointerEvent, tooltip: &mut dyn TooltipSink) -> Vec<PickOutcome> {
        self.charts
            .iter_mut()
            .map(|chart| chart.on_pointer_move(&mut self.context, event, tooltip))
            .collect()
    }
}

/// Handle to a scene inside a [`SceneManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub usize);

/// Owns scenes and draws them
pub struct SceneManager<R: Renderer> {
    scenes: Vec<Scene<R>>,
}

impl<R: Renderer> Default for SceneManager<R> {
    fn default() -> Self {
        Self { scenes: Vec::new() }
    }
}

impl<R: Renderer> SceneManager<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scene(&mut self, scene: Scene<R>) -> SceneId {
        self.scenes.push(scene);
        SceneId(self.scenes.len() - 1)
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene<R>> {
        self.scenes.get(id.0)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene<R>> {
        self.scenes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Draw one frame of every scene and turn its labels to the camera
    pub fn tick(&mut self) -> Result<()> {
        for scene in &mut self.scenes {
            scene.context.render_frame()?;
        }
        Ok(())
    }
}
