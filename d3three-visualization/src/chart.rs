//! Scatter and surface charts

use crate::binding::{Selection, Setter};
use crate::material::{Color, Material};
use crate::picking::{PickOutcome, PickingController, PointerEvent};
use crate::renderer::{Geometry, ObjectId, Renderer, SceneObject};
use crate::scene::SceneContext;
use crate::tooltip::{TooltipPayload, TooltipSink};
use d3three_core::{DataPoint, PointCloud, Result, WorldPoint};
use d3three_reconstruction::SurfaceReconstructor;
use d3three_scale::CoordinateMapper;
use serde::{Deserialize, Serialize};

/// Appearance shared by all chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Marker color for scatter charts, surface color for surface charts
    pub color: Color,
    /// Marker color for surface charts
    pub point_color: Option<Color>,
    pub point_radius: f64,
}

impl ChartConfig {
    pub fn scatter() -> Self {
        Self {
            color: Color::STEEL_BLUE,
            point_color: None,
            point_radius: 5.0,
        }
    }

    pub fn surface() -> Self {
        Self {
            color: Color::STEEL_BLUE,
            point_color: Some(Color::ORANGE),
            point_radius: 2.0,
        }
    }

    /// Overwrite the keys `update` sets; the rest keep their values
    pub fn merge(&mut self, update: ChartConfigUpdate) {
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(point_color) = update.point_color {
            self.point_color = Some(point_color);
        }
        if let Some(point_radius) = update.point_radius {
            self.point_radius = point_radius;
        }
    }

    fn marker_color(&self) -> Color {
        self.point_color.unwrap_or(self.color)
    }
}

/// Partial chart configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfigUpdate {
    pub color: Option<Color>,
    pub point_color: Option<Color>,
    pub point_radius: Option<f64>,
}

/// A datum together with its world position
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub datum: DataPoint,
    pub position: WorldPoint,
}

/// Renderer-independent chart state
pub trait ChartState {
    fn config(&self) -> &ChartConfig;

    /// Merge `update` into the configuration; applies on the next render
    fn configure(&mut self, update: ChartConfigUpdate);

    /// Marker objects, in data order
    fn markers(&self) -> &[ObjectId];

    /// Marker currently under the pointer
    fn hovered(&self) -> Option<ObjectId>;
}

/// A chart drawn into a scene
pub trait Chart<R: Renderer>: ChartState {
    /// Map `data` through the scene axes and (re)build the chart geometry
    fn render(&mut self, ctx: &mut SceneContext<R>, data: &[DataPoint]) -> Result<()>;

    /// Update highlight state and the tooltip for a pointer move
    fn on_pointer_move(
        &mut self,
        ctx: &mut SceneContext<R>,
        event: &PointerEvent,
        tooltip: &mut dyn TooltipSink,
    ) -> PickOutcome;
}

fn map_markers<R: Renderer>(ctx: &SceneContext<R>, data: &[DataPoint]) -> Result<Vec<Marker>> {
    let mapper = CoordinateMapper::new(ctx.axes())?.with_vertical_offset(ctx.vertical_offset());
    Ok(mapper
        .map_all(data)
        .into_iter()
        .map(|mapped| Marker {
            datum: data[mapped.index].clone(),
            position: mapped.position,
        })
        .collect())
}

/// Rebind marker spheres to `markers`; every attribute is rewritten
fn bind_markers<R: Renderer>(
    renderer: &mut R,
    previous: Selection<Marker>,
    markers: Vec<Marker>,
    radius: f64,
    material: Material,
    visible: bool,
) -> Result<Selection<Marker>> {
    let mut setters: Vec<Setter<Marker>> = Vec::new();
    setters.push(Box::new(|object: &mut SceneObject, marker: &Marker| {
        object.position = marker.position
    }));
    setters.push(Box::new(|object: &mut SceneObject, marker: &Marker| {
        object.user_data = Some(marker.datum.clone())
    }));
    setters.push(Box::new(move |object: &mut SceneObject, _: &Marker| {
        object.geometry = Geometry::Sphere { radius };
        object.material = material;
        object.visible = visible;
        object.highlight = Default::default();
    }));

    previous
        .data(markers)
        .apply(renderer, |r, _| r.create_point_mesh(radius, material), &setters)
}

fn hide_tooltip(tooltip: &mut dyn TooltipSink, reason: &dyn std::fmt::Display) -> PickOutcome {
    log::warn!(target: "d3three", "pointer event ignored: {reason}");
    tooltip.update(TooltipPayload::hidden());
    PickOutcome::Miss
}

/// One sphere marker per datum
#[derive(Debug, Clone)]
pub struct ScatterChart {
    config: ChartConfig,
    markers: Selection<Marker>,
    picking: PickingController,
}

impl ScatterChart {
    pub fn new() -> Self {
        Self {
            config: ChartConfig::scatter(),
            markers: Selection::new(),
            picking: PickingController::new(),
        }
    }
}

impl Default for ScatterChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartState for ScatterChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn configure(&mut self, update: ChartConfigUpdate) {
        self.config.merge(update);
    }

    fn markers(&self) -> &[ObjectId] {
        self.markers.ids()
    }

    fn hovered(&self) -> Option<ObjectId> {
        self.picking.hovered()
    }
}

impl<R: Renderer> Chart<R> for ScatterChart {
    fn render(&mut self, ctx: &mut SceneContext<R>, data: &[DataPoint]) -> Result<()> {
        let markers = map_markers(ctx, data)?;
        self.markers = bind_markers(
            ctx.renderer_mut(),
            self.markers.clone(),
            markers,
            self.config.point_radius,
            Material::new(self.config.color),
            true,
        )?;
        log::debug!(target: "d3three", "scatter chart rendered {} markers", self.markers.len());
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut SceneContext<R>,
        event: &PointerEvent,
        tooltip: &mut dyn TooltipSink,
    ) -> PickOutcome {
        let ray = ctx.pointer_ray(event);
        let (registry, renderer) = ctx.axes_and_renderer();
        let axes = match registry.axes() {
            Ok(axes) => axes,
            Err(e) => return hide_tooltip(tooltip, &e),
        };
        self.picking
            .pick_markers(renderer, axes, ray.as_ref(), self.markers.ids(), event, tooltip)
    }
}

/// A triangulated surface through the data, with markers that appear
/// while the pointer is over the surface
#[derive(Debug, Clone)]
pub struct SurfaceChart {
    config: ChartConfig,
    reconstructor: SurfaceReconstructor,
    markers: Selection<Marker>,
    surface: Option<ObjectId>,
    picking: PickingController,
}

impl SurfaceChart {
    pub fn new() -> Self {
        Self {
            config: ChartConfig::surface(),
            reconstructor: SurfaceReconstructor::new(),
            markers: Selection::new(),
            surface: None,
            picking: PickingController::new(),
        }
    }

    pub fn with_reconstructor(mut self, reconstructor: SurfaceReconstructor) -> Self {
        self.reconstructor = reconstructor;
        self
    }

    /// Surface mesh object, once rendered
    pub fn surface(&self) -> Option<ObjectId> {
        self.surface
    }
}

impl Default for SurfaceChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartState for SurfaceChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn configure(&mut self, update: ChartConfigUpdate) {
        self.config.merge(update);
    }

    fn markers(&self) -> &[ObjectId] {
        self.markers.ids()
    }

    fn hovered(&self) -> Option<ObjectId> {
        self.picking.hovered()
    }
}

impl<R: Renderer> Chart<R> for SurfaceChart {
    fn render(&mut self, ctx: &mut SceneContext<R>, data: &[DataPoint]) -> Result<()> {
        let markers = map_markers(ctx, data)?;
        let cloud: PointCloud<WorldPoint> = markers.iter().map(|m| m.position).collect();
        let mesh = self.reconstructor.reconstruct(&cloud)?;

        let renderer = ctx.renderer_mut();
        self.markers = bind_markers(
            renderer,
            self.markers.clone(),
            markers,
            self.config.point_radius,
            Material::new(self.config.marker_color()),
            false,
        )?;

        if let Some(old) = self.surface.take().filter(|&old| renderer.object(old).is_some()) {
            renderer.remove_from_scene(old)?;
        }
        let face_count = mesh.face_count();
        let surface = renderer.create_surface_mesh(mesh, Material::new(self.config.color));
        renderer.add_to_scene(surface)?;
        self.surface = Some(surface);

        log::debug!(
            target: "d3three",
            "surface chart rendered {} markers, {} faces",
            self.markers.len(),
            face_count
        );
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut SceneContext<R>,
        event: &PointerEvent,
        tooltip: &mut dyn TooltipSink,
    ) -> PickOutcome {
        let ray = ctx.pointer_ray(event);
        let (registry, renderer) = ctx.axes_and_renderer();
        let axes = match registry.axes() {
            Ok(axes) => axes,
            Err(e) => return hide_tooltip(tooltip, &e),
        };
        self.picking.pick_surface(
            renderer,
            axes,
            ray.as_ref(),
            self.surface,
            self.markers.ids(),
            event,
            tooltip,
        )
    }
}
