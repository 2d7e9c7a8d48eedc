//! Pointer picking and marker highlighting
//!
//! Every pointer move recomputes the pick state from scratch: all markers
//! are reset to [`HighlightState::Normal`] before the nearest hit, if any,
//! is highlighted. Surface charts gate marker picking on the pointer being
//! over the surface; off the surface every marker is hidden.

use crate::camera::Camera;
use crate::ray::Ray;
use crate::renderer::{ObjectId, Renderer};
use crate::tooltip::{tooltip_html, TooltipPayload, TooltipSink};
use d3three_core::WorldPoint;
use d3three_scale::AxisSet;
use serde::{Deserialize, Serialize};

/// Opacity of a marker under the pointer
pub const HIGHLIGHT_OPACITY: f64 = 0.5;

/// Per-marker highlight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Normal,
    Highlighted,
}

impl HighlightState {
    pub fn opacity(self) -> f64 {
        match self {
            HighlightState::Normal => 1.0,
            HighlightState::Highlighted => HIGHLIGHT_OPACITY,
        }
    }
}

/// Position and size of the drawing surface in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Normalized device coordinates of a pointer on the far plane, or
    /// `None` for an empty viewport
    pub fn to_ndc(&self, event: &PointerEvent) -> Option<WorldPoint> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = (event.client_x - self.left) / self.width * 2.0 - 1.0;
        let y = 1.0 - (event.client_y - self.top) / self.height * 2.0;
        Some(WorldPoint::new(x, y, 1.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A pointer position in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Result of handling one pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "object", rename_all = "snake_case")]
pub enum PickOutcome {
    /// No marker under the pointer
    Miss,
    /// The pointer is off the surface; markers were hidden
    SurfaceMiss,
    /// The given marker is highlighted
    Hit(ObjectId),
}

/// World-space pick ray for a pointer event
pub fn pointer_ray<R: Renderer + ?Sized>(
    renderer: &R,
    camera: &Camera,
    viewport: &Viewport,
    event: &PointerEvent,
) -> Option<Ray> {
    let ndc = viewport.to_ndc(event)?;
    let target = renderer.unproject(&ndc, camera)?;
    Ray::towards(camera.position, target)
}

/// Tracks the hovered marker of one chart
#[derive(Debug, Clone, Default)]
pub struct PickingController {
    hovered: Option<ObjectId>,
}

impl PickingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Highlight the nearest marker under `ray` and describe it in the
    /// tooltip; with no hit, everything is reset and the tooltip hidden.
    pub fn pick_markers<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        axes: AxisSet<'_>,
        ray: Option<&Ray>,
        markers: &[ObjectId],
        event: &PointerEvent,
        tooltip: &mut dyn TooltipSink,
    ) -> PickOutcome {
        let nearest = ray.and_then(|ray| renderer.raycast(ray, markers).into_iter().next());

        for &id in markers {
            if let Some(object) = renderer.object_mut(id) {
                object.set_highlight(HighlightState::Normal);
            }
        }

        let Some(hit) = nearest else {
            log::trace!(target: "d3three", "pointer ({}, {}) hit no marker", event.client_x, event.client_y);
            self.hovered = None;
            tooltip.update(TooltipPayload::hidden());
            return PickOutcome::Miss;
        };

        let datum = renderer.object_mut(hit.object).and_then(|object| {
            object.set_highlight(HighlightState::Highlighted);
            object.user_data.clone()
        });
        log::trace!(target: "d3three", "pointer hit marker {} at distance {:.3}", hit.object, hit.distance);
        self.hovered = Some(hit.object);

        match datum {
            Some(datum) => tooltip.update(TooltipPayload::near_pointer(
                tooltip_html(&datum, axes),
                event.client_x,
                event.client_y,
            )),
            None => tooltip.update(TooltipPayload::hidden()),
        }
        PickOutcome::Hit(hit.object)
    }

    /// Surface-gated picking: markers are only shown, and pickable, while
    /// the pointer is over the surface.
    #[allow(clippy::too_many_arguments)]
    pub fn pick_surface<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        axes: AxisSet<'_>,
        ray: Option<&Ray>,
        surface: Option<ObjectId>,
        markers: &[ObjectId],
        event: &PointerEvent,
        tooltip: &mut dyn TooltipSink,
    ) -> PickOutcome {
        let over_surface = match (ray, surface) {
            (Some(ray), Some(surface)) => !renderer.raycast(ray, &[surface]).is_empty(),
            _ => false,
        };

        for &id in markers {
            if let Some(object) = renderer.object_mut(id) {
                object.visible = over_surface;
            }
        }

        if !over_surface {
            log::trace!(target: "d3three", "pointer ({}, {}) is off the surface", event.client_x, event.client_y);
            self.hovered = None;
            tooltip.update(TooltipPayload::hidden());
            return PickOutcome::SurfaceMiss;
        }

        self.pick_markers(renderer, axes, ray, markers, event, tooltip)
    }
}
