//! Axis lines, tick marks and tick labels
//!
//! Layout is computed from the axis registry alone, so it does not depend
//! on the order axes are drawn in. All three axes meet at the corner of the
//! chart floor, `(-yShift, offset, -xShift)`; the vertical axis stands at
//! the far end of the y axis.

use crate::material::{Color, Material};
use crate::renderer::{ObjectId, Renderer};
use d3three_core::{Orientation, Result, Value, WorldPoint, WorldVector};
use d3three_scale::AxisSet;

pub const AXIS_COLOR: Color = Color::LIGHT_GRAY;
pub const AXIS_LINE_WIDTH: f64 = 2.0;
pub const TICK_LINE_WIDTH: f64 = 1.0;
pub const TICK_LENGTH: f64 = 10.0;
/// Distance from the axis line to a tick label
pub const LABEL_OFFSET: f64 = 20.0;

/// One tick of a laid-out axis
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub value: Value,
    pub label: String,
    /// Point on the axis line
    pub start: WorldPoint,
    /// Outer end of the tick mark
    pub end: WorldPoint,
    pub label_position: WorldPoint,
}

/// World-space geometry of one axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub orientation: Orientation,
    /// Axis line, through every tick position
    pub line: Vec<WorldPoint>,
    pub ticks: Vec<TickMark>,
}

impl AxisLayout {
    /// Lay out the axis for `orientation`
    pub fn new(axes: AxisSet<'_>, orientation: Orientation, vertical_offset: f64) -> Self {
        let x_shift = axes.x.rotation_shift();
        let y_shift = axes.y.rotation_shift();
        let y_far_end = (axes.y.interval() * axes.y.ticks().len().saturating_sub(1) as f64).max(0.0);

        let axis = axes.get(orientation);
        let interval = axis.interval();

        // position of tick i, and the direction its mark points in
        let (origin, step, outward) = match orientation {
            Orientation::Y => (
                WorldPoint::new(-y_shift, vertical_offset, -x_shift),
                WorldVector::x(),
                -WorldVector::y(),
            ),
            Orientation::Z => (
                WorldPoint::new(y_far_end - y_shift, vertical_offset, -x_shift),
                WorldVector::y(),
                WorldVector::x(),
            ),
            Orientation::X => (
                WorldPoint::new(-y_shift, vertical_offset, -x_shift),
                WorldVector::z(),
                -WorldVector::y(),
            ),
        };

        let ticks: Vec<TickMark> = axis
            .ticks()
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let start = origin + step * (i as f64 * interval);
                TickMark {
                    label: axis.tick_format(&value),
                    value,
                    start,
                    end: start + outward * TICK_LENGTH,
                    label_position: start + outward * LABEL_OFFSET,
                }
            })
            .collect();

        Self {
            orientation,
            line: ticks.iter().map(|t| t.start).collect(),
            ticks,
        }
    }

    /// Layouts of all three axes, in x, y, z order
    pub fn all(axes: AxisSet<'_>, vertical_offset: f64) -> [AxisLayout; 3] {
        Orientation::ALL.map(|o| AxisLayout::new(axes, o, vertical_offset))
    }

    /// Create the axis objects and add them to the scene
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<AxisObjects> {
        let line = renderer.create_line_segment(
            self.line.clone(),
            Material::new(AXIS_COLOR).with_line_width(AXIS_LINE_WIDTH),
        );
        renderer.add_to_scene(line)?;

        let mut ticks = Vec::with_capacity(self.ticks.len());
        let mut labels = Vec::with_capacity(self.ticks.len());
        for tick in &self.ticks {
            let mark = renderer.create_line_segment(
                vec![tick.start, tick.end],
                Material::new(AXIS_COLOR).with_line_width(TICK_LINE_WIDTH),
            );
            renderer.add_to_scene(mark)?;
            ticks.push(mark);

            let label = renderer.create_label(&tick.label, tick.label_position);
            if let Some(object) = renderer.object_mut(label) {
                object.material = Material::new(AXIS_COLOR);
            }
            renderer.add_to_scene(label)?;
            labels.push(label);
        }

        log::debug!(
            target: "d3three",
            "rendered {} axis with {} ticks",
            self.orientation,
            self.ticks.len()
        );
        Ok(AxisObjects {
            orientation: self.orientation,
            line,
            ticks,
            labels,
        })
    }
}

/// Scene objects making up one rendered axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisObjects {
    pub orientation: Orientation,
    pub line: ObjectId,
    pub ticks: Vec<ObjectId>,
    pub labels: Vec<ObjectId>,
}

impl AxisObjects {
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::once(self.line)
            .chain(self.ticks.iter().copied())
            .chain(self.labels.iter().copied())
    }

    pub fn remove<R: Renderer + ?Sized>(self, renderer: &mut R) -> Result<()> {
        for id in self.ids() {
            renderer.remove_from_scene(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessRenderer;
    use crate::renderer::Geometry;
    use d3three_scale::{AxisRegistry, AxisScale, LinearScale, OrdinalScale};

    fn registry() -> AxisRegistry {
        let mut registry = AxisRegistry::new();
        // 3 ticks, interval 50, shift 50
        registry.register(
            AxisScale::new(Orientation::X)
                .with_scale(LinearScale::new().with_domain([0.0, 2.0]).with_range([0.0, 100.0]).with_tick_count(2)),
        );
        // 4 points, interval 20, shift 30
        registry.register(
            AxisScale::new(Orientation::Y)
                .with_scale(OrdinalScale::new(["a", "b", "c", "d"]).with_range_points([0.0, 60.0], 0.0)),
        );
        registry.register(
            AxisScale::new(Orientation::Z)
                .with_scale(LinearScale::new().with_range([0.0, 10.0]).with_tick_count(1))
                .with_tick_format(|v| format!("{v}m")),
        );
        registry
    }

    #[test]
    fn test_y_axis_runs_along_world_x() {
        let registry = registry();
        let layout = AxisLayout::new(registry.axes().unwrap(), Orientation::Y, 0.0);

        assert_eq!(layout.line.len(), 4);
        assert_eq!(layout.line[0], WorldPoint::new(-30.0, 0.0, -50.0));
        assert_eq!(layout.line[3], WorldPoint::new(30.0, 0.0, -50.0));

        let tick = &layout.ticks[1];
        assert_eq!(tick.label, "b");
        assert_eq!(tick.end, WorldPoint::new(-10.0, -10.0, -50.0));
        assert_eq!(tick.label_position, WorldPoint::new(-10.0, -20.0, -50.0));
    }

    #[test]
    fn test_x_axis_runs_along_world_z() {
        let registry = registry();
        let layout = AxisLayout::new(registry.axes().unwrap(), Orientation::X, 5.0);

        let labels: Vec<&str> = layout.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "1", "2"]);
        assert_eq!(layout.line[2], WorldPoint::new(-30.0, 5.0, 50.0));
        assert_eq!(layout.ticks[2].label_position, WorldPoint::new(-30.0, -15.0, 50.0));
    }

    #[test]
    fn test_z_axis_stands_at_far_end_of_y() {
        let registry = registry();
        let layout = AxisLayout::new(registry.axes().unwrap(), Orientation::Z, 0.0);

        // far end of y is 3 * 20 = 60, shifted by 30
        let top = layout.ticks.last().unwrap();
        assert_eq!(top.start, WorldPoint::new(30.0, 10.0, -50.0));
        assert_eq!(top.end, WorldPoint::new(40.0, 10.0, -50.0));
        assert_eq!(top.label_position, WorldPoint::new(50.0, 10.0, -50.0));
        assert_eq!(top.label, "1m");
    }

    #[test]
    fn test_render_creates_line_ticks_and_labels() {
        let registry = registry();
        let mut renderer = HeadlessRenderer::new();
        let objects = AxisLayout::new(registry.axes().unwrap(), Orientation::Y, 0.0)
            .render(&mut renderer)
            .unwrap();

        assert_eq!(objects.ticks.len(), 4);
        assert_eq!(objects.labels.len(), 4);
        assert_eq!(renderer.scene_objects().count(), 9);

        let line = renderer.object(objects.line).unwrap();
        assert_eq!(line.material.line_width, AXIS_LINE_WIDTH);
        assert_eq!(line.material.color, AXIS_COLOR);
        match &renderer.object(objects.labels[2]).unwrap().geometry {
            Geometry::Label { text, .. } => assert_eq!(text, "c"),
            other => panic!("expected a label, got {other:?}"),
        }

        objects.remove(&mut renderer).unwrap();
        assert_eq!(renderer.object_count(), 0);
    }
}
