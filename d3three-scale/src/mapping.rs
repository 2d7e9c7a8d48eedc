//! Data-space to world-space coordinate mapping
//!
//! Data axes are permuted onto world axes so that data-z is vertical:
//!
//! | data | world |
//! |------|-------|
//! | x    | z     |
//! | y    | x     |
//! | z    | y     |
//!
//! The two horizontal world coordinates are centered on the origin by
//! subtracting their axis' rotation shift; the vertical coordinate is
//! offset by the chart offset.

use crate::registry::{AxisRegistry, AxisSet};
use d3three_core::{DataPoint, Result, WorldPoint};

/// Vertical offset applied to every chart
pub const DEFAULT_CHART_OFFSET: f64 = 0.0;

/// A datum that was successfully placed in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    /// Index of the datum in the input dataset
    pub index: usize,
    pub position: WorldPoint,
}

/// Maps data points into world space for one render pass.
///
/// Shifts are read once at construction, so every point of a pass is
/// mapped with identical offsets.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    axes: AxisSet<'a>,
    x_shift: f64,
    y_shift: f64,
    vertical_offset: f64,
}

impl<'a> CoordinateMapper<'a> {
    /// Mapper over a registry; all three axes must be registered
    pub fn new(registry: &'a AxisRegistry) -> Result<Self> {
        Ok(Self::from_axes(registry.axes()?))
    }

    pub fn from_axes(axes: AxisSet<'a>) -> Self {
        Self {
            axes,
            x_shift: axes.x.rotation_shift(),
            y_shift: axes.y.rotation_shift(),
            vertical_offset: DEFAULT_CHART_OFFSET,
        }
    }

    pub fn with_vertical_offset(mut self, offset: f64) -> Self {
        self.vertical_offset = offset;
        self
    }

    pub fn axes(&self) -> AxisSet<'a> {
        self.axes
    }

    /// Centering shifts of the data-x and data-y axes
    pub fn shifts(&self) -> (f64, f64) {
        (self.x_shift, self.y_shift)
    }

    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// World position of `point`, or `None` if any axis cannot place it
    pub fn map(&self, point: &DataPoint) -> Option<WorldPoint> {
        let x = self.axes.y.apply(&point.y)? - self.y_shift;
        let y = self.axes.z.apply(&point.z)? + self.vertical_offset;
        let z = self.axes.x.apply(&point.x)? - self.x_shift;
        let position = WorldPoint::new(x, y, z);
        position.coords.iter().all(|c| c.is_finite()).then_some(position)
    }

    /// Map a dataset, skipping data the axes cannot place
    pub fn map_all(&self, data: &[DataPoint]) -> Vec<MappedPoint> {
        let mapped: Vec<MappedPoint> = data
            .iter()
            .enumerate()
            .filter_map(|(index, point)| match self.map(point) {
                Some(position) => Some(MappedPoint { index, position }),
                None => {
                    log::warn!(target: "d3three", "datum {index} is outside the axis domains: {point:?}");
                    None
                }
            })
            .collect();

        log::debug!(
            target: "d3three",
            "mapped {}/{} points (shifts x={}, y={})",
            mapped.len(),
            data.len(),
            self.x_shift,
            self.y_shift
        );
        mapped
    }
}
