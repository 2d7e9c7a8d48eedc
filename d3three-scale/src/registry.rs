//! Per-scene mapping from orientation to axis

use crate::axis::AxisScale;
use d3three_core::{ConfigurationError, Orientation, Result};

/// One axis per data-space orientation
#[derive(Debug, Clone, Default)]
pub struct AxisRegistry {
    axes: [Option<AxisScale>; 3],
}

/// Borrowed view of a fully populated registry
#[derive(Debug, Clone, Copy)]
pub struct AxisSet<'a> {
    pub x: &'a AxisScale,
    pub y: &'a AxisScale,
    pub z: &'a AxisScale,
}

impl<'a> AxisSet<'a> {
    pub fn get(&self, orientation: Orientation) -> &'a AxisScale {
        match orientation {
            Orientation::X => self.x,
            Orientation::Y => self.y,
            Orientation::Z => self.z,
        }
    }
}

impl AxisRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `axis` under its own orientation, returning the axis it replaced
    pub fn register(&mut self, axis: AxisScale) -> Option<AxisScale> {
        let orientation = axis.orientation();
        log::debug!(
            target: "d3three",
            "register {} axis ({:?}, {} ticks)",
            orientation,
            axis.kind(),
            axis.ticks().len()
        );
        self.axes[orientation.index()].replace(axis)
    }

    /// Get the axis for `orientation`, if registered
    pub fn get(&self, orientation: Orientation) -> Option<&AxisScale> {
        self.axes[orientation.index()].as_ref()
    }

    /// Mutable access for reconfiguring a registered axis
    pub fn get_mut(&mut self, orientation: Orientation) -> Option<&mut AxisScale> {
        self.axes[orientation.index()].as_mut()
    }

    /// The axis for `orientation`, or a configuration error if none is registered
    pub fn require(&self, orientation: Orientation) -> Result<&AxisScale> {
        self.get(orientation)
            .ok_or_else(|| ConfigurationError::MissingAxis(orientation).into())
    }

    pub fn is_complete(&self) -> bool {
        self.axes.iter().all(Option::is_some)
    }

    /// Orientations that still lack an axis
    pub fn missing(&self) -> Vec<Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(|o| self.get(*o).is_none())
            .collect()
    }

    /// All three axes at once; fails on the first missing orientation
    pub fn axes(&self) -> Result<AxisSet<'_>> {
        Ok(AxisSet {
            x: self.require(Orientation::X)?,
            y: self.require(Orientation::Y)?,
            z: self.require(Orientation::Z)?,
        })
    }
}
