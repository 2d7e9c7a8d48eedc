//! Axis abstraction: ticks, tick spacing and centering offset of one scale

use crate::linear::LinearScale;
use crate::scale::{Scale, ScaleKind};
use d3three_core::{Orientation, Value};
use std::fmt;
use std::sync::Arc;

/// Formats a tick or datum value for display.
///
/// Cloning shares the underlying closure, so tick labels and tooltips
/// render through the same formatter instance.
#[derive(Clone)]
pub struct TickFormat(Arc<dyn Fn(&Value) -> String + Send + Sync>);

impl TickFormat {
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    /// Displays the value as-is
    pub fn identity() -> Self {
        Self::new(|value| value.to_string())
    }

    pub fn format(&self, value: &Value) -> String {
        (self.0)(value)
    }

    /// Whether both handles share one closure
    pub fn ptr_eq(&self, other: &TickFormat) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TickFormat {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickFormat(..)")
    }
}

/// A scale bound to one data-space orientation
#[derive(Debug, Clone)]
pub struct AxisScale {
    orientation: Orientation,
    scale: Scale,
    tick_format: TickFormat,
}

impl AxisScale {
    /// Axis with a unit linear scale and the identity formatter
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            scale: Scale::Linear(LinearScale::default()),
            tick_format: TickFormat::identity(),
        }
    }

    /// Set the orientation the axis is registered under
    pub fn orient(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace the scale
    pub fn with_scale(mut self, scale: impl Into<Scale>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Replace the formatter used for tick labels and tooltips
    pub fn with_tick_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.set_tick_format(format);
        self
    }

    /// Replace the scale of an axis in place
    pub fn set_scale(&mut self, scale: impl Into<Scale>) {
        self.scale = scale.into();
    }

    /// Replace the formatter of an axis in place
    pub fn set_tick_format<F>(&mut self, format: F)
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.tick_format = TickFormat::new(format);
    }

    /// Get the orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Get the scale
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut Scale {
        &mut self.scale
    }

    /// Continuous or ordinal
    pub fn kind(&self) -> ScaleKind {
        self.scale.kind()
    }

    pub fn formatter(&self) -> &TickFormat {
        &self.tick_format
    }

    /// Display string for a tick or datum value
    pub fn tick_format(&self, value: &Value) -> String {
        self.tick_format.format(value)
    }

    /// Range position of a value
    pub fn apply(&self, value: &Value) -> Option<f64> {
        self.scale.apply(value)
    }

    /// Tick values in axis order
    pub fn ticks(&self) -> Vec<Value> {
        self.scale.ticks()
    }

    /// Spacing between adjacent ticks along the rendered axis.
    ///
    /// Ordinal axes are assumed to start at position 0 and step uniformly,
    /// so the second range position is the step. Axes with fewer than two
    /// ticks have no spacing and report `0.0`.
    pub fn interval(&self) -> f64 {
        match &self.scale {
            Scale::Ordinal(scale) => scale.range().get(1).copied().unwrap_or(0.0),
            Scale::Linear(scale) => {
                let count = scale.ticks().len();
                if count < 2 {
                    return 0.0;
                }
                let [start, end] = scale.range();
                (end - start) / (count - 1) as f64
            }
        }
    }

    /// Half the rendered span of the axis, used to center the chart on
    /// the origin.
    pub fn rotation_shift(&self) -> f64 {
        let count = self.ticks().len();
        self.interval() * count.saturating_sub(1) as f64 / 2.0
    }

    /// Rendered position of each tick, from 0 in steps of `interval()`
    pub fn tick_positions(&self) -> Vec<f64> {
        let interval = self.interval();
        (0..self.ticks().len()).map(|i| i as f64 * interval).collect()
    }
}
