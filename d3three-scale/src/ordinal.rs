//! Categorical (ordinal) scale

use d3three_core::Value;
use serde::{Deserialize, Serialize};

/// How an ordinal scale lays out its range. The concrete positions are
/// derived from the domain on every call, so changing the domain never
/// leaves a stale range behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrdinalRange {
    /// Positions given one per domain value (cycled if shorter)
    Explicit(Vec<f64>),
    /// Evenly spaced points across an extent
    Points { extent: [f64; 2], padding: f64 },
    /// Evenly spaced bands across an extent
    Bands {
        extent: [f64; 2],
        padding: f64,
        outer_padding: f64,
    },
}

/// Maps a discrete, ordered domain onto range positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale {
    domain: Vec<Value>,
    ranger: OrdinalRange,
}

impl OrdinalScale {
    /// Scale over `domain` with an empty range. Duplicate values keep their
    /// first position.
    pub fn new<I, V>(domain: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut scale = Self {
            domain: Vec::new(),
            ranger: OrdinalRange::Explicit(Vec::new()),
        };
        scale.set_domain(domain);
        scale
    }

    pub fn with_range(mut self, range: Vec<f64>) -> Self {
        self.ranger = OrdinalRange::Explicit(range);
        self
    }

    /// Spread the domain as points from `extent[0]` to `extent[1]`; `padding`
    /// is in units of the step and split evenly across both ends.
    pub fn with_range_points(mut self, extent: [f64; 2], padding: f64) -> Self {
        self.ranger = OrdinalRange::Points { extent, padding };
        self
    }

    /// Divide the extent into bands, one per domain value.
    pub fn with_range_bands(mut self, extent: [f64; 2], padding: f64, outer_padding: f64) -> Self {
        self.ranger = OrdinalRange::Bands {
            extent,
            padding,
            outer_padding,
        };
        self
    }

    pub fn set_domain<I, V>(&mut self, domain: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.domain.clear();
        for value in domain {
            let value = value.into();
            if !self.domain.contains(&value) {
                self.domain.push(value);
            }
        }
    }

    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    pub fn ranger(&self) -> &OrdinalRange {
        &self.ranger
    }

    /// Range position of each domain value, in domain order
    pub fn range(&self) -> Vec<f64> {
        let n = self.domain.len();
        match &self.ranger {
            OrdinalRange::Explicit(values) => values.clone(),
            OrdinalRange::Points { extent, padding } => {
                let (start, step) = if n < 2 {
                    ((extent[0] + extent[1]) / 2.0, 0.0)
                } else {
                    let step = (extent[1] - extent[0]) / ((n - 1) as f64 + padding);
                    (extent[0] + step * padding / 2.0, step)
                };
                steps(start, step, n)
            }
            OrdinalRange::Bands {
                extent,
                padding,
                outer_padding,
            } => {
                let (start, stop, reverse) = band_extent(*extent);
                let step = (stop - start) / (n as f64 - padding + 2.0 * outer_padding);
                let mut range = steps(start + step * outer_padding, step, n);
                if reverse {
                    range.reverse();
                }
                range
            }
        }
    }

    /// Width of one band; zero for point and explicit layouts
    pub fn range_band(&self) -> f64 {
        match &self.ranger {
            OrdinalRange::Bands {
                extent,
                padding,
                outer_padding,
            } => {
                let (start, stop, _) = band_extent(*extent);
                let n = self.domain.len() as f64;
                (stop - start) / (n - padding + 2.0 * outer_padding) * (1.0 - padding)
            }
            _ => 0.0,
        }
    }

    /// Range position of `value`, or `None` when it is not in the domain
    pub fn apply(&self, value: &Value) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == value)?;
        let range = self.range();
        if range.is_empty() {
            return None;
        }
        Some(range[index % range.len()])
    }
}

fn band_extent(extent: [f64; 2]) -> (f64, f64, bool) {
    if extent[1] < extent[0] {
        (extent[1], extent[0], true)
    } else {
        (extent[0], extent[1], false)
    }
}

fn steps(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}
