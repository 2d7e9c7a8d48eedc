//! Scale abstraction shared by all axes

use crate::linear::LinearScale;
use crate::ordinal::OrdinalScale;
use d3three_core::Value;
use serde::{Deserialize, Serialize};

/// Whether a scale maps a continuous interval or a set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Continuous,
    Ordinal,
}

/// A one-dimensional domain-to-range mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Ordinal(OrdinalScale),
}

impl Scale {
    pub fn kind(&self) -> ScaleKind {
        match self {
            Scale::Linear(_) => ScaleKind::Continuous,
            Scale::Ordinal(_) => ScaleKind::Ordinal,
        }
    }

    /// Range position of `value`. Continuous scales need a numeric value,
    /// ordinal scales a value from their domain.
    pub fn apply(&self, value: &Value) -> Option<f64> {
        match self {
            Scale::Linear(scale) => value.as_f64().map(|v| scale.apply(v)),
            Scale::Ordinal(scale) => scale.apply(value),
        }
    }

    /// Range values: the two ends of a linear range, or every ordinal position
    pub fn range(&self) -> Vec<f64> {
        match self {
            Scale::Linear(scale) => scale.range().to_vec(),
            Scale::Ordinal(scale) => scale.range(),
        }
    }

    /// Tick values: generated ticks for linear scales, the domain for ordinal ones
    pub fn ticks(&self) -> Vec<Value> {
        match self {
            Scale::Linear(scale) => scale.ticks().into_iter().map(Value::from).collect(),
            Scale::Ordinal(scale) => scale.domain().to_vec(),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Linear(LinearScale::default())
    }
}

impl From<LinearScale> for Scale {
    fn from(scale: LinearScale) -> Self {
        Scale::Linear(scale)
    }
}

impl From<OrdinalScale> for Scale {
    fn from(scale: OrdinalScale) -> Self {
        Scale::Ordinal(scale)
    }
}
