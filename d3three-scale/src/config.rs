//! Serializable axis definitions

use crate::axis::AxisScale;
use crate::linear::{LinearScale, DEFAULT_TICK_COUNT};
use crate::ordinal::OrdinalScale;
use crate::registry::AxisRegistry;
use crate::scale::Scale;
use d3three_core::{ConfigurationError, Orientation, Result, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn unit_extent() -> [f64; 2] {
    [0.0, 1.0]
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

/// Declarative description of one axis scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AxisConfig {
    Linear {
        #[serde(default = "unit_extent")]
        domain: [f64; 2],
        #[serde(default = "unit_extent")]
        range: [f64; 2],
        #[serde(default = "default_tick_count")]
        ticks: usize,
        #[serde(default)]
        clamp: bool,
        #[serde(default)]
        nice: bool,
    },
    Ordinal {
        domain: Vec<Value>,
        #[serde(default)]
        range: Option<Vec<f64>>,
        #[serde(default)]
        range_points: Option<[f64; 2]>,
        #[serde(default)]
        range_bands: Option<[f64; 2]>,
        #[serde(default)]
        padding: f64,
    },
}

impl AxisConfig {
    pub fn build_scale(&self) -> Result<Scale> {
        match self {
            AxisConfig::Linear {
                domain,
                range,
                ticks,
                clamp,
                nice,
            } => {
                let mut scale = LinearScale::new()
                    .with_domain(*domain)
                    .with_range(*range)
                    .with_tick_count(*ticks)
                    .with_clamp(*clamp);
                if *nice {
                    scale = scale.nice();
                }
                Ok(scale.into())
            }
            AxisConfig::Ordinal {
                domain,
                range,
                range_points,
                range_bands,
                padding,
            } => {
                let scale = OrdinalScale::new(domain.iter().cloned());
                let scale = match (range, range_points, range_bands) {
                    (Some(values), None, None) => scale.with_range(values.clone()),
                    (None, Some(extent), None) => scale.with_range_points(*extent, *padding),
                    (None, None, Some(extent)) => scale.with_range_bands(*extent, *padding, *padding),
                    _ => {
                        return Err(ConfigurationError::InvalidAxis(
                            "ordinal axis needs exactly one of `range`, `range_points`, `range_bands`"
                                .to_string(),
                        )
                        .into())
                    }
                };
                Ok(scale.into())
            }
        }
    }

    pub fn build(&self, orientation: Orientation) -> Result<AxisScale> {
        Ok(AxisScale::new(orientation).with_scale(self.build_scale()?))
    }
}

/// Axis definitions for a whole scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxesConfig {
    #[serde(default)]
    pub x: Option<AxisConfig>,
    #[serde(default)]
    pub y: Option<AxisConfig>,
    #[serde(default)]
    pub z: Option<AxisConfig>,
}

impl AxesConfig {
    /// Load axis definitions from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn get(&self, orientation: Orientation) -> Option<&AxisConfig> {
        match orientation {
            Orientation::X => self.x.as_ref(),
            Orientation::Y => self.y.as_ref(),
            Orientation::Z => self.z.as_ref(),
        }
    }

    /// Build a registry with all three axes
    pub fn build_registry(&self) -> Result<AxisRegistry> {
        let mut registry = AxisRegistry::new();
        for orientation in Orientation::ALL {
            let config = self
                .get(orientation)
                .ok_or(ConfigurationError::MissingAxis(orientation))?;
            registry.register(config.build(orientation)?);
        }
        Ok(registry)
    }
}
