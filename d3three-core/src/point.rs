//! Point types and related functionality

use crate::error::{ConfigurationError, Result};
use crate::value::Value;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// A position in scene units
pub type WorldPoint = Point3<f64>;

/// A direction in scene units
pub type WorldVector = Vector3<f64>;

/// Data-space axis identity.
///
/// Distinct from the world axes: data-x is rendered along world-z,
/// data-y along world-x and data-z along world-y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    X,
    Y,
    Z,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::X, Orientation::Y, Orientation::Z];

    /// Stable slot index, used for fixed-size per-axis storage
    pub fn index(self) -> usize {
        match self {
            Orientation::X => 0,
            Orientation::Y => 1,
            Orientation::Z => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::X => "x",
            Orientation::Y => "y",
            Orientation::Z => "z",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ConfigurationError;

    fn from_str(input: &str) -> std::result::Result<Orientation, Self::Err> {
        match input {
            "x" => Ok(Orientation::X),
            "y" => Ok(Orientation::Y),
            "z" => Ok(Orientation::Z),
            other => Err(ConfigurationError::UnknownOrientation(other.to_string())),
        }
    }
}

/// One datum of a chart dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: Value,
    pub y: Value,
    pub z: Value,
}

impl DataPoint {
    pub fn new(x: impl Into<Value>, y: impl Into<Value>, z: impl Into<Value>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// Field for the given data-space axis
    pub fn get(&self, orientation: Orientation) -> &Value {
        match orientation {
            Orientation::X => &self.x,
            Orientation::Y => &self.y,
            Orientation::Z => &self.z,
        }
    }
}

/// Read a dataset: a JSON array of `{x, y, z}` objects
pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<DataPoint>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a dataset from a JSON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<DataPoint>> {
    let file = File::open(path)?;
    read_dataset(BufReader::new(file))
}
