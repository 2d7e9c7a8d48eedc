//! # d3three scales
//!
//! Axis scales and the data-to-world coordinate mapping used by every
//! chart: linear and ordinal scales, the axis abstraction built on top of
//! them, the per-scene axis registry and the coordinate mapper.

pub mod axis;
pub mod config;
pub mod linear;
pub mod mapping;
pub mod ordinal;
pub mod registry;
pub mod scale;

// Re-export commonly used items
pub use axis::*;
pub use config::*;
pub use linear::*;
pub use mapping::*;
pub use ordinal::*;
pub use registry::*;
pub use scale::*;
