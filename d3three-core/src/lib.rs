//! Core data structures and traits for d3three
//!
//! This crate provides the fundamental types shared by the chart pipeline:
//! data values and points, world-space point clouds, triangle meshes and
//! the common error type.

pub mod error;
pub mod mesh;
pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod value;

pub use error::*;
pub use mesh::*;
pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use value::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
