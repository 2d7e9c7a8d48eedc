//! # d3three
//!
//! 3D scatter and surface charts for Rust.
//!
//! This is the umbrella crate that provides convenient access to all d3three
//! functionality. Use it to get everything in one place, or depend on the
//! individual crates for finer control.
//!
//! ## Features
//!
//! - **Core**: Data values and points, world-space clouds, triangle meshes
//! - **Scale**: Linear and ordinal axis scales, the axis registry and the
//!   data-to-world coordinate mapper
//! - **Reconstruction**: Surface triangulation of row-ordered chart data
//! - **Visualization**: Scenes, charts, axes and pointer picking
//!
//! ## Quick Start
//!
//! ```rust
//! use d3three::prelude::*;
//!
//! let mut scene = Scene::new(HeadlessRenderer::new(), Viewport::default());
//! for orientation in Orientation::ALL {
//!     scene.context_mut().register_axis(AxisScale::new(orientation));
//! }
//!
//! let mut chart = ScatterChart::new();
//! let data = vec![DataPoint::new(0.0, 0.0, 0.0), DataPoint::new(1.0, 1.0, 1.0)];
//! chart.render(scene.context_mut(), &data)?;
//! assert_eq!(chart.markers().len(), 2);
//! # Ok::<(), d3three::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables reconstruction and visualization
//! - `reconstruction`: Surface reconstruction
//! - `visualization`: Charts, scenes and picking (implies `reconstruction`)
//! - `all`: Enables all features

// Re-export core functionality
pub use d3three_core::*;

// Re-export sub-crates
pub use d3three_scale as scale;

#[cfg(feature = "reconstruction")]
pub use d3three_reconstruction as reconstruction;

#[cfg(feature = "visualization")]
pub use d3three_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use d3three_core::*;
    pub use d3three_scale::*;

    #[cfg(feature = "reconstruction")]
    pub use d3three_reconstruction::*;

    #[cfg(feature = "visualization")]
    pub use d3three_visualization::*;
}
