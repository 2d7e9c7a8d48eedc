//! Scene objects, charts and picking for d3three
//!
//! This crate turns mapped chart data into renderer-agnostic scene objects:
//! - Scatter and surface charts
//! - Axis lines, tick marks and billboarded labels
//! - Pointer picking with marker highlighting and tooltips
//! - Scene contexts driven by a `SceneManager`
//!
//! Drawing itself goes through the [`Renderer`] trait; [`HeadlessRenderer`]
//! is the in-memory implementation.

pub mod axis_geometry;
pub mod binding;
pub mod camera;
pub mod chart;
pub mod headless;
pub mod material;
pub mod picking;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod tooltip;

pub use axis_geometry::*;
pub use binding::*;
pub use camera::*;
pub use chart::*;
pub use headless::*;
pub use material::*;
pub use picking::*;
pub use ray::*;
pub use renderer::*;
pub use scene::*;
pub use tooltip::*;
