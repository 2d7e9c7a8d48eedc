//! # d3three reconstruction
//!
//! Builds the triangle surface of a surface chart from its mapped world
//! points. The default row-neighbor method reproduces the classic d3three
//! triangulation of row-major grid data; ground-plane Delaunay is available
//! for data that does not arrive in row order.

pub mod delaunay;
pub mod row_neighbor;

// Re-export commonly used items
pub use delaunay::*;
pub use row_neighbor::*;

use d3three_core::{Error, PointCloud, Result, TriangleMesh, WorldPoint};

/// Triangulation method used by [`SurfaceReconstructor`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReconstructionMethod {
    /// Nearest-row neighbors; depends on input order
    #[default]
    RowNeighbor,
    /// Delaunay over the (x, z) ground plane; order independent
    Delaunay(DelaunayConfig),
}

/// Turns a chart's world points into a triangle mesh.
///
/// Sparse input never fails: too few points, or a single row, give a mesh
/// with vertices and no faces. Only the opt-in row-major check can reject
/// input.
#[derive(Debug, Clone, Default)]
pub struct SurfaceReconstructor {
    method: ReconstructionMethod,
    validate_row_major: bool,
}

impl SurfaceReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: ReconstructionMethod) -> Self {
        self.method = method;
        self
    }

    /// Reject input that is not row-major instead of producing a crossed mesh
    pub fn validate_row_major(mut self, validate: bool) -> Self {
        self.validate_row_major = validate;
        self
    }

    pub fn method(&self) -> &ReconstructionMethod {
        &self.method
    }

    /// Triangulate `cloud`; vertices are the cloud's points in input order
    pub fn reconstruct(&self, cloud: &PointCloud<WorldPoint>) -> Result<TriangleMesh> {
        if self.validate_row_major {
            check_row_major(&cloud.points)?;
        }

        match &self.method {
            ReconstructionMethod::RowNeighbor => Ok(row_neighbor_triangulation(cloud)),
            ReconstructionMethod::Delaunay(config) => {
                match delaunay_triangulation_with_config(cloud, config) {
                    Ok(mesh) => Ok(mesh),
                    Err(Error::InvalidData(reason) | Error::Algorithm(reason)) => {
                        log::warn!(target: "d3three", "surface left without faces: {reason}");
                        Ok(TriangleMesh::from_vertices_and_faces(cloud.points.clone(), Vec::new()))
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}
