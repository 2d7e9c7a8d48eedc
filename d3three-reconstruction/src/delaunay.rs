//! Delaunay triangulation over the ground plane
//!
//! Chart surfaces are height fields: every datum is placed by its two
//! horizontal world coordinates (x, z) and lifted by world-y. Triangulating
//! the (x, z) projection therefore gives an order-independent surface, at
//! the cost of the row structure the row-neighbor method relies on.

use d3three_core::{Error, PointCloud, Result, TriangleMesh, WorldPoint};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Configuration for ground-plane Delaunay triangulation
#[derive(Debug, Clone, PartialEq)]
pub struct DelaunayConfig {
    /// Whether to drop triangles failing the quality thresholds
    pub validate: bool,
    /// Minimum triangle area, measured in world space
    pub min_triangle_area: f64,
    /// Maximum triangle edge length, measured in world space
    pub max_edge_length: Option<f64>,
}

impl Default for DelaunayConfig {
    fn default() -> Self {
        Self {
            validate: true,
            min_triangle_area: 1e-8,
            max_edge_length: None,
        }
    }
}

/// 2D Delaunay triangulation; indices refer to `points`.
///
/// Coincident points collapse onto the first one inserted, so later
/// duplicates never appear in a face.
pub fn delaunay_triangulation_2d(points: &[Point2<f64>]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(Error::InvalidData("Need at least 3 points for triangulation".to_string()));
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();

    // spade vertex index -> input index
    let mut source_index = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let handle = triangulation.insert(*point).map_err(|e| {
            Error::Algorithm(format!("Failed to insert point {i} in Delaunay triangulation: {e:?}"))
        })?;
        if handle.index() == source_index.len() {
            source_index.push(i);
        }
    }

    let triangles = triangulation
        .inner_faces()
        .map(|face| face.vertices().map(|v| source_index[v.fix().index()]))
        .collect();
    Ok(triangles)
}

/// Project world points onto the ground plane
pub fn project_to_ground(points: &[WorldPoint]) -> Vec<Point2<f64>> {
    points.iter().map(|p| Point2::new(p.x, p.z)).collect()
}

fn is_triangle_valid(p1: &WorldPoint, p2: &WorldPoint, p3: &WorldPoint, config: &DelaunayConfig) -> bool {
    let area = (p2 - p1).cross(&(p3 - p1)).magnitude() * 0.5;
    if area < config.min_triangle_area {
        return false;
    }

    if let Some(max_len) = config.max_edge_length {
        let longest = (p2 - p1)
            .magnitude()
            .max((p3 - p2).magnitude())
            .max((p1 - p3).magnitude());
        if longest > max_len {
            return false;
        }
    }

    true
}

pub fn delaunay_triangulation(cloud: &PointCloud<WorldPoint>) -> Result<TriangleMesh> {
    delaunay_triangulation_with_config(cloud, &DelaunayConfig::default())
}

/// Triangulate a cloud over its ground-plane projection.
///
/// Fails when the cloud has fewer than three points or when no triangle
/// survives validation (for example, every point on one line).
pub fn delaunay_triangulation_with_config(
    cloud: &PointCloud<WorldPoint>,
    config: &DelaunayConfig,
) -> Result<TriangleMesh> {
    if cloud.points.len() < 3 {
        return Err(Error::InvalidData("Need at least 3 points for triangulation".to_string()));
    }

    let projected = project_to_ground(&cloud.points);
    let triangles = delaunay_triangulation_2d(&projected)?;

    let faces: Vec<[usize; 3]> = triangles
        .into_iter()
        .filter(|&[i, j, k]| {
            !config.validate
                || is_triangle_valid(&cloud.points[i], &cloud.points[j], &cloud.points[k], config)
        })
        .collect();

    if faces.is_empty() {
        return Err(Error::Algorithm("No valid triangles generated".to_string()));
    }

    log::debug!(
        target: "d3three",
        "delaunay triangulation: {} vertices, {} faces",
        cloud.len(),
        faces.len()
    );
    Ok(TriangleMesh::from_vertices_and_faces(cloud.points.clone(), faces))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> PointCloud<WorldPoint> {
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| WorldPoint::new(r as f64, (r + c) as f64, c as f64)))
            .collect()
    }

    #[test]
    fn test_delaunay_config_default() {
        let config = DelaunayConfig::default();
        assert!(config.validate);
        assert_eq!(config.min_triangle_area, 1e-8);
        assert_eq!(config.max_edge_length, None);
    }

    #[test]
    fn test_single_triangle_2d() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.5, 1.0)];
        let triangles = delaunay_triangulation_2d(&points).unwrap();
        assert_eq!(triangles.len(), 1);

        let mut corners = triangles[0];
        corners.sort_unstable();
        assert_eq!(corners, [0, 1, 2]);
    }

    #[test]
    fn test_duplicates_map_to_first_occurrence() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let triangles = delaunay_triangulation_2d(&points).unwrap();
        assert_eq!(triangles.len(), 1);
        assert!(!triangles[0].contains(&2));
    }

    #[test]
    fn test_grid_uses_ground_plane() {
        let mesh = delaunay_triangulation(&grid(3, 3)).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.face_count(), 8);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_too_few_points() {
        let cloud: PointCloud<WorldPoint> = grid(1, 2);
        assert!(matches!(delaunay_triangulation(&cloud), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_collinear_points_fail() {
        let cloud: PointCloud<WorldPoint> = grid(1, 5);
        assert!(delaunay_triangulation(&cloud).is_err());
    }

    #[test]
    fn test_max_edge_length_filters() {
        let config = DelaunayConfig {
            max_edge_length: Some(0.5),
            ..Default::default()
        };
        assert!(delaunay_triangulation_with_config(&grid(3, 3), &config).is_err());
    }
}
