//! Row-based nearest-row triangulation
//!
//! Points sharing a world-x coordinate form a row. Each point is joined to
//! the lowest-z later point of its own row and the two lowest-z points of
//! the next row (the smallest strictly greater world-x), giving two faces
//! per qualifying point.
//!
//! Only points later in the input sequence are considered, so the result
//! depends on input order: a row-major cloud (rows by ascending world-x,
//! ascending world-z within a row) yields the expected grid surface, any
//! other ordering yields a sparse or crossed mesh. Winding follows index
//! order rather than geometry, so face normals are not guaranteed to point
//! the same way as the surface's outside.

use d3three_core::{Error, PointCloud, Result, TriangleMesh, WorldPoint};
use itertools::Itertools;
use std::cmp::Ordering;

type Indexed<'a> = (usize, &'a WorldPoint);

fn by_z(a: &Indexed<'_>, b: &Indexed<'_>) -> Ordering {
    a.1.z.partial_cmp(&b.1.z).unwrap_or(Ordering::Equal)
}

/// Faces contributed by vertex `i`, if it has a same-row successor and at
/// least two points in the next row.
fn row_quad(points: &[WorldPoint], i: usize) -> Option<[[usize; 3]; 2]> {
    let current = points[i];
    let forward = || points.iter().enumerate().skip(i + 1);

    let next_row_x = forward()
        .map(|(_, p)| p.x)
        .filter(|&x| x > current.x)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))?;

    let (v1, _) = forward().filter(|(_, p)| p.x == current.x).min_by(by_z)?;

    let mut next_row = forward()
        .filter(|(_, p)| p.x == next_row_x)
        .sorted_by(by_z)
        .map(|(j, _)| j);
    let v2 = next_row.next()?;
    let v3 = next_row.next()?;

    let mut corners = [i, v1, v2, v3];
    corners.sort_unstable();
    let [a, b, c, d] = corners;
    Some([[b, a, d], [a, c, d]])
}

/// Faces over `points`, in vertex order
pub fn row_neighbor_faces(points: &[WorldPoint]) -> Vec<[usize; 3]> {
    (0..points.len())
        .filter_map(|i| row_quad(points, i))
        .flatten()
        .collect()
}

/// Triangulate a cloud, keeping every point as a vertex
pub fn row_neighbor_triangulation(cloud: &PointCloud<WorldPoint>) -> TriangleMesh {
    let faces = row_neighbor_faces(&cloud.points);
    log::debug!(
        target: "d3three",
        "row-neighbor triangulation: {} vertices, {} faces",
        cloud.len(),
        faces.len()
    );
    TriangleMesh::from_vertices_and_faces(cloud.points.clone(), faces)
}

/// Check that `points` are row-major: world-x never decreases, and world-z
/// strictly increases within a row.
pub fn check_row_major(points: &[WorldPoint]) -> Result<()> {
    for (i, pair) in points.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if next.x < prev.x {
            return Err(Error::InvalidData(format!(
                "point {} (x = {}) follows row x = {}; rows must be ordered by ascending x",
                i + 1,
                next.x,
                prev.x
            )));
        }
        if next.x == prev.x && next.z <= prev.z {
            return Err(Error::InvalidData(format!(
                "point {} (z = {}) does not follow z = {} within row x = {}",
                i + 1,
                next.z,
                prev.z,
                next.x
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground(x: f64, z: f64) -> WorldPoint {
        WorldPoint::new(x, 0.0, z)
    }

    #[test]
    fn test_single_cell() {
        let points = vec![ground(0.0, 0.0), ground(0.0, 1.0), ground(1.0, 0.0), ground(1.0, 1.0)];
        let faces = row_neighbor_faces(&points);
        assert_eq!(faces, vec![[1, 0, 3], [0, 2, 3]]);
    }

    #[test]
    fn test_single_row_has_no_faces() {
        let points: Vec<WorldPoint> = (0..6).map(|z| ground(2.0, z as f64)).collect();
        assert!(row_neighbor_faces(&points).is_empty());
    }

    #[test]
    fn test_next_row_needs_two_points() {
        let points = vec![ground(0.0, 0.0), ground(0.0, 1.0), ground(1.0, 0.0)];
        assert!(row_neighbor_faces(&points).is_empty());
    }

    #[test]
    fn test_next_row_is_nearest_greater_x() {
        // rows at x = 0, 1, 5; the x = 0 points must join the x = 1 row
        let points = vec![
            ground(0.0, 0.0),
            ground(0.0, 1.0),
            ground(5.0, 0.0),
            ground(5.0, 1.0),
            ground(1.0, 0.0),
            ground(1.0, 1.0),
        ];
        let faces = row_neighbor_faces(&points);
        assert_eq!(&faces[..2], &[[1, 0, 5], [0, 4, 5]]);
    }

    #[test]
    fn test_same_row_neighbor_sorted_by_z() {
        // later same-row points out of z order: the lowest z is picked
        let points = vec![
            ground(0.0, 0.0),
            ground(0.0, 2.0),
            ground(0.0, 1.0),
            ground(1.0, 1.0),
            ground(1.0, 0.0),
        ];
        let faces = row_neighbor_faces(&points);
        // i = 0 picks v1 = 2 (z = 1), v2 = 4, v3 = 3 -> corners [0, 2, 3, 4]
        assert_eq!(&faces[..2], &[[2, 0, 4], [0, 3, 4]]);
    }

    #[test]
    fn test_check_row_major() {
        let ordered = vec![ground(0.0, 0.0), ground(0.0, 1.0), ground(1.0, 0.0), ground(1.0, 1.0)];
        assert!(check_row_major(&ordered).is_ok());

        let unordered = vec![ground(1.0, 0.0), ground(0.0, 0.0)];
        let err = check_row_major(&unordered).unwrap_err();
        assert!(err.to_string().contains("point 1"));

        let repeated_z = vec![ground(0.0, 1.0), ground(0.0, 1.0)];
        assert!(check_row_major(&repeated_z).is_err());
    }
}
