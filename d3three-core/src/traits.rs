//! Core traits for d3three

use crate::{mesh::TriangleMesh, point::WorldPoint, point_cloud::PointCloud};

/// Trait for objects occupying a region of the scene
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (WorldPoint, WorldPoint);

    /// Get the center point of the object
    fn center(&self) -> WorldPoint {
        let (min, max) = self.bounding_box();
        WorldPoint::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

fn bounds_of<'a>(points: impl IntoIterator<Item = &'a WorldPoint>) -> (WorldPoint, WorldPoint) {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return (WorldPoint::origin(), WorldPoint::origin());
    };

    let mut min = *first;
    let mut max = *first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    (min, max)
}

impl Drawable for PointCloud<WorldPoint> {
    fn bounding_box(&self) -> (WorldPoint, WorldPoint) {
        bounds_of(&self.points)
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (WorldPoint, WorldPoint) {
        bounds_of(&self.vertices)
    }
}
