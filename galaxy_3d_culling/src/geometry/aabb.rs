/// Axis-aligned bounding box.
///
/// `min <= max` component-wise is expected but not enforced on
/// construction. `merge`, `add_point` and `transform` always restore it.
///
/// There is no "empty" box: a box must be seeded with real coordinates
/// (`from_point`, `from_points`, or an explicit `new`) before points are
/// added to it.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use super::sphere::Sphere;

/// Axis-Aligned Bounding Box
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Degenerate box enclosing a single point.
    ///
    /// Seed for incremental `add_point` accumulation.
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Smallest box enclosing all `points`, or `None` if there are none.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let mut aabb = Self::from_point(points.next()?);
        for point in points {
            aabb.add_point(point);
        }
        Some(aabb)
    }

    pub fn set(&mut self, min: Vec3, max: Vec3) {
        self.min = min;
        self.max = max;
    }

    /// Grow this box to enclose `other`.
    ///
    /// Merging a box that is already enclosed is a no-op.
    pub fn merge(&mut self, other: &AABB) {
        self.add_point(other.min);
        self.add_point(other.max);
    }

    /// Grow this box to enclose `point`.
    #[inline]
    pub fn add_point(&mut self, point: Vec3) {
        self.min = point.min(self.min);
        self.max = point.max(self.max);
    }

    /// Separating-axis overlap test.
    ///
    /// Boxes that only touch (shared face, edge or corner) overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        if self.min.x > other.max.x { return false; }
        if self.min.y > other.max.y { return false; }
        if self.min.z > other.max.z { return false; }
        if other.min.x > self.max.x { return false; }
        if other.min.y > self.max.y { return false; }
        if other.min.z > self.max.z { return false; }
        true
    }

    /// Test if this AABB fully contains another AABB (inclusive).
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// The 8 corners of this box, transformed by `matrix`.
    ///
    /// Corner `i` takes `max` on x when bit 0 of `i` is set, on y for
    /// bit 1 and on z for bit 2, `min` otherwise:
    ///
    /// | i | corner          | i | corner          |
    /// |---|-----------------|---|-----------------|
    /// | 0 | (min, min, min) | 4 | (min, min, max) |
    /// | 1 | (max, min, min) | 5 | (max, min, max) |
    /// | 2 | (min, max, min) | 6 | (min, max, max) |
    /// | 3 | (max, max, min) | 7 | (max, max, max) |
    pub fn corners(&self, matrix: &Mat4) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            let corner = Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            );
            matrix.transform_point3(corner)
        })
    }

    /// Replace this box with the box enclosing its 8 transformed corners.
    ///
    /// Conservative: a rotated box is in general not axis-aligned, so the
    /// result can be larger than the transformed volume.
    pub fn transform(&mut self, matrix: &Mat4) {
        *self = self.transformed(matrix);
    }

    /// Box enclosing the 8 corners of this box transformed by `matrix`.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let corners = self.corners(matrix);
        let mut result = AABB::from_point(corners[0]);
        for corner in &corners[1..] {
            result.add_point(*corner);
        }
        result
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Sphere through the box corners, for sphere-based frustum tests.
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::from_point(self.center(), self.half_extents().length())
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
