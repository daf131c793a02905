/// Plane: a signed half-space boundary.
///
/// A plane is the set of points P such that `dot(normal, P) + d = 0`.
/// `distance()` is only a Euclidean distance when `normal` is unit length;
/// the plane never normalizes itself, that is the caller's responsibility.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Plane equation `dot(normal, P) + d = 0`.
///
/// The positive half-space is the side the normal points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Plane {
    /// Plane normal (A, B, C)
    pub normal: Vec3,
    /// Plane offset (D)
    pub d: f32,
}

impl Plane {
    /// Create a plane from its normal and offset.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Create a plane from a homogeneous vector (x, y, z, w) → (normal, d).
    pub fn from_vec4(v: Vec4) -> Self {
        Self { normal: v.truncate(), d: v.w }
    }

    /// Create the plane through `point` with the given `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { normal, d: -point.dot(normal) }
    }

    /// Overwrite normal and offset.
    pub fn set(&mut self, normal: Vec3, d: f32) {
        self.normal = normal;
        self.d = d;
    }

    /// Overwrite the normal and move the plane through `point`.
    pub fn set_from_point(&mut self, normal: Vec3, point: Vec3) {
        self.normal = normal;
        self.d = -point.dot(normal);
    }

    /// Overwrite from a homogeneous vector (x, y, z, w) → (normal, d).
    pub fn set_from_vec4(&mut self, v: Vec4) {
        self.normal = v.truncate();
        self.d = v.w;
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn d(&self) -> f32 {
        self.d
    }

    /// Plane as (A, B, C, D).
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Positive on the side the normal points to. Only Euclidean when the
    /// normal is unit length.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        point.dot(self.normal) + self.d
    }

    /// Intersect the line `line_point + t * line_vector` with this plane.
    ///
    /// Returns `None` when `dot(normal, line_vector)` is exactly zero: the
    /// line is parallel to the plane, or `line_vector` is zero. No epsilon
    /// is applied, so nearly parallel lines yield far-away intersections.
    pub fn intersection_with_line(&self, line_point: Vec3, line_vector: Vec3) -> Option<Vec3> {
        let denominator = self.normal.dot(line_vector);
        if denominator == 0.0 {
            return None;
        }

        let t = -(self.normal.dot(line_point) + self.d) / denominator;
        Some(line_point + line_vector * t)
    }

    /// Return this plane scaled so that its normal is unit length.
    ///
    /// A zero normal is returned unchanged.
    pub fn normalized(&self) -> Self {
        let length = self.normal.length();
        if length > 0.0 {
            Self { normal: self.normal / length, d: self.d / length }
        } else {
            *self
        }
    }
}

impl From<Vec4> for Plane {
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
