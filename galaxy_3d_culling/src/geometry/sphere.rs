/// Sphere, the bounding volume tested against frustums.
///
/// Pure data holder. A negative radius is a caller error and is not checked.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Bounding sphere (center + radius).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Sphere {
    /// Center in world space
    pub position: Vec3,
    /// Radius
    pub radius: f32,
}

impl Sphere {
    pub fn new(x: f32, y: f32, z: f32, radius: f32) -> Self {
        Self { position: Vec3::new(x, y, z), radius }
    }

    pub fn from_point(point: Vec3, radius: f32) -> Self {
        Self { position: point, radius }
    }

    /// Create a sphere from a homogeneous vector (x, y, z, w) → (position, radius).
    pub fn from_vec4(v: Vec4) -> Self {
        Self { position: v.truncate(), radius: v.w }
    }

    /// Sphere as (x, y, z, radius), the layout GPU culling shaders expect.
    pub fn to_vec4(&self) -> Vec4 {
        self.position.extend(self.radius)
    }
}

impl From<Vec4> for Sphere {
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
