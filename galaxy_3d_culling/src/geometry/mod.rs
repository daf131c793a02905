//! Geometry module: planes and bounding volumes.
//!
//! Flat `Copy` value types with no shared ownership, safe to query
//! from any number of threads once built.

mod aabb;
mod plane;
mod sphere;

pub use aabb::AABB;
pub use plane::Plane;
pub use sphere::Sphere;
