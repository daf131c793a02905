//! Camera module: view frustums and the camera descriptions they are built from.
//!
//! A `Frustum` is a passive value. The caller owns it, rebuilds it when
//! the camera moves, and queries it read-only during culling.

mod frustum;
mod projection;

pub use frustum::{Frustum, FrustumPlanes, FrustumTest, PlaneMask, Planes};
pub use projection::{FrustumDesc, Projection};
