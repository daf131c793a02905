/// Camera description: the pose and projection a frustum is built from.
///
/// `Frustum::compute_*` take raw parameters and never check them. A
/// `FrustumDesc` bundles the same parameters as configuration and can
/// validate them once, up front, outside the per-frame path.

use glam::Vec3;
use crate::culling_err;
use crate::error::{Error, Result};

/// Projection parameters of a camera or light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        /// Vertical field of view in radians
        fov: f32,
        /// Aspect ratio (width / height)
        ratio: f32,
    },
    /// Orthographic projection
    Orthographic {
        /// Full width of the view volume
        width: f32,
        /// Full height of the view volume
        height: f32,
    },
    /// Planes were supplied directly (e.g. extracted from a matrix)
    Unspecified,
}

impl Projection {
    /// Vertical field of view, 0 for non-perspective projections.
    pub fn fov(&self) -> f32 {
        match *self {
            Projection::Perspective { fov, .. } => fov,
            _ => 0.0,
        }
    }

    /// Width / height ratio, 0 when unknown (including a zero ortho height).
    pub fn ratio(&self) -> f32 {
        match *self {
            Projection::Perspective { ratio, .. } => ratio,
            Projection::Orthographic { height, .. } if height == 0.0 => 0.0,
            Projection::Orthographic { width, height } => width / height,
            Projection::Unspecified => 0.0,
        }
    }
}

/// Full camera description: pose, clip distances and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumDesc {
    /// Apex (perspective) or eye position (orthographic)
    pub position: Vec3,
    /// View direction
    pub direction: Vec3,
    /// Up vector, must not be collinear with `direction`
    pub up: Vec3,
    /// Distance from `position` to the near plane
    pub near_distance: f32,
    /// Distance from `position` to the far plane
    pub far_distance: f32,
    /// Projection parameters
    pub projection: Projection,
}

impl Default for FrustumDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            near_distance: 0.1,
            far_distance: 1000.0,
            projection: Projection::Perspective {
                fov: 60.0_f32.to_radians(),
                ratio: 16.0 / 9.0,
            },
        }
    }
}

impl FrustumDesc {
    /// Perspective camera description. `fov` is vertical, in radians.
    pub fn perspective(
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        fov: f32,
        ratio: f32,
        near_distance: f32,
        far_distance: f32,
    ) -> Self {
        Self {
            position,
            direction,
            up,
            near_distance,
            far_distance,
            projection: Projection::Perspective { fov, ratio },
        }
    }

    /// Orthographic camera description (full width and height).
    pub fn orthographic(
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        near_distance: f32,
        far_distance: f32,
    ) -> Self {
        Self {
            position,
            direction,
            up,
            near_distance,
            far_distance,
            projection: Projection::Orthographic { width, height },
        }
    }

    /// Check the description for inputs the frustum math cannot handle.
    ///
    /// Failures are logged and returned; the frustum constructors never
    /// call this themselves.
    ///
    /// # Errors
    ///
    /// - `DegenerateCamera` for non-finite pose values, zero-length
    ///   `direction` or `up`, or `up` collinear with `direction`
    /// - `InvalidProjection` for negative near distance, `far <= near`,
    ///   fov outside (0, π), non-positive ratio or ortho extents, or an
    ///   `Unspecified` projection
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "galaxy3d::FrustumDesc";

        if !(self.position.is_finite() && self.direction.is_finite() && self.up.is_finite()) {
            return Err(culling_err!(SOURCE,
                Error::DegenerateCamera("pose contains non-finite values".to_string())));
        }
        if self.direction.length_squared() == 0.0 {
            return Err(culling_err!(SOURCE,
                Error::DegenerateCamera("direction has zero length".to_string())));
        }
        if self.up.length_squared() == 0.0 {
            return Err(culling_err!(SOURCE,
                Error::DegenerateCamera("up has zero length".to_string())));
        }
        if self.direction.cross(self.up).length_squared() == 0.0 {
            return Err(culling_err!(SOURCE,
                Error::DegenerateCamera("up is collinear with direction".to_string())));
        }

        if !(self.near_distance.is_finite() && self.far_distance.is_finite()) {
            return Err(culling_err!(SOURCE,
                Error::InvalidProjection("clip distances must be finite".to_string())));
        }
        if self.near_distance < 0.0 {
            return Err(culling_err!(SOURCE,
                Error::InvalidProjection(format!("near distance {} is negative", self.near_distance))));
        }
        if self.far_distance <= self.near_distance {
            return Err(culling_err!(SOURCE,
                Error::InvalidProjection(format!(
                    "far distance {} must be greater than near distance {}",
                    self.far_distance, self.near_distance
                ))));
        }

        match self.projection {
            Projection::Perspective { fov, ratio } => {
                if !(fov > 0.0 && fov < std::f32::consts::PI) {
                    return Err(culling_err!(SOURCE,
                        Error::InvalidProjection(format!("fov {} must be in (0, pi)", fov))));
                }
                if !(ratio > 0.0 && ratio.is_finite()) {
                    return Err(culling_err!(SOURCE,
                        Error::InvalidProjection(format!("ratio {} must be positive", ratio))));
                }
            }
            Projection::Orthographic { width, height } => {
                if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
                    return Err(culling_err!(SOURCE,
                        Error::InvalidProjection(format!(
                            "orthographic extents {}x{} must be positive", width, height
                        ))));
                }
            }
            Projection::Unspecified => {
                return Err(culling_err!(SOURCE,
                    Error::InvalidProjection("projection is unspecified".to_string())));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
