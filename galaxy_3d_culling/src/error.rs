//! Error types for the Galaxy3D culling library
//!
//! Culling queries themselves never fail: degenerate inputs are caller
//! contract violations and are not checked on the hot path. The errors
//! below are only produced by the opt-in validation and conversion helpers.

use std::fmt;

/// Result type for Galaxy3D culling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D culling errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Raw frustum plane index outside `0..Planes::COUNT`
    InvalidPlaneIndex(usize),

    /// Camera pose cannot span a frustum (zero or collinear axes, non-finite values)
    DegenerateCamera(String),

    /// Projection parameters out of range (fov, ratio, extents, clip distances)
    InvalidProjection(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPlaneIndex(index) => write!(f, "Invalid plane index: {}", index),
            Error::DegenerateCamera(msg) => write!(f, "Degenerate camera: {}", msg),
            Error::InvalidProjection(msg) => write!(f, "Invalid projection: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
