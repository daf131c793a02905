/*!
# Galaxy 3D Culling

Spatial-culling primitives for the Galaxy 3D engine.

This crate answers one question per object and per frame: can this bounding
volume possibly be visible from this camera (or light)? It provides plain
`Copy` math types that a renderer, a shadow pass or a spatial index can query
from any thread once built.

## Architecture

- **Plane**: signed half-space with distance and line intersection
- **Sphere**: bounding sphere (center + radius)
- **AABB**: axis-aligned box with merge, overlap and transform
- **Frustum**: up to eight planes (six standard + two caller-defined),
  stored struct-of-arrays, with sphere and AABB containment tests
- **FrustumDesc**: camera description used to build and validate a frustum

Diagnostics go through a pluggable logger (`galaxy3d::log`).
*/

// Internal modules
mod error;
pub mod log;
pub mod geometry;
pub mod camera;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and logger control; macros live at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
            enabled, log, log_detailed,
        };
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
