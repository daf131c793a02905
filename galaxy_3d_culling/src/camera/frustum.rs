/// Frustum: up to eight clipping planes for visibility culling.
///
/// Planes are stored struct-of-arrays (`xs`, `ys`, `zs`, `ds`) so that
/// testing a sphere against every plane is a flat loop over contiguous
/// floats. A `PlaneMask` records which slots are populated: only active
/// slots take part in containment tests, so the two extra slots impose no
/// constraint until they are explicitly set.
///
/// Sign convention: every active normal points INTO the frustum. A point
/// strictly inside has a positive distance to every active plane.
///
/// A frustum is rebuilt by one writer (usually once per frame) and then
/// queried read-only, possibly from many threads at once.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use crate::{culling_debug, culling_trace};
use crate::error::{Error, Result};
use crate::geometry::{Plane, Sphere, AABB};
use super::projection::{FrustumDesc, Projection};

const SOURCE: &str = "galaxy3d::Frustum";

/// Result of a 3-way frustum/AABB classification.
///
/// - `Outside` → skip the object (or the whole subtree of a spatial index)
/// - `Inside` → fully visible, no further plane tests needed
/// - `Partial` → straddles at least one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane slots, in the order containment tests visit them.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planes {
    Near,
    Far,
    Left,
    Right,
    Top,
    Bottom,
    /// Caller-defined plane (cascade split, portal, clip override)
    Extra0,
    /// Caller-defined plane (cascade split, portal, clip override)
    Extra1,
}

impl Planes {
    /// Number of plane slots
    pub const COUNT: usize = 8;

    /// Every slot, in slot order
    pub const ALL: [Planes; Planes::COUNT] = [
        Planes::Near,
        Planes::Far,
        Planes::Left,
        Planes::Right,
        Planes::Top,
        Planes::Bottom,
        Planes::Extra0,
        Planes::Extra1,
    ];

    /// Index of this slot in the plane arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this slot.
    #[inline]
    pub fn mask(self) -> PlaneMask {
        PlaneMask::from_bits_retain(1 << self as u8)
    }
}

impl TryFrom<usize> for Planes {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Planes::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidPlaneIndex(index))
    }
}

bitflags! {
    /// Set of populated frustum plane slots.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneMask: u8 {
        const NEAR   = 1 << 0;
        const FAR    = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
        const TOP    = 1 << 4;
        const BOTTOM = 1 << 5;
        const EXTRA0 = 1 << 6;
        const EXTRA1 = 1 << 7;

        /// The six planes built by `compute_ortho` / `compute_perspective`
        const STANDARD = Self::NEAR.bits() | Self::FAR.bits()
            | Self::LEFT.bits() | Self::RIGHT.bits()
            | Self::TOP.bits() | Self::BOTTOM.bits();
        /// The two caller-defined slots
        const EXTRA = Self::EXTRA0.bits() | Self::EXTRA1.bits();
    }
}

/// Struct-of-arrays plane storage, indexed by `Planes::index()`.
///
/// Plain `f32` arrays, so the block can be copied as-is into a GPU
/// uniform or storage buffer with `bytemuck::bytes_of`. Inactive slots
/// hold zeros.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrustumPlanes {
    /// Normal x components
    pub xs: [f32; Planes::COUNT],
    /// Normal y components
    pub ys: [f32; Planes::COUNT],
    /// Normal z components
    pub zs: [f32; Planes::COUNT],
    /// Plane offsets
    pub ds: [f32; Planes::COUNT],
}

/// View frustum built from a camera or light description.
///
/// Also retains the description it was computed from (position,
/// direction, up, projection, clip distances) and the bounding sphere
/// of the volume (`center`, `radius`), for diagnostics and `recompute()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: FrustumPlanes,
    active: PlaneMask,

    center: Vec3,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    projection: Projection,
    near_distance: f32,
    far_distance: f32,
    radius: f32,
}

/// Orthonormal camera basis: (right, up, forward).
///
/// `right = normalize(cross(direction, up))`.
fn camera_basis(direction: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
    let forward = direction.normalize();
    let right = forward.cross(up).normalize();
    let true_up = right.cross(forward);
    (right, true_up, forward)
}

impl Frustum {
    /// Frustum with no active plane: every sphere is inside.
    pub fn new() -> Self {
        Self {
            planes: FrustumPlanes::zeroed(),
            active: PlaneMask::empty(),
            center: Vec3::ZERO,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            up: Vec3::ZERO,
            projection: Projection::Unspecified,
            near_distance: 0.0,
            far_distance: 0.0,
            radius: 0.0,
        }
    }

    /// Build a frustum from a camera description, without validation.
    pub fn from_desc(desc: &FrustumDesc) -> Self {
        let mut frustum = Self::new();
        frustum.compute_from_desc(desc);
        frustum
    }

    /// Validate a camera description, then build its frustum.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `FrustumDesc::validate()`.
    pub fn try_from_desc(desc: &FrustumDesc) -> Result<Self> {
        desc.validate()?;
        Ok(Self::from_desc(desc))
    }

    /// Extract the six standard planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method for a 0..1 clip depth range
    /// (glam `perspective_rh` / `orthographic_rh`, Vulkan, wgpu).
    /// Planes are normalized. The camera description is unknown, so
    /// `projection()` is `Unspecified` and `corners()` returns `None`.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();
        let row = |r: usize| Vec4::new(m[0][r], m[1][r], m[2][r], m[3][r]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut frustum = Self::new();
        for (side, v) in [
            (Planes::Near, r2),
            (Planes::Far, r3 - r2),
            (Planes::Left, r3 + r0),
            (Planes::Right, r3 - r0),
            (Planes::Top, r3 - r1),
            (Planes::Bottom, r3 + r1),
        ] {
            let plane = Plane::from_vec4(v).normalized();
            frustum.set_plane_with_d(side, plane.normal, plane.d);
        }

        culling_trace!(SOURCE, "Frustum extracted from view-projection matrix");
        frustum
    }

    // ===== CONSTRUCTION =====

    /// Rebuild all plane slots for an orthographic view volume.
    ///
    /// Near and far planes are perpendicular to `direction` at the given
    /// distances; the side planes are parallel to `direction`, offset by
    /// half of `width` along `normalize(cross(direction, up))` and half
    /// of `height` along the corrected up axis. Extra slots are cleared.
    ///
    /// Inputs are not validated: zero or collinear `direction`/`up`
    /// produce NaN planes.
    pub fn compute_ortho(
        &mut self,
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        near_distance: f32,
        far_distance: f32,
    ) {
        let (right, true_up, forward) = camera_basis(direction, up);
        let half_width = width * 0.5;
        let half_height = height * 0.5;
        let near_center = position + forward * near_distance;
        let far_center = position + forward * far_distance;

        self.reset_planes();
        self.set_plane(Planes::Near, forward, near_center);
        self.set_plane(Planes::Far, -forward, far_center);
        self.set_plane(Planes::Left, right, position - right * half_width);
        self.set_plane(Planes::Right, -right, position + right * half_width);
        self.set_plane(Planes::Top, -true_up, position + true_up * half_height);
        self.set_plane(Planes::Bottom, true_up, position - true_up * half_height);

        self.position = position;
        self.direction = direction;
        self.up = up;
        self.projection = Projection::Orthographic { width, height };
        self.near_distance = near_distance;
        self.far_distance = far_distance;
        self.center = (near_center + far_center) * 0.5;
        self.radius = Vec3::new(
            half_width,
            half_height,
            (far_distance - near_distance) * 0.5,
        )
        .length();

        culling_trace!(
            SOURCE,
            "Orthographic frustum: position={} direction={} {}x{} near={} far={}",
            position, direction, width, height, near_distance, far_distance
        );
    }

    /// Rebuild all plane slots for a perspective view volume.
    ///
    /// `fov` is the vertical field of view in radians and `ratio` is
    /// width / height, so the horizontal half-angle `h` satisfies
    /// `tan(h) = tan(fov / 2) * ratio`. Side planes pass through
    /// `position`; each normal is `direction` tilted away from its edge
    /// by the complement of the half-angle. Extra slots are cleared.
    ///
    /// Inputs are not validated: zero or collinear `direction`/`up`
    /// produce NaN planes.
    pub fn compute_perspective(
        &mut self,
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        fov: f32,
        ratio: f32,
        near_distance: f32,
        far_distance: f32,
    ) {
        let (right, true_up, forward) = camera_basis(direction, up);
        let tan_v = (fov * 0.5).tan();
        let tan_h = tan_v * ratio;
        let near_center = position + forward * near_distance;
        let far_center = position + forward * far_distance;

        self.reset_planes();
        self.set_plane(Planes::Near, forward, near_center);
        self.set_plane(Planes::Far, -forward, far_center);
        self.set_plane(Planes::Left, (forward * tan_h + right).normalize(), position);
        self.set_plane(Planes::Right, (forward * tan_h - right).normalize(), position);
        self.set_plane(Planes::Top, (forward * tan_v - true_up).normalize(), position);
        self.set_plane(Planes::Bottom, (forward * tan_v + true_up).normalize(), position);

        self.position = position;
        self.direction = direction;
        self.up = up;
        self.projection = Projection::Perspective { fov, ratio };
        self.near_distance = near_distance;
        self.far_distance = far_distance;
        self.center = (near_center + far_center) * 0.5;

        let near_corner = near_center
            + right * (near_distance * tan_h)
            + true_up * (near_distance * tan_v);
        let far_corner = far_center
            + right * (far_distance * tan_h)
            + true_up * (far_distance * tan_v);
        self.radius = self.center.distance(far_corner).max(self.center.distance(near_corner));

        culling_trace!(
            SOURCE,
            "Perspective frustum: position={} direction={} fov={} ratio={} near={} far={}",
            position, direction, fov, ratio, near_distance, far_distance
        );
    }

    /// Rebuild the planes from a camera description.
    pub fn compute_from_desc(&mut self, desc: &FrustumDesc) {
        match desc.projection {
            Projection::Perspective { fov, ratio } => self.compute_perspective(
                desc.position,
                desc.direction,
                desc.up,
                fov,
                ratio,
                desc.near_distance,
                desc.far_distance,
            ),
            Projection::Orthographic { width, height } => self.compute_ortho(
                desc.position,
                desc.direction,
                desc.up,
                width,
                height,
                desc.near_distance,
                desc.far_distance,
            ),
            Projection::Unspecified => {
                self.reset_planes();
                self.projection = Projection::Unspecified;
            }
        }
    }

    /// Re-run the construction this frustum was last built with.
    ///
    /// Extra planes are cleared like any other rebuild. Does nothing
    /// for a frustum with an `Unspecified` projection.
    pub fn recompute(&mut self) {
        if self.projection != Projection::Unspecified {
            let desc = self.desc();
            self.compute_from_desc(&desc);
        }
    }

    // ===== PLANE SLOTS =====

    /// Set plane `side` to pass through `point` with `normal`, and mark it active.
    ///
    /// `normal` should point into the frustum and be unit length.
    pub fn set_plane(&mut self, side: Planes, normal: Vec3, point: Vec3) {
        self.set_plane_with_d(side, normal, -point.dot(normal));
    }

    /// Set plane `side` from its normal and offset, and mark it active.
    pub fn set_plane_with_d(&mut self, side: Planes, normal: Vec3, d: f32) {
        let i = side.index();
        self.planes.xs[i] = normal.x;
        self.planes.ys[i] = normal.y;
        self.planes.zs[i] = normal.z;
        self.planes.ds[i] = d;
        self.active.insert(side.mask());

        if PlaneMask::EXTRA.contains(side.mask()) {
            culling_debug!(SOURCE, "{:?} plane set: normal={} d={}", side, normal, d);
        }
    }

    /// Deactivate plane `side`; it no longer constrains containment tests.
    pub fn clear_plane(&mut self, side: Planes) {
        let i = side.index();
        self.planes.xs[i] = 0.0;
        self.planes.ys[i] = 0.0;
        self.planes.zs[i] = 0.0;
        self.planes.ds[i] = 0.0;
        self.active.remove(side.mask());

        if PlaneMask::EXTRA.contains(side.mask()) {
            culling_debug!(SOURCE, "{:?} plane cleared", side);
        }
    }

    fn reset_planes(&mut self) {
        self.planes = FrustumPlanes::zeroed();
        self.active = PlaneMask::empty();
    }

    /// Normal stored in slot `side` (zero when the slot is inactive).
    #[inline]
    pub fn normal(&self, side: Planes) -> Vec3 {
        let i = side.index();
        Vec3::new(self.planes.xs[i], self.planes.ys[i], self.planes.zs[i])
    }

    /// Plane in slot `side`, or `None` when the slot is inactive.
    pub fn plane(&self, side: Planes) -> Option<Plane> {
        self.is_active(side)
            .then(|| Plane::new(self.normal(side), self.planes.ds[side.index()]))
    }

    #[inline]
    pub fn is_active(&self, side: Planes) -> bool {
        self.active.contains(side.mask())
    }

    pub fn active_planes(&self) -> PlaneMask {
        self.active
    }

    /// Raw struct-of-arrays plane block.
    pub fn planes(&self) -> &FrustumPlanes {
        &self.planes
    }

    #[inline]
    fn slot_distance(&self, i: usize, point: Vec3) -> f32 {
        self.planes.xs[i] * point.x
            + self.planes.ys[i] * point.y
            + self.planes.zs[i] * point.z
            + self.planes.ds[i]
    }

    // ===== QUERIES =====

    /// Whether a sphere straddles (strictly crosses) the near plane.
    ///
    /// True when the unsigned distance from `center` to the near plane is
    /// strictly less than `radius`, whichever side the center is on.
    /// A sphere that only touches the plane does not intersect it.
    /// Always false when the near slot is inactive.
    #[inline]
    pub fn intersect_near_plane(&self, center: Vec3, radius: f32) -> bool {
        if !self.active.contains(PlaneMask::NEAR) {
            return false;
        }
        self.slot_distance(Planes::Near.index(), center).abs() < radius
    }

    /// First active plane, in slot order, that has the sphere entirely on
    /// its negative side (`distance < -radius`), or `None` if no plane
    /// rejects it.
    #[inline]
    pub fn culling_plane(&self, center: Vec3, radius: f32) -> Option<Planes> {
        let neg_radius = -radius;
        let mut bits = self.active.bits();
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            if self.slot_distance(i, center) < neg_radius {
                return Some(Planes::ALL[i]);
            }
        }
        None
    }

    /// Conservative sphere visibility test.
    ///
    /// A sphere is outside if it lies entirely on the negative side of any
    /// active plane; partially overlapping spheres count as inside. Stops
    /// at the first rejecting plane.
    #[inline]
    pub fn is_sphere_inside(&self, center: Vec3, radius: f32) -> bool {
        self.culling_plane(center, radius).is_none()
    }

    /// `is_sphere_inside` for a `Sphere`.
    #[inline]
    pub fn contains_sphere(&self, sphere: &Sphere) -> bool {
        self.is_sphere_inside(sphere.position, sphere.radius)
    }

    /// Test if an AABB is (potentially) inside or intersecting the frustum.
    ///
    /// Uses the "positive vertex" test: for each active plane, the AABB
    /// corner furthest along the normal is checked. If that corner is
    /// strictly outside, the whole box is outside. Conservative: may
    /// return false positives, never false negatives.
    pub fn is_aabb_inside(&self, aabb: &AABB) -> bool {
        let mut bits = self.active.bits();
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;

            let p_vertex = Vec3::new(
                if self.planes.xs[i] >= 0.0 { aabb.max.x } else { aabb.min.x },
                if self.planes.ys[i] >= 0.0 { aabb.max.y } else { aabb.min.y },
                if self.planes.zs[i] >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            if self.slot_distance(i, p_vertex) < 0.0 {
                return false;
            }
        }
        true
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - If the p-vertex is outside any plane → `Outside` (early out)
    /// - If the n-vertex is outside any plane → at least `Partial`
    /// - If all n-vertices are inside all planes → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;
        let mut bits = self.active.bits();

        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;

            let positive = (
                self.planes.xs[i] >= 0.0,
                self.planes.ys[i] >= 0.0,
                self.planes.zs[i] >= 0.0,
            );

            let p_vertex = Vec3::new(
                if positive.0 { aabb.max.x } else { aabb.min.x },
                if positive.1 { aabb.max.y } else { aabb.min.y },
                if positive.2 { aabb.max.z } else { aabb.min.z },
            );
            if self.slot_distance(i, p_vertex) < 0.0 {
                return FrustumTest::Outside;
            }

            let n_vertex = Vec3::new(
                if positive.0 { aabb.min.x } else { aabb.max.x },
                if positive.1 { aabb.min.y } else { aabb.max.y },
                if positive.2 { aabb.min.z } else { aabb.max.z },
            );
            if self.slot_distance(i, n_vertex) < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// The 8 corner points of the view volume.
    ///
    /// Corner `i` is on the right side when bit 0 is set (left otherwise),
    /// the top side for bit 1 (bottom otherwise), and the far plane for
    /// bit 2 (near otherwise). `None` for an `Unspecified` projection.
    pub fn corners(&self) -> Option<[Vec3; 8]> {
        let (near_half, far_half) = match self.projection {
            Projection::Perspective { fov, ratio } => {
                let tan_v = (fov * 0.5).tan();
                let tan_h = tan_v * ratio;
                (
                    (self.near_distance * tan_h, self.near_distance * tan_v),
                    (self.far_distance * tan_h, self.far_distance * tan_v),
                )
            }
            Projection::Orthographic { width, height } => {
                let half = (width * 0.5, height * 0.5);
                (half, half)
            }
            Projection::Unspecified => return None,
        };

        let (right, true_up, forward) = camera_basis(self.direction, self.up);
        Some(std::array::from_fn(|i| {
            let (distance, (half_width, half_height)) = if i & 4 != 0 {
                (self.far_distance, far_half)
            } else {
                (self.near_distance, near_half)
            };
            let x = if i & 1 != 0 { half_width } else { -half_width };
            let y = if i & 2 != 0 { half_height } else { -half_height };
            self.position + forward * distance + right * x + true_up * y
        }))
    }

    // ===== CAMERA DESCRIPTION =====

    /// Camera description this frustum was computed from.
    pub fn desc(&self) -> FrustumDesc {
        FrustumDesc {
            position: self.position,
            direction: self.direction,
            up: self.up,
            near_distance: self.near_distance,
            far_distance: self.far_distance,
            projection: self.projection,
        }
    }

    /// Center of the frustum's bounding sphere.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the frustum's bounding sphere.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Bounding sphere of the view volume.
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::from_point(self.center, self.radius)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Vertical field of view in radians (0 unless perspective).
    pub fn fov(&self) -> f32 {
        self.projection.fov()
    }

    /// Width / height ratio (0 when unknown).
    pub fn ratio(&self) -> f32 {
        self.projection.ratio()
    }

    pub fn near_distance(&self) -> f32 {
        self.near_distance
    }

    pub fn far_distance(&self) -> f32 {
        self.far_distance
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
