//! Unit-sphere tessellation cache
//!
//! Unit geometry is generated once per step count and shared by every caller.
//! Radius and transform are applied at draw time, so generation cost scales
//! with the number of quality presets in use rather than the number of
//! objects drawn.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;

use crate::constants::{MAX_TESSELLATION_STEPS, MIN_TESSELLATION_STEPS};
use crate::error::{GeometryError, GeometryResult};

/// Validated number of angular subdivisions per full turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TessellationKey(u32);

impl TessellationKey {
    /// Validate a step count.
    ///
    /// The count must lie in `1..=360` and divide 360 evenly so every cell
    /// spans the same whole-degree angle.
    pub fn new(steps: u32) -> GeometryResult<Self> {
        if !(MIN_TESSELLATION_STEPS..=MAX_TESSELLATION_STEPS).contains(&steps) {
            return Err(GeometryError::invalid(format!(
                "tessellation step count {steps} outside {MIN_TESSELLATION_STEPS}..={MAX_TESSELLATION_STEPS}"
            )));
        }
        if 360 % steps != 0 {
            return Err(GeometryError::invalid(format!(
                "tessellation step count {steps} does not divide 360"
            )));
        }
        Ok(Self(steps))
    }

    /// Number of subdivisions per full turn.
    pub fn steps(self) -> u32 {
        self.0
    }

    /// Angle covered by one subdivision, in radians.
    pub fn step_angle(self) -> f32 {
        (360.0 / self.0 as f32).to_radians()
    }

    /// Number of polar rows between the pole and the equator.
    pub fn polar_rows(self) -> u32 {
        self.0.div_ceil(4)
    }
}

/// Unit-radius sphere centered at the origin, as quads of four vertices.
///
/// The first half of the vertices covers the +Z hemisphere, the second half is
/// its mirror across the XY plane. Within each quad the vertices are ordered
/// `(p0, a0)`, `(p0, a1)`, `(p1, a1)`, `(p1, a0)` where `p` is the polar angle
/// from +Z and `a` the azimuth.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSphereMesh {
    key: TessellationKey,
    vertices: Vec<Vec3>,
}

impl UnitSphereMesh {
    /// Generate the mesh for `key`.
    pub fn generate(key: TessellationKey) -> Self {
        let step = key.step_angle();
        let rows = key.polar_rows();
        let columns = key.steps();
        let mut vertices = Vec::with_capacity((rows * columns * 8) as usize);

        for row in 0..rows {
            let p0 = row as f32 * step;
            let p1 = ((row + 1) as f32 * step).min(FRAC_PI_2);
            for column in 0..columns {
                let a0 = column as f32 * step;
                let a1 = (column + 1) as f32 * step;
                vertices.push(spherical(p0, a0));
                vertices.push(spherical(p0, a1));
                vertices.push(spherical(p1, a1));
                vertices.push(spherical(p1, a0));
            }
        }

        let mirrored: Vec<Vec3> = vertices
            .iter()
            .map(|v| Vec3::new(v.x, v.y, -v.z))
            .collect();
        vertices.extend(mirrored);

        Self { key, vertices }
    }

    /// Key this mesh was generated for.
    pub fn key(&self) -> TessellationKey {
        self.key
    }

    /// All vertices, four per quad.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Index splitting the +Z hemisphere from its mirror.
    pub fn midpoint(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Vertices of the +Z hemisphere.
    pub fn upper_half(&self) -> &[Vec3] {
        &self.vertices[..self.midpoint()]
    }

    /// Vertices of the -Z hemisphere.
    pub fn lower_half(&self) -> &[Vec3] {
        &self.vertices[self.midpoint()..]
    }

    /// Iterate over quads.
    pub fn quads(&self) -> impl Iterator<Item = [Vec3; 4]> + '_ {
        quads_of(&self.vertices)
    }

    /// Number of quads.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Group a vertex run into quads.
pub fn quads_of(vertices: &[Vec3]) -> impl Iterator<Item = [Vec3; 4]> + '_ {
    vertices
        .chunks_exact(4)
        .map(|quad| [quad[0], quad[1], quad[2], quad[3]])
}

fn spherical(polar: f32, azimuth: f32) -> Vec3 {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    Vec3::new(sin_p * cos_a, sin_p * sin_a, cos_p)
}

/// Process-lifetime cache of unit-sphere meshes keyed by step count.
///
/// Entries are never evicted. First population of a key takes the write lock;
/// every later lookup only reads.
#[derive(Debug, Default)]
pub struct TessellationCache {
    meshes: RwLock<HashMap<TessellationKey, Arc<UnitSphereMesh>>>,
}

impl TessellationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with the given step counts already generated.
    pub fn with_presets(steps: &[u32]) -> GeometryResult<Self> {
        let cache = Self::new();
        cache.warm(steps)?;
        Ok(cache)
    }

    /// Unit-sphere mesh for `steps`, generating it on first use.
    pub fn unit_sphere(&self, steps: u32) -> GeometryResult<Arc<UnitSphereMesh>> {
        let key = TessellationKey::new(steps)?;
        if let Some(mesh) = self.meshes.read().get(&key) {
            return Ok(Arc::clone(mesh));
        }

        let mut meshes = self.meshes.write();
        let mesh = meshes.entry(key).or_insert_with(|| {
            tracing::debug!("Generating unit sphere for {} steps", steps);
            Arc::new(UnitSphereMesh::generate(key))
        });
        Ok(Arc::clone(mesh))
    }

    /// Generate every listed step count up front.
    pub fn warm(&self, steps: &[u32]) -> GeometryResult<()> {
        for &count in steps {
            self.unit_sphere(count)?;
        }
        Ok(())
    }

    /// Number of distinct meshes generated so far.
    pub fn len(&self) -> usize {
        self.meshes.read().len()
    }

    /// Returns true if nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.meshes.read().is_empty()
    }

    /// Returns true if `steps` has already been generated.
    pub fn contains(&self, steps: u32) -> bool {
        TessellationKey::new(steps)
            .map(|key| self.meshes.read().contains_key(&key))
            .unwrap_or(false)
    }
}
