//! Primitive shape builders
//!
//! Builds draw commands for the limit shapes:
//! - Sphere (from the cached unit sphere)
//! - Cylinder (swept around the transform's up axis)
//! - Cone (apex at the origin, base opening along up)
//! - Capsule (cached hemispheres joined by a cylinder body)
//!
//! Degenerate live data (radius <= 0, height < 0, non-finite input) yields an
//! empty command list rather than an error. An invalid tessellation step count
//! is reported as [`GeometryError::InvalidParameter`](crate::GeometryError).

mod capsule;
mod cone;
mod cylinder;
mod sphere;

pub use capsule::CapsuleParts;

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::draw::{Rgba, srgb_to_linear};
use crate::tessellation::TessellationCache;
use crate::transform::WorldTransform;

/// End-cap treatment for cylinders and cones
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    /// Open ends
    #[default]
    None,
    /// Filled ends with their own color
    Tinted {
        /// Cap color
        color: Rgba,
        /// Convert `color` from sRGB to linear before use
        linear: bool,
    },
}

impl CapStyle {
    /// Resolved cap color, or `None` for open ends.
    pub fn color(self) -> Option<Rgba> {
        match self {
            CapStyle::None => None,
            CapStyle::Tinted { color, linear } => {
                Some(if linear { srgb_to_linear(color) } else { color })
            }
        }
    }
}

/// Emits sphere, cylinder, cone and capsule draw commands.
///
/// Holds a shared handle to the tessellation cache; the builder itself keeps
/// no per-shape state and can be reused for any number of objects.
#[derive(Debug, Clone)]
pub struct PrimitiveBuilder {
    cache: Arc<TessellationCache>,
}

impl PrimitiveBuilder {
    /// Create a builder backed by `cache`.
    pub fn new(cache: Arc<TessellationCache>) -> Self {
        Self { cache }
    }

    /// Shared tessellation cache.
    pub fn cache(&self) -> &Arc<TessellationCache> {
        &self.cache
    }
}

/// Returns true when the inputs cannot produce a shape and must be skipped.
pub(crate) fn is_degenerate(transform: &WorldTransform, radius: f32, height: f32) -> bool {
    let degenerate = !transform.is_finite()
        || !radius.is_finite()
        || !height.is_finite()
        || radius <= 0.0
        || height < 0.0;
    if degenerate {
        tracing::trace!(radius, height, "Skipping degenerate primitive");
    }
    degenerate
}

/// Point on a circle of `radius` around local +Y at height `y`.
fn ring_point(angle: f32, radius: f32, y: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(cos * radius, y, sin * radius)
}

/// World-space ring of `steps` points around the transform's up axis.
pub(crate) fn world_ring(
    transform: &WorldTransform,
    radius: f32,
    y: f32,
    steps: u32,
) -> Vec<Vec3> {
    let step = std::f32::consts::TAU / steps as f32;
    (0..steps)
        .map(|i| transform.transform_point(ring_point(i as f32 * step, radius, y)))
        .collect()
}

/// Outward unit normal of local direction `local` under `transform`.
pub(crate) fn world_normal(transform: &WorldTransform, local: Vec3) -> Vec3 {
    transform.transform_vector(local).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, ShapeStyle};

    fn builder() -> PrimitiveBuilder {
        PrimitiveBuilder::new(Arc::new(TessellationCache::new()))
    }

    #[test]
    fn test_degenerate_inputs_skip_silently() {
        let builder = builder();
        let style = ShapeStyle::default();
        let identity = WorldTransform::IDENTITY;

        assert!(builder.sphere(&identity, 0.0, 24, &style).unwrap().is_empty());
        assert!(builder.sphere(&identity, -1.0, 24, &style).unwrap().is_empty());
        assert!(
            builder
                .cylinder(&identity, 1.0, -0.5, 24, &style, CapStyle::None)
                .unwrap()
                .is_empty()
        );
        assert!(
            builder
                .cone(&identity, f32::NAN, 1.0, 24, &style, CapStyle::None)
                .unwrap()
                .is_empty()
        );
        assert!(builder.capsule(&identity, 1.0, f32::INFINITY, 24, &style).unwrap().is_empty());

        let mut broken = identity;
        broken.up = Vec3::splat(f32::NAN);
        assert!(builder.sphere(&broken, 1.0, 24, &style).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_steps_is_an_error() {
        let builder = builder();
        let style = ShapeStyle::default();
        let identity = WorldTransform::IDENTITY;
        assert!(builder.sphere(&identity, 1.0, 0, &style).is_err());
        assert!(
            builder
                .cylinder(&identity, 1.0, 1.0, 400, &style, CapStyle::None)
                .is_err()
        );
        assert!(builder.capsule(&identity, 1.0, 1.0, 7, &style).is_err());
    }

    #[test]
    fn test_linear_cap_tint() {
        let cap = CapStyle::Tinted {
            color: [0.5, 0.5, 0.5, 1.0],
            linear: true,
        };
        let color = cap.color().unwrap();
        assert!(color[0] < 0.5);
        assert_eq!(CapStyle::None.color(), None);
    }

    #[test]
    fn test_every_shape_emits_lines_in_wireframe() {
        let builder = builder();
        let style = ShapeStyle::default();
        let identity = WorldTransform::IDENTITY;
        let shapes = [
            builder.sphere(&identity, 1.0, 12, &style).unwrap(),
            builder
                .cylinder(&identity, 1.0, 2.0, 12, &style, CapStyle::None)
                .unwrap(),
            builder
                .cone(&identity, 1.0, 2.0, 12, &style, CapStyle::None)
                .unwrap(),
            builder.capsule(&identity, 1.0, 2.0, 12, &style).unwrap(),
        ];
        for commands in shapes {
            assert!(!commands.is_empty());
            assert!(commands.iter().all(DrawCommand::is_line));
        }
    }
}
