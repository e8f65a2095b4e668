//! Capsule commands
//!
//! The two caps reuse the cached unit sphere split at its midpoint: the +Z
//! half becomes the top cap and the mirrored half the bottom cap. Both are
//! rotated so the unit sphere's +Z pole points along up, then offset by
//! exactly `±height / 2`. Their equator rows therefore coincide with the ends
//! of the cylinder body.

use glam::Vec3;

use super::cylinder::emit_side;
use super::sphere::emit_sphere_quads;
use super::{PrimitiveBuilder, is_degenerate, world_ring};
use crate::draw::{DrawCommand, ShapeStyle};
use crate::error::GeometryResult;
use crate::transform::WorldTransform;

/// Capsule commands split by part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapsuleParts {
    /// Hemisphere above the body
    pub top_cap: Vec<DrawCommand>,
    /// Cylinder body between the caps
    pub body: Vec<DrawCommand>,
    /// Hemisphere below the body
    pub bottom_cap: Vec<DrawCommand>,
}

impl CapsuleParts {
    /// Every command, top cap first.
    pub fn into_commands(self) -> Vec<DrawCommand> {
        let mut commands = self.top_cap;
        commands.extend(self.body);
        commands.extend(self.bottom_cap);
        commands
    }

    /// Returns true if no part produced anything.
    pub fn is_empty(&self) -> bool {
        self.top_cap.is_empty() && self.body.is_empty() && self.bottom_cap.is_empty()
    }
}

/// Rotate unit-sphere space so +Z maps onto +Y.
fn z_to_up(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

impl PrimitiveBuilder {
    /// Capsule along up whose body spans `height` and whose caps add `radius`
    /// at each end.
    pub fn capsule(
        &self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        steps: u32,
        style: &ShapeStyle,
    ) -> GeometryResult<Vec<DrawCommand>> {
        self.capsule_parts(transform, radius, height, steps, style)
            .map(CapsuleParts::into_commands)
    }

    /// Same as [`capsule`](Self::capsule) with caps and body kept apart.
    pub fn capsule_parts(
        &self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        steps: u32,
        style: &ShapeStyle,
    ) -> GeometryResult<CapsuleParts> {
        if is_degenerate(transform, radius, height) {
            return Ok(CapsuleParts::default());
        }
        let mesh = self.cache().unit_sphere(steps)?;
        let half = height * 0.5;

        let mut parts = CapsuleParts::default();
        emit_sphere_quads(
            mesh.upper_half(),
            transform,
            radius,
            Vec3::Y * half,
            z_to_up,
            true,
            style,
            &mut parts.top_cap,
        );
        emit_sphere_quads(
            mesh.lower_half(),
            transform,
            radius,
            Vec3::Y * -half,
            z_to_up,
            true,
            style,
            &mut parts.bottom_cap,
        );

        // Body rims come from the caps' equator rows; only the sides are drawn here.
        let steps = mesh.key().steps();
        let bottom = world_ring(transform, radius, -half, steps);
        let top = world_ring(transform, radius, half, steps);
        emit_side(transform, &bottom, &top, style, &mut parts.body);

        Ok(parts)
    }
}
