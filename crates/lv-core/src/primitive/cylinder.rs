//! Cylinder commands swept around the up axis

use glam::Vec3;

use super::{CapStyle, PrimitiveBuilder, is_degenerate, world_normal, world_ring};
use crate::draw::{DrawCommand, Rgba, ShapeStyle};
use crate::error::GeometryResult;
use crate::tessellation::TessellationKey;
use crate::transform::WorldTransform;

impl PrimitiveBuilder {
    /// Cylinder centered at the transform's origin, spanning `height` along up.
    ///
    /// Does not use the sphere cache: `steps` only sets the number of angular
    /// increments. Wireframe mode emits side lines plus bottom and top rims;
    /// solid mode emits side quads and, when `caps` asks for them, end-cap
    /// triangles in the cap color.
    pub fn cylinder(
        &self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        steps: u32,
        style: &ShapeStyle,
        caps: CapStyle,
    ) -> GeometryResult<Vec<DrawCommand>> {
        if is_degenerate(transform, radius, height) {
            return Ok(Vec::new());
        }
        let key = TessellationKey::new(steps)?;
        let half = height * 0.5;

        let bottom = world_ring(transform, radius, -half, key.steps());
        let top = world_ring(transform, radius, half, key.steps());

        let mut commands = Vec::with_capacity(bottom.len() * 4);
        emit_side(transform, &bottom, &top, style, &mut commands);
        if style.mode.has_lines() {
            emit_rim(&bottom, style, &mut commands);
            emit_rim(&top, style, &mut commands);
        }
        if style.mode.has_faces()
            && let Some(color) = caps.color()
        {
            let up = world_normal(transform, Vec3::Y);
            let top_center = transform.transform_point(Vec3::Y * half);
            let bottom_center = transform.transform_point(Vec3::Y * -half);
            emit_cap(top_center, &top, up, color, style, &mut commands);
            emit_cap(bottom_center, &bottom, -up, color, style, &mut commands);
        }
        Ok(commands)
    }
}

/// Side lines and quads between two rings of equal length.
pub(super) fn emit_side(
    transform: &WorldTransform,
    bottom: &[Vec3],
    top: &[Vec3],
    style: &ShapeStyle,
    commands: &mut Vec<DrawCommand>,
) {
    let axis = transform.translation;
    let up = world_normal(transform, Vec3::Y);
    for i in 0..bottom.len() {
        let next = (i + 1) % bottom.len();
        if style.mode.has_lines() {
            commands.extend(style.line(bottom[i], top[i]).map(DrawCommand::Line));
        }
        if style.mode.has_faces() {
            let mid = (bottom[i] + bottom[next]) * 0.5;
            let radial = mid - axis;
            let normal = (radial - up * radial.dot(up)).normalize_or_zero();
            commands.push(DrawCommand::Quad(
                style.quad([bottom[i], bottom[next], top[next], top[i]], normal),
            ));
        }
    }
}

/// Closed loop of lines through `ring`.
pub(super) fn emit_rim(ring: &[Vec3], style: &ShapeStyle, commands: &mut Vec<DrawCommand>) {
    for i in 0..ring.len() {
        let next = (i + 1) % ring.len();
        commands.extend(style.line(ring[i], ring[next]).map(DrawCommand::Line));
    }
}

/// Triangle fan closing `ring` around `center`.
pub(super) fn emit_cap(
    center: Vec3,
    ring: &[Vec3],
    normal: Vec3,
    color: Rgba,
    style: &ShapeStyle,
    commands: &mut Vec<DrawCommand>,
) {
    for i in 0..ring.len() {
        let next = (i + 1) % ring.len();
        commands.push(DrawCommand::Triangle(style.triangle(
            [center, ring[i], ring[next]],
            normal,
            color,
        )));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use glam::Vec3;

    use crate::draw::{DrawCommand, RasterMode, ShapeStyle};
    use crate::primitive::{CapStyle, PrimitiveBuilder};
    use crate::tessellation::TessellationCache;
    use crate::transform::WorldTransform;

    fn builder() -> PrimitiveBuilder {
        PrimitiveBuilder::new(Arc::new(TessellationCache::new()))
    }

    #[test]
    fn test_wireframe_line_count() {
        let commands = builder()
            .cylinder(
                &WorldTransform::IDENTITY,
                1.0,
                2.0,
                24,
                &ShapeStyle::default(),
                CapStyle::None,
            )
            .unwrap();
        // side + bottom rim + top rim
        assert_eq!(commands.len(), 24 * 3);
    }

    #[test]
    fn test_cylinder_does_not_touch_sphere_cache() {
        let builder = builder();
        builder
            .cylinder(
                &WorldTransform::IDENTITY,
                1.0,
                2.0,
                24,
                &ShapeStyle::default(),
                CapStyle::None,
            )
            .unwrap();
        assert!(builder.cache().is_empty());
    }

    #[test]
    fn test_points_within_height_and_radius() {
        let transform = WorldTransform::from_translation(Vec3::new(0.0, 10.0, 0.0));
        let commands = builder()
            .cylinder(
                &transform,
                0.5,
                3.0,
                12,
                &ShapeStyle::default().with_mode(RasterMode::Both),
                CapStyle::None,
            )
            .unwrap();
        for point in commands.iter().flat_map(DrawCommand::points) {
            let local = point - transform.translation;
            assert!(local.y.abs() <= 1.5 + 1e-5);
            let radial = Vec3::new(local.x, 0.0, local.z).length();
            assert_relative_eq!(radial, 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_caps_use_cap_color() {
        let cap_color = [0.9, 0.1, 0.1, 0.5];
        let commands = builder()
            .cylinder(
                &WorldTransform::IDENTITY,
                1.0,
                1.0,
                12,
                &ShapeStyle::default().with_mode(RasterMode::Solid),
                CapStyle::Tinted {
                    color: cap_color,
                    linear: false,
                },
            )
            .unwrap();
        let triangles: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Triangle(_)))
            .collect();
        assert_eq!(triangles.len(), 24);
        assert!(triangles.iter().all(|c| c.color() == cap_color));
        let quads = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Quad(_)))
            .count();
        assert_eq!(quads, 12);
    }

    #[test]
    fn test_caps_ignored_in_wireframe() {
        let commands = builder()
            .cylinder(
                &WorldTransform::IDENTITY,
                1.0,
                1.0,
                12,
                &ShapeStyle::default(),
                CapStyle::Tinted {
                    color: [1.0; 4],
                    linear: true,
                },
            )
            .unwrap();
        assert!(commands.iter().all(DrawCommand::is_line));
    }
}
