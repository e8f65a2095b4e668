//! Sphere commands from the cached unit sphere

use glam::Vec3;

use super::{PrimitiveBuilder, is_degenerate};
use crate::draw::{DrawCommand, ShapeStyle};
use crate::error::GeometryResult;
use crate::tessellation::quads_of;
use crate::transform::WorldTransform;

const EQUATOR_EPSILON: f32 = 1e-5;

impl PrimitiveBuilder {
    /// Sphere of `radius` centered at the transform's origin.
    ///
    /// Wireframe mode connects only the meridian edge and the lower latitude
    /// edge of every cached quad, so shared edges are not drawn twice. The
    /// equator belongs to the upper half only. Solid mode emits one quad per
    /// cached quad.
    pub fn sphere(
        &self,
        transform: &WorldTransform,
        radius: f32,
        steps: u32,
        style: &ShapeStyle,
    ) -> GeometryResult<Vec<DrawCommand>> {
        if is_degenerate(transform, radius, 0.0) {
            return Ok(Vec::new());
        }
        let mesh = self.cache().unit_sphere(steps)?;

        let mut commands = Vec::with_capacity(mesh.quad_count() * 2);
        for (half, equator) in [(mesh.upper_half(), true), (mesh.lower_half(), false)] {
            emit_sphere_quads(
                half,
                transform,
                radius,
                Vec3::ZERO,
                |v| v,
                equator,
                style,
                &mut commands,
            );
        }
        Ok(commands)
    }
}

/// Emit a run of unit-sphere quads.
///
/// Each unit vertex goes through `orient`, is scaled by `radius`, offset by
/// `offset` in local space and finally transformed to world space. With
/// `equator` unset, latitude edges lying on the unit equator are left out.
#[allow(clippy::too_many_arguments)]
pub(super) fn emit_sphere_quads(
    vertices: &[Vec3],
    transform: &WorldTransform,
    radius: f32,
    offset: Vec3,
    orient: impl Fn(Vec3) -> Vec3,
    equator: bool,
    style: &ShapeStyle,
    commands: &mut Vec<DrawCommand>,
) {
    let center = transform.transform_point(offset);
    for quad in quads_of(vertices) {
        let on_equator = quad[2].z.abs() < EQUATOR_EPSILON && quad[3].z.abs() < EQUATOR_EPSILON;
        let [v0, v1, v2, v3] =
            quad.map(|v| transform.transform_point(orient(v) * radius + offset));

        if style.mode.has_lines() {
            commands.extend(style.line(v1, v2).map(DrawCommand::Line));
            if equator || !on_equator {
                commands.extend(style.line(v2, v3).map(DrawCommand::Line));
            }
        }
        if style.mode.has_faces() {
            let normal = ((v0 + v1 + v2 + v3) * 0.25 - center).normalize_or_zero();
            commands.push(DrawCommand::Quad(style.quad([v0, v1, v2, v3], normal)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use glam::{Mat3, Vec3};

    use crate::draw::{RasterMode, ShapeStyle};
    use crate::primitive::PrimitiveBuilder;
    use crate::tessellation::TessellationCache;
    use crate::transform::WorldTransform;

    #[test]
    fn test_sphere_points_on_radius() {
        let builder = PrimitiveBuilder::new(Arc::new(TessellationCache::new()));
        let transform = WorldTransform::from_translation(Vec3::new(5.0, -2.0, 1.0))
            .with_basis(Mat3::from_rotation_y(0.7));
        let style = ShapeStyle::default().with_mode(RasterMode::Both);

        let commands = builder.sphere(&transform, 2.5, 24, &style).unwrap();
        assert!(!commands.is_empty());
        for command in &commands {
            for point in command.points() {
                assert_relative_eq!(
                    point.distance(transform.translation),
                    2.5,
                    epsilon = 1e-4
                );
            }
        }
    }

    #[test]
    fn test_solid_sphere_emits_one_quad_per_cell() {
        let cache = Arc::new(TessellationCache::new());
        let builder = PrimitiveBuilder::new(Arc::clone(&cache));
        let style = ShapeStyle::default().with_mode(RasterMode::Solid);

        let commands = builder
            .sphere(&WorldTransform::IDENTITY, 1.0, 12, &style)
            .unwrap();
        let mesh = cache.unit_sphere(12).unwrap();
        assert_eq!(commands.len(), mesh.quad_count());
    }

    #[test]
    fn test_wireframe_skips_pole_edges() {
        let builder = PrimitiveBuilder::new(Arc::new(TessellationCache::new()));
        let style = ShapeStyle::default();
        let commands = builder
            .sphere(&WorldTransform::IDENTITY, 1.0, 12, &style)
            .unwrap();
        // 3 rows x 12 columns x 2 hemispheres, two edges each, equator once
        assert_eq!(commands.len(), 3 * 12 * 2 * 2 - 12);
    }

    #[test]
    fn test_equator_drawn_once() {
        let builder = PrimitiveBuilder::new(Arc::new(TessellationCache::new()));
        let style = ShapeStyle::default();
        for steps in [4, 12, 24] {
            let commands = builder
                .sphere(&WorldTransform::IDENTITY, 1.0, steps, &style)
                .unwrap();
            let equator = commands
                .iter()
                .filter(|c| c.points().iter().all(|p| p.z.abs() < 1e-4))
                .count();
            assert_eq!(equator, steps as usize);
        }
    }
}
