//! Cone commands

use glam::Vec3;

use super::cylinder::{emit_cap, emit_rim};
use super::{CapStyle, PrimitiveBuilder, is_degenerate, world_normal, world_ring};
use crate::draw::{DrawCommand, ShapeStyle};
use crate::error::GeometryResult;
use crate::tessellation::TessellationKey;
use crate::transform::WorldTransform;

impl PrimitiveBuilder {
    /// Cone with its apex at the transform's origin and its base circle
    /// `height` along up.
    ///
    /// Wireframe mode emits the base rim and one line from every rim point to
    /// the apex. Solid mode emits a triangle fan around the apex and, when
    /// `base` asks for it, a filled base.
    pub fn cone(
        &self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        steps: u32,
        style: &ShapeStyle,
        base: CapStyle,
    ) -> GeometryResult<Vec<DrawCommand>> {
        if is_degenerate(transform, radius, height) {
            return Ok(Vec::new());
        }
        let key = TessellationKey::new(steps)?;

        let apex = transform.translation;
        let rim = world_ring(transform, radius, height, key.steps());
        let base_center = transform.transform_point(Vec3::Y * height);

        let mut commands = Vec::with_capacity(rim.len() * 3);
        if style.mode.has_lines() {
            emit_rim(&rim, style, &mut commands);
            for point in &rim {
                commands.extend(style.line(*point, apex).map(DrawCommand::Line));
            }
        }
        if style.mode.has_faces() {
            for i in 0..rim.len() {
                let next = (i + 1) % rim.len();
                let normal = (rim[i] - apex)
                    .cross(rim[next] - apex)
                    .normalize_or_zero();
                commands.push(DrawCommand::Triangle(style.triangle(
                    [apex, rim[i], rim[next]],
                    normal,
                    style.face_color,
                )));
            }
            if let Some(color) = base.color() {
                let up = world_normal(transform, Vec3::Y);
                emit_cap(base_center, &rim, up, color, style, &mut commands);
            }
        }
        Ok(commands)
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
    fn test_side_lines_meet_at_apex() {
        let transform = WorldTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let commands = builder()
            .cone(&transform, 1.0, 4.0, 12, &ShapeStyle::default(), CapStyle::None)
            .unwrap();
        assert_eq!(commands.len(), 24);

        let to_apex = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line(line) => Some(line.end()),
                _ => None,
            })
            .filter(|end| end.distance(transform.translation) < 1e-5)
            .count();
        assert_eq!(to_apex, 12);
    }

    #[test]
    fn test_base_rim_at_height() {
        let commands = builder()
            .cone(
                &WorldTransform::IDENTITY,
                2.0,
                3.0,
                24,
                &ShapeStyle::default(),
                CapStyle::None,
            )
            .unwrap();
        let max_y = commands
            .iter()
            .flat_map(DrawCommand::points)
            .map(|p| p.y)
            .fold(f32::MIN, f32::max);
        assert_relative_eq!(max_y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_solid_fan_with_base() {
        let commands = builder()
            .cone(
                &WorldTransform::IDENTITY,
                1.0,
                1.0,
                12,
                &ShapeStyle::default().with_mode(RasterMode::Solid),
                CapStyle::Tinted {
                    color: [0.0, 0.0, 1.0, 1.0],
                    linear: false,
                },
            )
            .unwrap();
        assert_eq!(commands.len(), 24);
        assert!(commands.iter().all(|c| matches!(c, DrawCommand::Triangle(_))));
    }

    #[test]
    fn test_side_normals_point_outward() {
        let commands = builder()
            .cone(
                &WorldTransform::IDENTITY,
                1.0,
                2.0,
                12,
                &ShapeStyle::default().with_mode(RasterMode::Solid),
                CapStyle::None,
            )
            .unwrap();
        assert_eq!(commands.len(), 12);
        for command in &commands {
            let DrawCommand::Triangle(triangle) = command else {
                panic!("expected triangle, got {command:?}");
            };
            let [a, b, c] = triangle.points;
            let centroid = (a + b + c) / 3.0;
            let radial = Vec3::new(centroid.x, 0.0, centroid.z);
            assert!(triangle.normal.dot(radial) > 0.0);

            let winding = (b - a).cross(c - a).normalize();
            assert_relative_eq!(triangle.normal.dot(winding), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_flat_cone_allowed() {
        let commands = builder()
            .cone(
                &WorldTransform::IDENTITY,
                1.0,
                0.0,
                12,
                &ShapeStyle::default(),
                CapStyle::None,
            )
            .unwrap();
        assert!(!commands.is_empty());
    }
}
