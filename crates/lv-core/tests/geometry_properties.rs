//! Property tests for tessellation, primitive and arc geometry.

use std::sync::Arc;

use glam::{Mat3, Vec3};
use lv_core::{
    ArcCase, ArcWedgeSolver, ArcWedgeSpec, DrawCommand, PrimitiveBuilder, RasterMode, ShapeStyle,
    TessellationCache, WorldTransform,
};
use proptest::prelude::*;

/// Step counts that divide 360 evenly.
fn valid_steps() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![1u32, 2, 3, 4, 6, 8, 10, 12, 15, 18, 20, 24, 30, 36, 40, 45, 60, 72])
}

fn finite_f32(range: std::ops::Range<f32>) -> impl Strategy<Value = f32> {
    range.prop_filter("finite", |v| v.is_finite())
}

proptest! {
    #[test]
    fn unit_sphere_vertex_count_divisible_by_four(steps in valid_steps()) {
        let cache = TessellationCache::new();
        let first = cache.unit_sphere(steps).unwrap();
        prop_assert_eq!(first.vertices().len() % 4, 0);

        let second = cache.unit_sphere(steps).unwrap();
        prop_assert!(Arc::ptr_eq(&first, &second));
        prop_assert_eq!(first.vertices(), second.vertices());
    }

    #[test]
    fn sphere_points_lie_on_radius(
        steps in valid_steps(),
        radius in finite_f32(0.01..50.0),
        x in finite_f32(-100.0..100.0),
        y in finite_f32(-100.0..100.0),
        z in finite_f32(-100.0..100.0),
        yaw in finite_f32(-3.0..3.0),
    ) {
        let builder = PrimitiveBuilder::new(Arc::new(TessellationCache::new()));
        let transform = WorldTransform::from_translation(Vec3::new(x, y, z))
            .with_basis(Mat3::from_rotation_y(yaw));
        let style = ShapeStyle::default().with_mode(RasterMode::Both);

        let commands = builder.sphere(&transform, radius, steps, &style).unwrap();
        for point in commands.iter().flat_map(DrawCommand::points) {
            let distance = point.distance(transform.translation);
            prop_assert!((distance - radius).abs() <= radius * 1e-4 + 1e-4);
        }
    }

    #[test]
    fn arc_solve_is_total(
        min in finite_f32(-720.0..720.0),
        max in finite_f32(-720.0..720.0),
    ) {
        let solver = ArcWedgeSolver::default();
        let spec = ArcWedgeSpec::new(Vec3::ZERO, Mat3::IDENTITY, 1.0, min, max);
        let solution = solver.solve(&spec).unwrap();
        prop_assert_eq!(solution.case, ArcCase::classify(min, max));
        prop_assert!(!solution.commands.is_empty());
    }
}
