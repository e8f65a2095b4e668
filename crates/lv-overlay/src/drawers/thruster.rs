//! Thruster damage and flame volumes

use glam::{Mat3, Vec3};
use lv_core::{RasterMode, WorldTransform};

use crate::canvas::DrawCanvas;
use crate::constants::colors;
use crate::object::OverlayObject;
use crate::registry::Drawer;

/// Damage capsule and flame cone along the thruster's forward axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrusterDrawer;

impl Drawer for ThrusterDrawer {
    fn name(&self) -> &str {
        "thruster"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.plume.is_some()
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        let Some(plume) = object.plume else {
            return;
        };

        // Capsule starts at the nozzle and runs along forward.
        let along = Mat3::from_cols(transform.right, transform.forward, -transform.up);
        let capsule_center = Vec3::Z * (plume.damage_length * 0.5 + plume.damage_radius);
        let capsule = transform
            .with_basis(along)
            .with_translation(transform.transform_point(capsule_center));
        let style = canvas.kit().style(RasterMode::Wireframe, colors::DAMAGE);
        canvas.capsule(&capsule, plume.damage_radius, plume.damage_length, &style);

        // Flame apex at the tip, base at the nozzle.
        let against = Mat3::from_cols(transform.right, -transform.forward, transform.up);
        let flame = transform
            .with_basis(against)
            .with_translation(transform.transform_point(Vec3::Z * plume.flame_length));
        let style = canvas.kit().style(RasterMode::Wireframe, colors::FLAME);
        canvas.cone(&flame, plume.flame_radius, plume.flame_length, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawers::test_support::draw_once;
    use crate::object::PlumeShape;

    fn thruster() -> OverlayObject {
        OverlayObject::new("Thruster", "t").with_plume(PlumeShape {
            damage_radius: 0.5,
            damage_length: 2.0,
            flame_radius: 0.3,
            flame_length: 4.0,
        })
    }

    #[test]
    fn test_plume_extends_along_forward() {
        let drawn = draw_once(&ThrusterDrawer, &thruster(), &[], 0);
        assert!(drawn.report.submitted > 0);

        let zs: Vec<f32> = drawn.commands.iter().flat_map(|c| c.points()).map(|p| p.z).collect();
        let min = zs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = zs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < 1e-4);
        assert!((max - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_flame_apex_at_tip() {
        let mut object = thruster();
        object.plume = Some(PlumeShape {
            damage_radius: 0.0,
            damage_length: 0.0,
            flame_radius: 0.3,
            flame_length: 4.0,
        });
        let drawn = draw_once(&ThrusterDrawer, &object, &[], 0);
        let apex = Vec3::new(0.0, 0.0, 4.0);
        let to_apex = drawn
            .commands
            .iter()
            .filter(|c| c.points().iter().any(|p| p.distance(apex) < 1e-4))
            .count();
        assert_eq!(to_apex, 24);
    }
}
