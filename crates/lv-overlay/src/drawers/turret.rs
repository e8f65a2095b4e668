//! Turret and searchlight aim limits

use lv_core::{RasterMode, WorldTransform};

use super::{arc_radius, limit_text, plane_basis};
use crate::canvas::DrawCanvas;
use crate::constants::colors;
use crate::object::OverlayObject;
use crate::registry::Drawer;

/// Yaw and pitch wedges plus the engagement range.
///
/// Yaw turns about up starting at forward, pitch turns about right starting
/// at forward and rising toward up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurretDrawer;

impl Drawer for TurretDrawer {
    fn name(&self) -> &str {
        "turret"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.aim_limits.is_some()
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        let Some(aim) = object.aim_limits else {
            return;
        };
        let center = transform.translation;
        let radius = arc_radius(aim.arc_radius, object) * transform.max_scale();

        let yaw_axis = plane_basis(transform.forward, transform.right, transform.up);
        let yaw = canvas
            .kit()
            .arc_spec(center, yaw_axis, radius, aim.yaw_min_deg, aim.yaw_max_deg);
        if let Some(outline) = canvas.arc(&yaw) {
            let text = limit_text("yaw", outline.case, aim.yaw_min_deg, aim.yaw_max_deg);
            canvas.label(outline.last_rim, outline.last_rim - center, colors::LABEL, text);
        }

        let pitch_axis = plane_basis(transform.forward, transform.up, transform.right);
        let pitch = canvas
            .kit()
            .arc_spec(center, pitch_axis, radius, aim.pitch_min_deg, aim.pitch_max_deg);
        if let Some(outline) = canvas.arc(&pitch) {
            let text = limit_text("pitch", outline.case, aim.pitch_min_deg, aim.pitch_max_deg);
            canvas.label(outline.last_rim, outline.last_rim - center, colors::LABEL, text);
        }

        if aim.range > 0.0 {
            let style = canvas.kit().style(RasterMode::Wireframe, colors::RANGE);
            canvas.sphere(transform, aim.range, &style);
        }
    }
}
