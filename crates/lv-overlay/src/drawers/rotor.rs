//! Motor, rotor and hinge angle limits

use lv_core::WorldTransform;

use super::{arc_radius, limit_text, plane_basis};
use crate::canvas::{ArcOutline, DrawCanvas};
use crate::constants::colors;
use crate::object::{AngleLimits, OverlayObject};
use crate::registry::Drawer;

/// Angle-limit wedge with a current-angle indicator and a limit label.
///
/// The wedge lies in the plane normal to the transform's up axis. Angle zero
/// points along forward and positive angles turn toward right.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotorLimitDrawer;

impl Drawer for RotorLimitDrawer {
    fn name(&self) -> &str {
        "rotor-limits"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.rotation_limits.is_some()
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        let Some(limits) = object.rotation_limits else {
            return;
        };
        draw_rotation_limits(transform, canvas, object, &limits, true);
    }
}

/// Draw the limit arc for `limits`, optionally with the current-angle line.
pub(crate) fn draw_rotation_limits(
    transform: &WorldTransform,
    canvas: &mut DrawCanvas<'_>,
    object: &OverlayObject,
    limits: &AngleLimits,
    with_indicator: bool,
) -> Option<ArcOutline> {
    let center = transform.translation;
    let axis = plane_basis(transform.forward, transform.right, transform.up);
    let radius = arc_radius(limits.radius, object) * transform.max_scale();
    let spec = canvas
        .kit()
        .arc_spec(center, axis, radius, limits.min_deg, limits.max_deg);
    let outline = canvas.arc(&spec)?;

    if with_indicator && limits.current_deg.is_finite() {
        canvas.line(center, spec.rim_point(limits.current_deg), colors::CURRENT_ANGLE);
    }

    let text = limit_text(object.display_name(), outline.case, limits.min_deg, limits.max_deg);
    canvas.label(outline.last_rim, outline.last_rim - center, colors::LABEL, text);
    Some(outline)
}
