//! Wheel suspension travel

use glam::Vec3;
use lv_core::{RasterMode, WorldTransform};

use crate::canvas::DrawCanvas;
use crate::constants::colors;
use crate::object::OverlayObject;
use crate::registry::Drawer;

/// Travel cylinder between the suspension limits and the wheel outline.
///
/// Travel is measured along up in the object's local units. The wheel spins
/// about right, so its ring lies in the forward/up plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspensionDrawer;

impl Drawer for SuspensionDrawer {
    fn name(&self) -> &str {
        "suspension"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.travel.is_some()
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        let Some(travel) = object.travel else {
            return;
        };
        let style = canvas.kit().style(RasterMode::Wireframe, colors::TRAVEL);

        let mid = transform.transform_point(Vec3::Y * (travel.min + travel.max) * 0.5);
        let span = travel.max - travel.min;
        canvas.cylinder(&transform.with_translation(mid), travel.wheel_radius, span, &style);

        let scale = transform.max_scale();
        canvas.ring(
            transform.translation,
            transform.forward.normalize_or_zero(),
            transform.up.normalize_or_zero(),
            travel.wheel_radius * scale,
            colors::TRAVEL,
        );

        let top = transform.transform_point(Vec3::Y * travel.max);
        canvas.label(
            top,
            transform.up,
            colors::LABEL,
            format!("travel {:.2} to {:.2}", travel.min, travel.max),
        );
    }
}
