//! Generic fallbacks for categories without a dedicated drawer

use lv_core::{RasterMode, WorldTransform};

use super::rotor::draw_rotation_limits;
use crate::canvas::DrawCanvas;
use crate::constants::colors;
use crate::object::OverlayObject;
use crate::registry::Drawer;

/// Limit arc for any object that carries rotation limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitArcFallback;

impl Drawer for LimitArcFallback {
    fn name(&self) -> &str {
        "limit-arc"
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
        if let Some(limits) = object.rotation_limits {
            draw_rotation_limits(transform, canvas, object, &limits, false);
        }
    }
}

/// Bounding sphere for any object with a positive bounding radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsFallback;

impl Drawer for BoundsFallback {
    fn name(&self) -> &str {
        "bounds"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.bounding_radius.is_finite() && object.bounding_radius > 0.0
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        let style = canvas.kit().style(RasterMode::Wireframe, colors::BOUNDS);
        canvas.sphere(transform, object.bounding_radius, &style);
    }
}
