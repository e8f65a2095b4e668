//! Warhead blast radius

use glam::Vec3;
use lv_core::{RasterMode, WorldTransform};

use crate::canvas::DrawCanvas;
use crate::constants::colors;
use crate::object::OverlayObject;
use crate::registry::Drawer;

/// Blast sphere plus markers on every object inside it.
///
/// The neighbor scan is throttled through the session caches, so markers may
/// lag behind moving objects by up to the rescan interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarheadDrawer;

impl Drawer for WarheadDrawer {
    fn name(&self) -> &str {
        "warhead"
    }

    fn can_handle(&self, object: &OverlayObject) -> bool {
        object.blast_radius > 0.0
    }

    fn draw(
        &self,
        transform: &WorldTransform,
        canvas: &mut DrawCanvas<'_>,
        object: &OverlayObject,
    ) {
        if !object.blast_radius.is_finite() || object.blast_radius <= 0.0 {
            return;
        }
        let style = canvas.kit().style(RasterMode::Wireframe, colors::BLAST);
        canvas.sphere(transform, object.blast_radius, &style);

        let world_radius = object.blast_radius * transform.max_scale();
        let hits = canvas.neighbors(object, world_radius);
        for hit in &hits {
            canvas.marker(hit.position, colors::NEIGHBOR);
        }

        let up = transform.up.normalize_or(Vec3::Y);
        canvas.label(
            transform.translation + up * world_radius,
            up,
            colors::LABEL,
            format!("{}: {} in blast radius", object.display_name(), hits.len()),
        );
    }
}
