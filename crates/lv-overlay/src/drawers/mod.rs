//! Built-in drawers
//!
//! Every drawer is stateless; one instance serves all objects of its
//! categories. [`register_builtin`] installs them with their category keys
//! and the two fallbacks in order.

mod fallback;
mod rotor;
mod suspension;
mod thruster;
mod turret;
mod warhead;

pub use fallback::{BoundsFallback, LimitArcFallback};
pub use rotor::RotorLimitDrawer;
pub use suspension::SuspensionDrawer;
pub use thruster::ThrusterDrawer;
pub use turret::TurretDrawer;
pub use warhead::WarheadDrawer;

use std::sync::Arc;

use glam::{Mat3, Vec3};
use lv_core::{ArcCase, HookAnchor};

use crate::constants::{FALLBACK_ARC_RADIUS, categories};
use crate::object::OverlayObject;
use crate::registry::OverlayRegistry;

/// Install the built-in drawers and fallbacks.
pub fn register_builtin(registry: &mut OverlayRegistry) {
    registry.register_many(
        [
            categories::MOTOR,
            categories::ROTOR,
            categories::ADVANCED_ROTOR,
            categories::HINGE,
        ],
        Arc::new(RotorLimitDrawer),
    );
    registry.register_many(
        [
            categories::TURRET,
            categories::INTERIOR_TURRET,
            categories::SEARCHLIGHT,
        ],
        Arc::new(TurretDrawer),
    );
    registry.register(categories::SUSPENSION, Arc::new(SuspensionDrawer));
    registry.register(categories::WARHEAD, Arc::new(WarheadDrawer));
    registry.register_many(
        [categories::THRUSTER, categories::LARGE_THRUSTER],
        Arc::new(ThrusterDrawer),
    );
    registry.register_fallback(Arc::new(LimitArcFallback));
    registry.register_fallback(Arc::new(BoundsFallback));
    tracing::debug!(
        "Registered {} categories and {} fallbacks",
        registry.len(),
        registry.fallback_count()
    );
}

/// Arc basis: angle zero along `zero`, positive toward `ninety`, turning
/// about `axis`.
pub(crate) fn plane_basis(zero: Vec3, ninety: Vec3, axis: Vec3) -> Mat3 {
    Mat3::from_cols(
        zero.normalize_or_zero(),
        ninety.normalize_or_zero(),
        axis.normalize_or_zero(),
    )
}

/// `preferred` when positive, else the object's bounds, else a constant.
pub(crate) fn arc_radius(preferred: f32, object: &OverlayObject) -> f32 {
    if preferred.is_finite() && preferred > 0.0 {
        preferred
    } else if object.bounding_radius.is_finite() && object.bounding_radius > 0.0 {
        object.bounding_radius
    } else {
        FALLBACK_ARC_RADIUS
    }
}

/// Label text describing a solved limit arc.
pub(crate) fn limit_text(prefix: &str, case: ArcCase, min_deg: f32, max_deg: f32) -> String {
    match case {
        ArcCase::Unrestricted => format!("{prefix}: unlimited"),
        ArcCase::Rollover => format!("{prefix}: {min_deg:.0}° to {max_deg:.0}° (rollover)"),
        ArcCase::Hook(HookAnchor::Min) => format!("{prefix}: from {min_deg:.0}°"),
        ArcCase::Hook(HookAnchor::Max) => format!("{prefix}: up to {max_deg:.0}°"),
        ArcCase::Inverted => format!("{prefix}: inverted ({min_deg:.0}° > {max_deg:.0}°)"),
        ArcCase::Bounded => format!("{prefix}: {min_deg:.0}° to {max_deg:.0}°"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::AngleLimits;

    #[test]
    fn test_register_builtin() {
        let mut registry = OverlayRegistry::new();
        register_builtin(&mut registry);
        assert_eq!(registry.len(), 11);
        assert_eq!(registry.fallback_count(), 2);

        let object = OverlayObject::new(categories::LARGE_THRUSTER, "t");
        assert_eq!(registry.resolve(&object.category, &object).unwrap().name(), "thruster");
    }

    #[test]
    fn test_fallback_order() {
        let mut registry = OverlayRegistry::new();
        register_builtin(&mut registry);

        let both = OverlayObject::new("Piston", "p")
            .with_bounding_radius(1.0)
            .with_rotation_limits(AngleLimits::new(-10.0, 10.0));
        let bounds = OverlayObject::new("Piston", "p").with_bounding_radius(1.0);
        let nothing = OverlayObject::new("Piston", "p");

        assert_eq!(registry.resolve(&both.category, &both).unwrap().name(), "limit-arc");
        assert_eq!(registry.resolve(&bounds.category, &bounds).unwrap().name(), "bounds");
        assert!(registry.resolve(&nothing.category, &nothing).is_none());
    }

    #[test]
    fn test_limit_text() {
        assert_eq!(limit_text("Motor", ArcCase::Bounded, -45.0, 45.0), "Motor: -45° to 45°");
        assert_eq!(limit_text("Motor", ArcCase::Unrestricted, -400.0, 400.0), "Motor: unlimited");
    }

    #[test]
    fn test_arc_radius_preference() {
        let object = OverlayObject::new("Motor", "").with_bounding_radius(2.5);
        assert_eq!(arc_radius(1.5, &object), 1.5);
        assert_eq!(arc_radius(0.0, &object), 2.5);
        assert_eq!(arc_radius(0.0, &OverlayObject::new("Motor", "")), FALLBACK_ARC_RADIUS);
    }
}
