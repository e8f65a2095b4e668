//! Category-keyed drawer dispatch
//!
//! Exact registrations are a hash lookup. When a category has no exact match,
//! fallbacks are asked in registration order and the first one whose
//! [`Drawer::can_handle`] accepts the object wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lv_core::WorldTransform;
use serde::{Deserialize, Serialize};

use crate::canvas::DrawCanvas;
use crate::object::OverlayObject;

/// Opaque dispatch tag supplied by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Create a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overlay strategy for one or more categories.
///
/// One instance serves every object of its categories within a frame, so a
/// drawer keeps no per-object state; everything it needs arrives through
/// `draw`'s arguments.
pub trait Drawer: Send + Sync {
    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Whether this drawer accepts `object` when tried as a fallback.
    fn can_handle(&self, _object: &OverlayObject) -> bool {
        true
    }

    /// Emit the overlay for `object` at `transform`.
    fn draw(&self, transform: &WorldTransform, canvas: &mut DrawCanvas<'_>, object: &OverlayObject);
}

/// Category → drawer table with an ordered fallback chain
#[derive(Default)]
pub struct OverlayRegistry {
    exact: HashMap<CategoryKey, Arc<dyn Drawer>>,
    fallbacks: Vec<Arc<dyn Drawer>>,
}

impl OverlayRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `drawer` for `key`, replacing any previous registration.
    pub fn register(&mut self, key: impl Into<CategoryKey>, drawer: Arc<dyn Drawer>) {
        let key = key.into();
        if let Some(previous) = self.exact.insert(key.clone(), drawer) {
            tracing::debug!("Replaced drawer '{}' for category '{}'", previous.name(), key);
        }
    }

    /// Register one drawer instance under several keys.
    pub fn register_many<K: Into<CategoryKey>>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        drawer: Arc<dyn Drawer>,
    ) {
        for key in keys {
            self.register(key, Arc::clone(&drawer));
        }
    }

    /// Append a fallback, tried after every earlier fallback.
    pub fn register_fallback(&mut self, drawer: Arc<dyn Drawer>) {
        self.fallbacks.push(drawer);
    }

    /// Drawer for `object`, or `None` when nothing accepts it.
    pub fn resolve(&self, key: &CategoryKey, object: &OverlayObject) -> Option<&Arc<dyn Drawer>> {
        if let Some(drawer) = self.exact.get(key) {
            return Some(drawer);
        }
        self.fallbacks.iter().find(|drawer| drawer.can_handle(object))
    }

    /// Drop every fallback.
    pub fn clear_fallbacks(&mut self) {
        self.fallbacks.clear();
    }

    /// Number of exact registrations.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.fallbacks.is_empty()
    }

    /// Number of fallbacks.
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }

    /// Registered categories, sorted.
    pub fn categories(&self) -> Vec<&CategoryKey> {
        let mut keys: Vec<_> = self.exact.keys().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for OverlayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fallbacks: Vec<_> = self.fallbacks.iter().map(|d| d.name()).collect();
        f.debug_struct("OverlayRegistry")
            .field("categories", &self.categories())
            .field("fallbacks", &fallbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: &'static str,
        accepts: bool,
    }

    impl Drawer for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn can_handle(&self, _object: &OverlayObject) -> bool {
            self.accepts
        }

        fn draw(&self, _: &WorldTransform, _: &mut DrawCanvas<'_>, _: &OverlayObject) {}
    }

    fn named(name: &'static str, accepts: bool) -> Arc<dyn Drawer> {
        Arc::new(Named { name, accepts })
    }

    #[test]
    fn test_exact_match_wins_over_fallback() {
        let mut registry = OverlayRegistry::new();
        registry.register("Motor", named("motor", true));
        registry.register_fallback(named("generic", true));

        let object = OverlayObject::new("Motor", "m");
        let drawer = registry.resolve(&object.category, &object).unwrap();
        assert_eq!(drawer.name(), "motor");
    }

    #[test]
    fn test_fallbacks_tried_in_order() {
        let mut registry = OverlayRegistry::new();
        registry.register_fallback(named("declines", false));
        registry.register_fallback(named("first", true));
        registry.register_fallback(named("second", true));

        let object = OverlayObject::new("Unknown", "x");
        let drawer = registry.resolve(&object.category, &object).unwrap();
        assert_eq!(drawer.name(), "first");

        registry.clear_fallbacks();
        assert!(registry.resolve(&object.category, &object).is_none());
    }

    #[test]
    fn test_many_keys_share_one_instance() {
        let mut registry = OverlayRegistry::new();
        let drawer = named("rotor", true);
        registry.register_many(["Motor", "Rotor", "Hinge"], Arc::clone(&drawer));
        assert_eq!(registry.len(), 3);

        let a = OverlayObject::new("Motor", "");
        let b = OverlayObject::new("Hinge", "");
        let da = registry.resolve(&a.category, &a).unwrap();
        let db = registry.resolve(&b.category, &b).unwrap();
        assert!(Arc::ptr_eq(da, db));
        assert_eq!(Arc::strong_count(&drawer), 4);
    }

    #[test]
    fn test_category_key_serde_is_transparent() {
        let key: CategoryKey = ron::from_str("\"Thruster/Large\"").unwrap();
        assert_eq!(key, CategoryKey::from("Thruster/Large"));
        assert_eq!(key.to_string(), "Thruster/Large");
    }
}
