//! Per-session caches
//!
//! Keyed by object id and owned by the session, never by a drawer. The
//! session clears them on `end_session` and drops single entries on
//! `forget`.

use std::collections::HashMap;

use glam::Vec3;
use uuid::Uuid;

use crate::frame::ThrottledValue;
use crate::object::{OverlayObject, SceneQuery};

/// A nearby object found by a neighbor scan
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborHit {
    /// Neighbor id
    pub id: Uuid,
    /// Neighbor position at scan time
    pub position: Vec3,
    /// Distance from the scan center
    pub distance: f32,
}

/// Caches that persist across frames for one overlay session
#[derive(Debug, Default)]
pub struct SessionCaches {
    neighbors: HashMap<Uuid, ThrottledValue<Vec<NeighborHit>>>,
}

impl SessionCaches {
    /// Create empty caches
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbors of `object` within `radius`, rescanned every `interval` ticks.
    pub fn neighbors(
        &mut self,
        object: &OverlayObject,
        radius: f32,
        interval: u64,
        tick: u64,
        scene: &dyn SceneQuery,
    ) -> &[NeighborHit] {
        let center = object.position();
        let id = object.id;
        self.neighbors
            .entry(id)
            .or_insert_with(|| ThrottledValue::new(interval))
            .refresh_if_due(tick, || {
                tracing::trace!("Rescanning neighbors of {} at tick {}", id, tick);
                scan(scene, id, center, radius)
            })
    }

    /// Tick of the last neighbor scan for `id`.
    pub fn neighbors_computed_at(&self, id: Uuid) -> Option<u64> {
        self.neighbors.get(&id).and_then(|value| value.computed_at())
    }

    /// Drop caches for one object.
    pub fn forget(&mut self, id: Uuid) -> bool {
        self.neighbors.remove(&id).is_some()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.neighbors.clear();
    }

    /// Number of cached objects.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

fn scan(scene: &dyn SceneQuery, id: Uuid, center: Vec3, radius: f32) -> Vec<NeighborHit> {
    let mut hits: Vec<_> = scene
        .objects_within(center, radius)
        .into_iter()
        .filter(|other| other.id != id)
        .map(|other| NeighborHit {
            id: other.id,
            position: other.position(),
            distance: other.position().distance(center),
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
