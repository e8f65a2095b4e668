//! Per-frame draw state
//!
//! A [`FrameDrawContext`] is built by the orchestrator once per render frame
//! and handed to every drawer by reference. Nothing in it survives the frame.
//! Values that must look continuous across frames live in a
//! [`ThrottledValue`] owned by the session caches instead.

use glam::Vec3;
use lv_core::WorldTransform;
use serde::{Deserialize, Serialize};

/// Read-only camera description for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Camera world transform
    pub transform: WorldTransform,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            transform: WorldTransform::IDENTITY,
            fov_degrees: 60.0,
            near: 0.05,
            far: 1000.0,
        }
    }
}

impl CameraState {
    /// Camera at `position` with default projection.
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: WorldTransform::from_translation(position),
            ..Self::default()
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Camera with a different field of view.
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }
}

/// State shared by every drawer during one frame
#[derive(Debug, Clone)]
pub struct FrameDrawContext {
    camera: CameraState,
    camera_scale_factor: f32,
    label_budget_remaining: u32,
    tick: u64,
}

impl FrameDrawContext {
    /// Build the context for frame `tick`.
    pub fn new(camera: CameraState, tick: u64, label_budget: u32) -> Self {
        let half_fov = (camera.fov_degrees.to_radians() * 0.5).clamp(0.0, 1.55);
        let camera_scale_factor = half_fov.tan();
        Self {
            camera,
            camera_scale_factor,
            label_budget_remaining: label_budget,
            tick,
        }
    }

    /// Camera for this frame.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// `tan(fov / 2)`, used for screen-constant sizing.
    pub fn camera_scale_factor(&self) -> f32 {
        self.camera_scale_factor
    }

    /// Labels that can still be emitted this frame.
    pub fn label_budget_remaining(&self) -> u32 {
        self.label_budget_remaining
    }

    /// Take one label from the budget. Returns false once exhausted.
    pub fn try_consume_label(&mut self) -> bool {
        if self.label_budget_remaining == 0 {
            return false;
        }
        self.label_budget_remaining -= 1;
        true
    }

    /// Monotonic frame counter.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// World size that appears as `size` on screen at `point`.
    pub fn screen_constant(&self, point: Vec3, size: f32) -> f32 {
        let distance = point.distance(self.camera.position()).max(self.camera.near);
        size * distance * self.camera_scale_factor
    }
}

/// A value recomputed at most once every `interval` ticks.
///
/// The value remembers the tick it was computed at; the caller passes the
/// current tick and the value refreshes only when it has gone stale. Reads in
/// between return the stale value.
#[derive(Debug, Clone)]
pub struct ThrottledValue<T> {
    value: Option<T>,
    computed_at: Option<u64>,
    interval: u64,
}

impl<T> ThrottledValue<T> {
    /// Empty value refreshed every `interval` ticks (minimum 1).
    pub fn new(interval: u64) -> Self {
        Self {
            value: None,
            computed_at: None,
            interval: interval.max(1),
        }
    }

    /// Returns true if a read at `tick` would recompute.
    pub fn is_due(&self, tick: u64) -> bool {
        match self.computed_at {
            None => true,
            // Counter went backwards, e.g. after a host restart
            Some(at) if tick < at => true,
            Some(at) => tick - at >= self.interval,
        }
    }

    /// Current value, recomputed with `compute` first when due.
    pub fn refresh_if_due(&mut self, tick: u64, compute: impl FnOnce() -> T) -> &T {
        if self.is_due(tick) {
            self.value = None;
            self.computed_at = Some(tick);
        }
        self.value.get_or_insert_with(compute)
    }

    /// Last computed value without refreshing.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Tick of the last computation.
    pub fn computed_at(&self) -> Option<u64> {
        self.computed_at
    }

    /// Refresh interval in ticks.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Force a recompute on the next read.
    pub fn invalidate(&mut self) {
        self.value = None;
        self.computed_at = None;
    }
}
