//! Overlay session
//!
//! The session is the orchestrator-facing entry point. It owns the registry,
//! the geometry kit and the per-session caches, and it draws every object in
//! its own fault boundary: an object that resolves to no drawer, or whose
//! drawer produces nothing, never affects the other objects of the frame.

use std::collections::BTreeMap;
use std::sync::Arc;

use lv_core::TessellationCache;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::SessionCaches;
use crate::canvas::{DrawCanvas, DrawReport, GeometryKit};
use crate::config::{ConfigError, OverlayConfig};
use crate::drawers::register_builtin;
use crate::frame::{CameraState, FrameDrawContext};
use crate::object::{OverlayObject, SceneQuery};
use crate::registry::{CategoryKey, OverlayRegistry};
use crate::sink::{LabelSink, RenderSink};

/// Per-category totals for one or more frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    /// Objects seen
    pub objects: usize,
    /// Objects that resolved to a drawer
    pub drawn: usize,
    /// Commands accepted by the sink
    pub commands: usize,
    /// Labels emitted
    pub labels: usize,
}

/// Totals for one or more frames
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Frames covered
    pub frames: usize,
    /// Objects that resolved to a drawer
    pub drawn: usize,
    /// Objects without a drawer
    pub skipped: usize,
    /// Commands accepted by the sink
    pub commands: usize,
    /// Commands rejected by the sink
    pub rejected: usize,
    /// Shapes skipped for invalid parameters
    pub skipped_shapes: usize,
    /// Labels emitted
    pub labels: usize,
    /// Breakdown by category
    pub categories: BTreeMap<CategoryKey, CategoryReport>,
}

impl FrameReport {
    fn record(&mut self, category: &CategoryKey, report: Option<DrawReport>) {
        let entry = self.categories.entry(category.clone()).or_default();
        entry.objects += 1;
        let Some(report) = report else {
            self.skipped += 1;
            return;
        };
        self.drawn += 1;
        self.commands += report.submitted;
        self.rejected += report.rejected;
        self.skipped_shapes += report.skipped_shapes;
        self.labels += report.labels;
        entry.drawn += 1;
        entry.commands += report.submitted;
        entry.labels += report.labels;
    }

    /// Add another report's totals to this one.
    pub fn merge(&mut self, other: &FrameReport) {
        self.frames += other.frames;
        self.drawn += other.drawn;
        self.skipped += other.skipped;
        self.commands += other.commands;
        self.rejected += other.rejected;
        self.skipped_shapes += other.skipped_shapes;
        self.labels += other.labels;
        for (category, report) in &other.categories {
            let entry = self.categories.entry(category.clone()).or_default();
            entry.objects += report.objects;
            entry.drawn += report.drawn;
            entry.commands += report.commands;
            entry.labels += report.labels;
        }
    }
}

/// Overlay state for one display session
#[derive(Debug)]
pub struct OverlaySession {
    config: OverlayConfig,
    kit: GeometryKit,
    registry: OverlayRegistry,
    caches: SessionCaches,
    frames_drawn: u64,
}

impl OverlaySession {
    /// Start a session with the built-in drawers.
    ///
    /// With `tessellation.eager` set, every configured preset is generated
    /// into `cache` up front.
    pub fn new(config: OverlayConfig, cache: Arc<TessellationCache>) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.tessellation.eager {
            cache
                .warm(&config.tessellation.all_steps())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        let mut registry = OverlayRegistry::new();
        register_builtin(&mut registry);
        tracing::info!(
            "Overlay session started ({} categories, {} cached meshes)",
            registry.len(),
            cache.len()
        );
        Ok(Self {
            kit: GeometryKit::new(&config, cache),
            config,
            registry,
            caches: SessionCaches::new(),
            frames_drawn: 0,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Geometry services.
    pub fn kit(&self) -> &GeometryKit {
        &self.kit
    }

    /// Drawer registry.
    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    /// Mutable drawer registry, for host-specific drawers.
    pub fn registry_mut(&mut self) -> &mut OverlayRegistry {
        &mut self.registry
    }

    /// Per-session caches.
    pub fn caches(&self) -> &SessionCaches {
        &self.caches
    }

    /// Frames drawn since the session started or was last reset.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Frame context for `tick` with the configured label budget.
    pub fn begin_frame(&self, camera: CameraState, tick: u64) -> FrameDrawContext {
        FrameDrawContext::new(camera, tick, self.config.labels.frame_budget())
    }

    /// Draw one object. Returns `None` when no drawer accepts it.
    pub fn draw_object(
        &mut self,
        frame: &mut FrameDrawContext,
        object: &OverlayObject,
        scene: &dyn SceneQuery,
        sink: &mut dyn RenderSink,
        labels: &mut dyn LabelSink,
    ) -> Option<DrawReport> {
        let Some(drawer) = self.registry.resolve(&object.category, object) else {
            tracing::debug!("No drawer for {} ({})", object.id, object.category);
            return None;
        };
        let mut canvas = DrawCanvas::new(
            &self.kit,
            frame,
            sink,
            labels,
            &mut self.caches,
            scene,
            object.id,
        );
        drawer.draw(&object.transform, &mut canvas, object);
        Some(canvas.finish())
    }

    /// Draw every object of a frame; `objects` doubles as the scene for
    /// neighbor queries.
    pub fn draw_frame(
        &mut self,
        frame: &mut FrameDrawContext,
        objects: &[OverlayObject],
        sink: &mut dyn RenderSink,
        labels: &mut dyn LabelSink,
    ) -> FrameReport {
        self.draw_frame_in(frame, objects, &objects, sink, labels)
    }

    /// Draw every object of a frame against a host-supplied scene.
    pub fn draw_frame_in(
        &mut self,
        frame: &mut FrameDrawContext,
        objects: &[OverlayObject],
        scene: &dyn SceneQuery,
        sink: &mut dyn RenderSink,
        labels: &mut dyn LabelSink,
    ) -> FrameReport {
        let mut report = FrameReport {
            frames: 1,
            ..FrameReport::default()
        };
        for object in objects {
            let drawn = self.draw_object(frame, object, scene, sink, labels);
            report.record(&object.category, drawn);
        }
        if report.rejected > 0 {
            tracing::warn!(
                "Frame {}: render sink rejected {} commands",
                frame.tick(),
                report.rejected
            );
        }
        self.frames_drawn += 1;
        report
    }

    /// Drop caches for an object that is no longer displayed.
    pub fn forget(&mut self, id: Uuid) -> bool {
        self.caches.forget(id)
    }

    /// Hard reset of all per-session state.
    pub fn end_session(&mut self) {
        tracing::info!(
            "Overlay session ended after {} frames, dropping {} cached entries",
            self.frames_drawn,
            self.caches.len()
        );
        self.caches.clear();
        self.frames_drawn = 0;
    }
}
