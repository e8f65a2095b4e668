//! Drawing surface handed to drawers
//!
//! [`GeometryKit`] bundles the long-lived geometry services built from the
//! config. [`DrawCanvas`] is created for every object in every frame; it owns
//! the fault boundary for that object: invalid geometry is skipped, sink
//! rejections are logged once and counted, and nothing escapes to the other
//! objects of the frame.

use std::sync::Arc;

use glam::{Mat3, Vec3};
use lv_core::{
    ArcCase, ArcWedgeSolver, ArcWedgeSpec, CapStyle, DrawCommand, GeometryResult,
    PrimitiveBuilder, RasterMode, Rgba, ShapeStyle, TessellationCache, WorldTransform,
};
use uuid::Uuid;

use crate::cache::{NeighborHit, SessionCaches};
use crate::config::OverlayConfig;
use crate::constants::MARKER_SCREEN_SIZE;
use crate::frame::FrameDrawContext;
use crate::object::{OverlayObject, SceneQuery};
use crate::sink::{Label, LabelSink, RenderSink};

/// Geometry services shared by every drawer in a session
#[derive(Debug, Clone)]
pub struct GeometryKit {
    builder: PrimitiveBuilder,
    solver: ArcWedgeSolver,
    steps: u32,
    base_style: ShapeStyle,
    arc_step_deg: f32,
    arc_face_color: Rgba,
    arc_line_color: Rgba,
    caps: CapStyle,
    rescan_interval: u64,
}

impl GeometryKit {
    /// Build the kit from `config`, sharing `cache`.
    pub fn new(config: &OverlayConfig, cache: Arc<TessellationCache>) -> Self {
        Self {
            builder: PrimitiveBuilder::new(cache),
            solver: ArcWedgeSolver::new(
                config.arc.palette(),
                config.lines.style(RasterMode::Both),
            ),
            steps: config.tessellation.active_steps(),
            base_style: config.lines.style(RasterMode::Wireframe),
            arc_step_deg: config.arc.step_deg,
            arc_face_color: config.arc.face_color,
            arc_line_color: config.arc.line_color,
            caps: config.caps.style(),
            rescan_interval: config.throttle.neighbor_rescan_ticks,
        }
    }

    /// Primitive builder.
    pub fn builder(&self) -> &PrimitiveBuilder {
        &self.builder
    }

    /// Arc solver.
    pub fn solver(&self) -> &ArcWedgeSolver {
        &self.solver
    }

    /// Tessellation steps for primary shapes.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Configured style in `mode` with `color` on lines and faces.
    pub fn style(&self, mode: RasterMode, color: Rgba) -> ShapeStyle {
        self.base_style.with_mode(mode).with_colors(color, color)
    }

    /// Arc spec with the configured step and colors.
    pub fn arc_spec(
        &self,
        center: Vec3,
        axis: Mat3,
        radius: f32,
        min_deg: f32,
        max_deg: f32,
    ) -> ArcWedgeSpec {
        ArcWedgeSpec::new(center, axis, radius, min_deg, max_deg)
            .with_step(self.arc_step_deg)
            .with_colors(self.arc_face_color, self.arc_line_color)
    }

    /// Cap style for solid cylinders and cones.
    pub fn caps(&self) -> CapStyle {
        self.caps
    }

    /// Ticks between neighbor rescans.
    pub fn rescan_interval(&self) -> u64 {
        self.rescan_interval
    }
}

/// What happened while drawing one object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawReport {
    /// Commands accepted by the sink
    pub submitted: usize,
    /// Commands rejected by the sink
    pub rejected: usize,
    /// Shapes skipped because of invalid parameters
    pub skipped_shapes: usize,
    /// Labels emitted
    pub labels: usize,
}

/// Outline of a solved arc, for anchoring labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcOutline {
    /// Case that was drawn
    pub case: ArcCase,
    /// First rim point drawn
    pub first_rim: Vec3,
    /// Last rim point drawn
    pub last_rim: Vec3,
}

/// Per-object drawing surface
pub struct DrawCanvas<'a> {
    kit: &'a GeometryKit,
    frame: &'a mut FrameDrawContext,
    sink: &'a mut dyn RenderSink,
    labels: &'a mut dyn LabelSink,
    caches: &'a mut SessionCaches,
    scene: &'a dyn SceneQuery,
    object_id: Uuid,
    report: DrawReport,
}

impl<'a> DrawCanvas<'a> {
    /// Canvas for drawing the object `object_id`.
    pub fn new(
        kit: &'a GeometryKit,
        frame: &'a mut FrameDrawContext,
        sink: &'a mut dyn RenderSink,
        labels: &'a mut dyn LabelSink,
        caches: &'a mut SessionCaches,
        scene: &'a dyn SceneQuery,
        object_id: Uuid,
    ) -> Self {
        Self {
            kit,
            frame,
            sink,
            labels,
            caches,
            scene,
            object_id,
            report: DrawReport::default(),
        }
    }

    /// Geometry services.
    pub fn kit(&self) -> &GeometryKit {
        self.kit
    }

    /// Current frame state.
    pub fn frame(&self) -> &FrameDrawContext {
        self.frame
    }

    /// Report so far.
    pub fn report(&self) -> DrawReport {
        self.report
    }

    /// Consume the canvas and return its report.
    pub fn finish(self) -> DrawReport {
        self.report
    }

    /// Send commands to the sink. A rejected command does not stop the rest.
    pub fn submit(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        for command in commands {
            match self.sink.submit(&command) {
                Ok(()) => self.report.submitted += 1,
                Err(e) => {
                    if self.report.rejected == 0 {
                        tracing::warn!(
                            "Render sink rejected command for {}: {}",
                            self.object_id,
                            e
                        );
                    }
                    self.report.rejected += 1;
                }
            }
        }
    }

    fn submit_result(&mut self, shape: &str, result: GeometryResult<Vec<DrawCommand>>) {
        match result {
            Ok(commands) => self.submit(commands),
            Err(e) => {
                tracing::debug!("Skipping {} for {}: {}", shape, self.object_id, e);
                self.report.skipped_shapes += 1;
            }
        }
    }

    /// Sphere centered at the transform origin.
    pub fn sphere(&mut self, transform: &WorldTransform, radius: f32, style: &ShapeStyle) {
        let result = self.kit.builder.sphere(transform, radius, self.kit.steps, style);
        self.submit_result("sphere", result);
    }

    /// Cylinder centered at the transform origin along up.
    pub fn cylinder(
        &mut self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        style: &ShapeStyle,
    ) {
        let result = self.kit.builder.cylinder(
            transform,
            radius,
            height,
            self.kit.steps,
            style,
            self.kit.caps,
        );
        self.submit_result("cylinder", result);
    }

    /// Cone with its apex at the transform origin opening along up.
    pub fn cone(
        &mut self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        style: &ShapeStyle,
    ) {
        let result = self.kit.builder.cone(
            transform,
            radius,
            height,
            self.kit.steps,
            style,
            self.kit.caps,
        );
        self.submit_result("cone", result);
    }

    /// Capsule centered at the transform origin along up.
    pub fn capsule(
        &mut self,
        transform: &WorldTransform,
        radius: f32,
        height: f32,
        style: &ShapeStyle,
    ) {
        let result = self
            .kit
            .builder
            .capsule(transform, radius, height, self.kit.steps, style);
        self.submit_result("capsule", result);
    }

    /// Solve and draw an arc. Returns `None` when the spec is invalid.
    pub fn arc(&mut self, spec: &ArcWedgeSpec) -> Option<ArcOutline> {
        match self.kit.solver.solve(spec) {
            Ok(solution) => {
                let outline = ArcOutline {
                    case: solution.case,
                    first_rim: solution.first_rim,
                    last_rim: solution.last_rim,
                };
                self.submit(solution.commands);
                Some(outline)
            }
            Err(e) => {
                tracing::debug!("Skipping arc for {}: {}", self.object_id, e);
                self.report.skipped_shapes += 1;
                None
            }
        }
    }

    /// Single line in the configured line style.
    pub fn line(&mut self, from: Vec3, to: Vec3, color: Rgba) {
        let style = self.kit.style(RasterMode::Wireframe, color);
        if let Some(line) = style.line(from, to) {
            self.submit([DrawCommand::Line(line)]);
        }
    }

    /// Circle of `radius` around `center` in the plane spanned by `u` and `v`.
    pub fn ring(&mut self, center: Vec3, u: Vec3, v: Vec3, radius: f32, color: Rgba) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let steps = self.kit.steps.max(3);
        let point = |i: u32| {
            let (sin, cos) = (i as f32 / steps as f32 * std::f32::consts::TAU).sin_cos();
            center + (u * cos + v * sin) * radius
        };
        for i in 0..steps {
            self.line(point(i), point(i + 1), color);
        }
    }

    /// Screen-constant cross marker at `point`.
    pub fn marker(&mut self, point: Vec3, color: Rgba) {
        let half = self.frame.screen_constant(point, MARKER_SCREEN_SIZE) * 0.5;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            self.line(point - axis * half, point + axis * half, color);
        }
    }

    /// Emit a label if the frame budget allows. Returns false once exhausted.
    pub fn label(
        &mut self,
        anchor: Vec3,
        direction: Vec3,
        color: Rgba,
        text: impl Into<String>,
    ) -> bool {
        if !self.frame.try_consume_label() {
            tracing::trace!("Label budget exhausted, skipping label for {}", self.object_id);
            return false;
        }
        self.labels.push_label(Label {
            anchor,
            direction,
            color,
            text: text.into(),
        });
        self.report.labels += 1;
        true
    }

    /// Neighbors of `object` within `radius`, rescanned on the configured
    /// interval and stale in between.
    pub fn neighbors(&mut self, object: &OverlayObject, radius: f32) -> Vec<NeighborHit> {
        let tick = self.frame.tick();
        self.caches
            .neighbors(object, radius, self.kit.rescan_interval, tick, self.scene)
            .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::frame::CameraState;
    use crate::sink::{RecordingLabels, RecordingSink};

    /// Counts WARN events raised from this module.
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            if *metadata.level() == tracing::Level::WARN
                && metadata.target() == "lv_overlay::canvas"
            {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    struct Fixture {
        kit: GeometryKit,
        frame: FrameDrawContext,
        sink: RecordingSink,
        labels: RecordingLabels,
        caches: SessionCaches,
        scene: Vec<OverlayObject>,
    }

    impl Fixture {
        fn new(sink: RecordingSink, label_budget: u32) -> Self {
            Self {
                kit: GeometryKit::new(
                    &OverlayConfig::default(),
                    Arc::new(TessellationCache::new()),
                ),
                frame: FrameDrawContext::new(CameraState::default(), 0, label_budget),
                sink,
                labels: RecordingLabels::new(),
                caches: SessionCaches::new(),
                scene: Vec::new(),
            }
        }

        fn canvas(&mut self) -> DrawCanvas<'_> {
            DrawCanvas::new(
                &self.kit,
                &mut self.frame,
                &mut self.sink,
                &mut self.labels,
                &mut self.caches,
                &self.scene,
                Uuid::nil(),
            )
        }
    }

    #[test]
    fn test_rejections_do_not_stop_remaining_commands() {
        let mut fixture = Fixture::new(RecordingSink::rejecting(|c| !c.is_line()), 0);
        let style = fixture.kit.style(RasterMode::Both, [1.0; 4]);
        let mut canvas = fixture.canvas();
        canvas.sphere(&WorldTransform::IDENTITY, 1.0, &style);
        let report = canvas.finish();

        assert!(report.rejected > 0);
        assert!(report.submitted > 0);
        assert_eq!(fixture.sink.rejected(), report.rejected);
        assert_eq!(fixture.sink.commands().len(), report.submitted);
    }

    #[test]
    fn test_rejections_warn_once_per_object() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));

        let mut fixture = Fixture::new(RecordingSink::rejecting(|_| true), 0);
        let style = fixture.kit.style(RasterMode::Both, [1.0; 4]);
        let report = tracing::subscriber::with_default(subscriber, || {
            let mut canvas = fixture.canvas();
            canvas.sphere(&WorldTransform::IDENTITY, 1.0, &style);
            canvas.cylinder(&WorldTransform::IDENTITY, 1.0, 2.0, &style);
            canvas.finish()
        });

        assert!(report.rejected > 1);
        assert_eq!(report.submitted, 0);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_arc_is_skipped() {
        let mut fixture = Fixture::new(RecordingSink::new(), 0);
        let spec = fixture.kit.arc_spec(Vec3::ZERO, Mat3::IDENTITY, -1.0, 0.0, 90.0);
        let mut canvas = fixture.canvas();
        assert!(canvas.arc(&spec).is_none());
        assert_eq!(canvas.report().skipped_shapes, 1);
        assert_eq!(canvas.report().submitted, 0);
    }

    #[test]
    fn test_degenerate_shape_is_not_counted_as_skipped() {
        let mut fixture = Fixture::new(RecordingSink::new(), 0);
        let style = fixture.kit.style(RasterMode::Wireframe, [1.0; 4]);
        let mut canvas = fixture.canvas();
        canvas.cylinder(&WorldTransform::IDENTITY, 0.0, 1.0, &style);
        assert_eq!(canvas.report(), DrawReport::default());
    }

    #[test]
    fn test_label_respects_budget() {
        let mut fixture = Fixture::new(RecordingSink::new(), 1);
        let mut canvas = fixture.canvas();
        assert!(canvas.label(Vec3::ZERO, Vec3::Y, [1.0; 4], "a"));
        assert!(!canvas.label(Vec3::ZERO, Vec3::Y, [1.0; 4], "b"));
        assert_eq!(canvas.report().labels, 1);
        assert_eq!(fixture.labels.len(), 1);
    }

    #[test]
    fn test_ring_closes() {
        let mut fixture = Fixture::new(RecordingSink::new(), 0);
        let mut canvas = fixture.canvas();
        canvas.ring(Vec3::ZERO, Vec3::X, Vec3::Z, 2.0, [1.0; 4]);
        canvas.ring(Vec3::ZERO, Vec3::X, Vec3::Z, 0.0, [1.0; 4]);
        assert_eq!(canvas.report().submitted, 24);
        let first = fixture.sink.commands()[0].points()[0];
        let last = fixture.sink.commands()[23].points()[1];
        assert!(first.distance(last) < 1e-4);
    }

    #[test]
    fn test_marker_is_three_lines() {
        let mut fixture = Fixture::new(RecordingSink::new(), 0);
        fixture.frame = FrameDrawContext::new(CameraState::at(Vec3::new(0.0, 0.0, -10.0)), 0, 0);
        let mut canvas = fixture.canvas();
        canvas.marker(Vec3::ZERO, [1.0; 4]);
        assert_eq!(canvas.report().submitted, 3);
    }
}
