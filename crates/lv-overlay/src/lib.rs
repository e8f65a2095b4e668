//! Limit-shape overlays for displayed objects
//!
//! Resolves a drawer for each displayed object by category, hands it a
//! per-object [`DrawCanvas`] and forwards the resulting commands to the
//! host's render and label sinks.
//!
//! # Module Structure
//!
//! ```text
//! lv-overlay/
//! ├── session.rs     # OverlaySession: frame loop, fault boundaries, reset
//! ├── registry.rs    # CategoryKey, Drawer trait, OverlayRegistry
//! ├── drawers/       # Built-in drawers and fallbacks
//! ├── canvas.rs      # GeometryKit and the per-object DrawCanvas
//! ├── frame.rs       # CameraState, FrameDrawContext, ThrottledValue
//! ├── cache.rs       # Per-session neighbor caches
//! ├── object.rs      # OverlayObject model and SceneQuery
//! ├── sink.rs        # RenderSink / LabelSink and recording sinks
//! ├── config.rs      # RON configuration
//! └── constants.rs   # Category keys, colors, defaults
//! ```

pub mod cache;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod drawers;
pub mod frame;
pub mod object;
pub mod registry;
pub mod session;
pub mod sink;

// Re-exports for convenience
pub use cache::{NeighborHit, SessionCaches};
pub use canvas::{ArcOutline, DrawCanvas, DrawReport, GeometryKit};
pub use config::{ConfigError, OverlayConfig, QualityPreset};
pub use drawers::register_builtin;
pub use frame::{CameraState, FrameDrawContext, ThrottledValue};
pub use object::{AimLimits, AngleLimits, OverlayObject, PlumeShape, SceneQuery, TravelLimits};
pub use registry::{CategoryKey, Drawer, OverlayRegistry};
pub use session::{CategoryReport, FrameReport, OverlaySession};
pub use sink::{Label, LabelSink, RecordingLabels, RecordingSink, RenderSink, SinkError};
