//! Limit-shape geometry
//!
//! Pure geometry for transform-relative diagnostic overlays. Nothing in this
//! crate rasterizes; it computes draw commands for a host renderer.
//!
//! # Module Structure
//!
//! ```text
//! lv-core/
//! ├── tessellation.rs  # Unit-sphere generation and the shared cache
//! ├── primitive/       # Sphere, cylinder, cone and capsule builders
//! ├── arc.rs           # Angular limit wedges, hooks and rollover circles
//! ├── draw.rs          # Draw commands, styles, colors
//! ├── transform.rs     # Per-object world transform
//! ├── constants.rs     # Defaults and limits
//! └── error.rs         # GeometryError
//! ```

pub mod arc;
pub mod constants;
pub mod draw;
pub mod error;
pub mod primitive;
pub mod tessellation;
pub mod transform;

// Re-exports for convenience
pub use arc::{ArcCase, ArcPalette, ArcSolution, ArcWedgeSolver, ArcWedgeSpec, HookAnchor};
pub use draw::{
    BlendMode, DrawCommand, LineCommand, MaterialId, QuadCommand, RasterMode, Rgba, ShapeStyle,
    TriangleCommand, srgb_to_linear,
};
pub use error::{GeometryError, GeometryResult};
pub use primitive::{CapStyle, CapsuleParts, PrimitiveBuilder};
pub use tessellation::{TessellationCache, TessellationKey, UnitSphereMesh};
pub use transform::WorldTransform;
