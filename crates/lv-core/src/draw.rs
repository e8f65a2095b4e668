//! Draw commands handed to the rendering sink.
//!
//! Commands are plain values: they are produced by the primitive builder and
//! the arc solver, consumed immediately by a sink, and never retained.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LINE_THICKNESS, MIN_LINE_LENGTH, colors};

/// RGBA color
pub type Rgba = [f32; 4];

/// Opaque material identifier understood by the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Flat square texture, used for lines and faces
    pub const SQUARE: Self = Self(0);
    /// Round dot, used for point markers
    pub const DOT: Self = Self(1);
    /// Soft gradient, used for solid faces
    pub const GRADIENT: Self = Self(2);
    /// Hook arrow texture for open-ended limits
    pub const HOOK: Self = Self(3);
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::SQUARE
    }
}

/// Blend mode requested from the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Alpha blended, depth tested
    #[default]
    Standard,
    /// Additive, depth tested
    Additive,
    /// Drawn after post-processing
    PostPP,
    /// Additive, drawn over geometry
    AdditiveTop,
}

/// Which parts of a shape are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RasterMode {
    /// Lines only
    #[default]
    Wireframe,
    /// Faces only
    Solid,
    /// Lines and faces
    Both,
}

impl RasterMode {
    /// Returns true if lines are emitted.
    pub fn has_lines(self) -> bool {
        matches!(self, Self::Wireframe | Self::Both)
    }

    /// Returns true if faces are emitted.
    pub fn has_faces(self) -> bool {
        matches!(self, Self::Solid | Self::Both)
    }
}

/// Styling shared by every primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Lines, faces or both
    pub mode: RasterMode,
    /// Material for face quads and triangles
    pub face_material: MaterialId,
    /// Material for lines
    pub line_material: MaterialId,
    /// Line thickness in world units
    pub line_thickness: f32,
    /// Face color
    pub face_color: Rgba,
    /// Line color
    pub line_color: Rgba,
    /// Blend mode for every emitted command
    pub blend: BlendMode,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            mode: RasterMode::Wireframe,
            face_material: MaterialId::SQUARE,
            line_material: MaterialId::SQUARE,
            line_thickness: DEFAULT_LINE_THICKNESS,
            face_color: colors::FACE,
            line_color: colors::LINE,
            blend: BlendMode::Standard,
        }
    }
}

impl ShapeStyle {
    /// Wireframe style with one color.
    pub fn wireframe(color: Rgba, thickness: f32) -> Self {
        Self {
            mode: RasterMode::Wireframe,
            line_thickness: thickness,
            line_color: color,
            ..Self::default()
        }
    }

    /// Copy with a different raster mode.
    pub fn with_mode(mut self, mode: RasterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Copy with face and line colors replaced.
    pub fn with_colors(mut self, face_color: Rgba, line_color: Rgba) -> Self {
        self.face_color = face_color;
        self.line_color = line_color;
        self
    }

    /// Line command from `from` to `to`, or `None` when the segment is too short.
    pub fn line(&self, from: Vec3, to: Vec3) -> Option<LineCommand> {
        LineCommand::between(
            from,
            to,
            self.line_thickness,
            self.line_material,
            self.line_color,
            self.blend,
        )
    }

    /// Quad command using the face color.
    pub fn quad(&self, points: [Vec3; 4], normal: Vec3) -> QuadCommand {
        QuadCommand {
            points,
            normal,
            color: self.face_color,
            material: self.face_material,
            blend: self.blend,
        }
    }

    /// Triangle command with an explicit color.
    pub fn triangle(&self, points: [Vec3; 3], normal: Vec3, color: Rgba) -> TriangleCommand {
        TriangleCommand {
            points,
            normal,
            color,
            material: self.face_material,
            blend: self.blend,
        }
    }
}

/// Line segment expressed as origin, unit direction and length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCommand {
    /// Start of the line
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Length along `direction`
    pub length: f32,
    /// Thickness in world units
    pub thickness: f32,
    /// Material
    pub material: MaterialId,
    /// Blend mode
    pub blend: BlendMode,
    /// Color
    pub color: Rgba,
}

impl LineCommand {
    /// Line from `from` to `to`, or `None` when the points (nearly) coincide.
    pub fn between(
        from: Vec3,
        to: Vec3,
        thickness: f32,
        material: MaterialId,
        color: Rgba,
        blend: BlendMode,
    ) -> Option<Self> {
        let delta = to - from;
        let length = delta.length();
        if !length.is_finite() || length < MIN_LINE_LENGTH {
            return None;
        }
        Some(Self {
            origin: from,
            direction: delta / length,
            length,
            thickness,
            material,
            blend,
            color,
        })
    }

    /// End point of the line.
    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }
}

/// Four-point face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCommand {
    /// Corners in winding order
    pub points: [Vec3; 4],
    /// Face normal
    pub normal: Vec3,
    /// Color
    pub color: Rgba,
    /// Material
    pub material: MaterialId,
    /// Blend mode
    pub blend: BlendMode,
}

/// Three-point face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleCommand {
    /// Corners in winding order
    pub points: [Vec3; 3],
    /// Face normal
    pub normal: Vec3,
    /// Color
    pub color: Rgba,
    /// Material
    pub material: MaterialId,
    /// Blend mode
    pub blend: BlendMode,
}

/// A single primitive for the rendering sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Line segment
    Line(LineCommand),
    /// Quad face
    Quad(QuadCommand),
    /// Triangle face
    Triangle(TriangleCommand),
}

impl DrawCommand {
    /// Color of the command.
    pub fn color(&self) -> Rgba {
        match self {
            DrawCommand::Line(line) => line.color,
            DrawCommand::Quad(quad) => quad.color,
            DrawCommand::Triangle(tri) => tri.color,
        }
    }

    /// Returns true for line commands.
    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::Line(_))
    }

    /// Every world-space point referenced by the command.
    pub fn points(&self) -> Vec<Vec3> {
        match self {
            DrawCommand::Line(line) => vec![line.origin, line.end()],
            DrawCommand::Quad(quad) => quad.points.to_vec(),
            DrawCommand::Triangle(tri) => tri.points.to_vec(),
        }
    }
}

impl From<LineCommand> for DrawCommand {
    fn from(line: LineCommand) -> Self {
        DrawCommand::Line(line)
    }
}

impl From<QuadCommand> for DrawCommand {
    fn from(quad: QuadCommand) -> Self {
        DrawCommand::Quad(quad)
    }
}

impl From<TriangleCommand> for DrawCommand {
    fn from(tri: TriangleCommand) -> Self {
        DrawCommand::Triangle(tri)
    }
}

/// Convert an sRGB color to linear space, keeping alpha.
pub fn srgb_to_linear(color: Rgba) -> Rgba {
    fn channel(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [channel(color[0]), channel(color[1]), channel(color[2]), color[3]]
}
