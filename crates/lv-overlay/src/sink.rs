//! Rendering and label sinks
//!
//! The overlay never rasterizes. Commands go to a [`RenderSink`] owned by the
//! host and labels to a [`LabelSink`]; neither is read back.

use glam::Vec3;
use lv_core::{DrawCommand, LineCommand, QuadCommand, Rgba, TriangleCommand};

/// Sink errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SinkError {
    /// The sink refused this command
    #[error("Command rejected: {0}")]
    Rejected(String),
    /// The sink no longer accepts commands
    #[error("Sink closed")]
    Closed,
}

/// Host renderer interface
pub trait RenderSink {
    /// Draw a line segment.
    fn draw_line(&mut self, line: &LineCommand) -> Result<(), SinkError>;

    /// Draw a quad.
    fn draw_quad(&mut self, quad: &QuadCommand) -> Result<(), SinkError>;

    /// Draw a triangle.
    fn draw_triangle(&mut self, triangle: &TriangleCommand) -> Result<(), SinkError>;

    /// Dispatch a command to the matching method.
    fn submit(&mut self, command: &DrawCommand) -> Result<(), SinkError> {
        match command {
            DrawCommand::Line(line) => self.draw_line(line),
            DrawCommand::Quad(quad) => self.draw_quad(quad),
            DrawCommand::Triangle(triangle) => self.draw_triangle(triangle),
        }
    }
}

/// A text label for the host's label renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// World-space anchor
    pub anchor: Vec3,
    /// Direction the label should lean toward
    pub direction: Vec3,
    /// Text color
    pub color: Rgba,
    /// Text
    pub text: String,
}

/// Host label renderer interface
pub trait LabelSink {
    /// Queue a label for this frame.
    fn push_label(&mut self, label: Label);
}

type RejectFn = Box<dyn Fn(&DrawCommand) -> bool>;

/// Sink that keeps every accepted command.
///
/// An optional predicate rejects matching commands with
/// [`SinkError::Rejected`], which is how sink failures are exercised without a
/// real renderer.
#[derive(Default)]
pub struct RecordingSink {
    commands: Vec<DrawCommand>,
    reject: Option<RejectFn>,
    rejected: usize,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that rejects every command matching `predicate`.
    pub fn rejecting(predicate: impl Fn(&DrawCommand) -> bool + 'static) -> Self {
        Self {
            reject: Some(Box::new(predicate)),
            ..Self::default()
        }
    }

    /// Accepted commands in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of rejected commands.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Number of accepted line commands.
    pub fn line_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_line()).count()
    }

    /// Number of accepted face commands.
    pub fn face_count(&self) -> usize {
        self.commands.len() - self.line_count()
    }

    /// Drop recorded commands, keeping the predicate.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.rejected = 0;
    }

    fn record(&mut self, command: DrawCommand) -> Result<(), SinkError> {
        if let Some(reject) = &self.reject
            && reject(&command)
        {
            self.rejected += 1;
            return Err(SinkError::Rejected(kind(&command).to_string()));
        }
        self.commands.push(command);
        Ok(())
    }
}

fn kind(command: &DrawCommand) -> &'static str {
    match command {
        DrawCommand::Line(_) => "line",
        DrawCommand::Quad(_) => "quad",
        DrawCommand::Triangle(_) => "triangle",
    }
}

impl std::fmt::Debug for RecordingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSink")
            .field("commands", &self.commands.len())
            .field("rejecting", &self.reject.is_some())
            .field("rejected", &self.rejected)
            .finish()
    }
}

impl RenderSink for RecordingSink {
    fn draw_line(&mut self, line: &LineCommand) -> Result<(), SinkError> {
        self.record(DrawCommand::Line(*line))
    }

    fn draw_quad(&mut self, quad: &QuadCommand) -> Result<(), SinkError> {
        self.record(DrawCommand::Quad(*quad))
    }

    fn draw_triangle(&mut self, triangle: &TriangleCommand) -> Result<(), SinkError> {
        self.record(DrawCommand::Triangle(*triangle))
    }
}

/// Label sink that keeps every label.
#[derive(Debug, Default, Clone)]
pub struct RecordingLabels {
    labels: Vec<Label>,
}

impl RecordingLabels {
    /// Create an empty label sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in emission order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no labels were emitted.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drop recorded labels.
    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

impl LabelSink for RecordingLabels {
    fn push_label(&mut self, label: Label) {
        self.labels.push(label);
    }
}
