//! Angular limit wedges, arcs and hooks
//!
//! Visualizes a rotational limit `[min, max]` (degrees) in the plane of an
//! arc basis. Angle zero lies along the basis' first column and positive
//! angles turn toward its second column; the third column is the rotation
//! axis and the face normal.
//!
//! A limit at or beyond ±360 degrees is unlimited. Exactly one [`ArcCase`]
//! applies to any pair of finite limits, checked in this order:
//!
//! 1. both limits unlimited: full circle in the unrestricted color
//! 2. `max - min > 360`: full circle in the rollover color
//! 3. one limit unlimited: a radial line to the bounded limit plus a short
//!    hook curving into the open direction, no face
//! 4. `max < min`: the swapped wedge in the warning color
//! 5. otherwise: pie slice with radial lines at both limits
//!
//! Rollover is checked before the hook so that a finite minimum paired with a
//! maximum past one turn (`-30..400`) reads as "more than a full turn" rather
//! than as open-ended. The same holds for a single unlimited side whose
//! bounded side lies more than a full turn from it: `-361..90` and `-30..361`
//! are rollovers, not hooks. A hook needs the bounded side within one turn of
//! the sentinel, as in `-360..-10`.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    HOOK_STEP_DEG, HOOK_STEPS, MAX_ARC_STEP_DEG, MIN_ARC_STEP_DEG, UNLIMITED_ANGLE_DEG, colors,
};
use crate::draw::{DrawCommand, RasterMode, Rgba, ShapeStyle};
use crate::error::{GeometryError, GeometryResult};

/// Which limit a hook is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookAnchor {
    /// Minimum is bounded, maximum is open
    Min,
    /// Maximum is bounded, minimum is open
    Max,
}

/// Mutually exclusive arc rendering cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcCase {
    /// Both limits unlimited
    Unrestricted,
    /// Exactly one limit unlimited
    Hook(HookAnchor),
    /// Maximum below minimum
    Inverted,
    /// Span wider than a full turn
    Rollover,
    /// Ordinary bounded wedge
    Bounded,
}

impl ArcCase {
    /// Select the case for a pair of limits in degrees.
    pub fn classify(min_deg: f32, max_deg: f32) -> Self {
        let min_open = min_deg <= -UNLIMITED_ANGLE_DEG;
        let max_open = max_deg >= UNLIMITED_ANGLE_DEG;
        match (min_open, max_open) {
            (true, true) => ArcCase::Unrestricted,
            _ if max_deg - min_deg > 360.0 => ArcCase::Rollover,
            (false, true) => ArcCase::Hook(HookAnchor::Min),
            (true, false) => ArcCase::Hook(HookAnchor::Max),
            (false, false) if max_deg < min_deg => ArcCase::Inverted,
            (false, false) => ArcCase::Bounded,
        }
    }
}

/// Colors for the cases that ignore the wedge's own colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPalette {
    /// Both limits unlimited
    pub unrestricted: Rgba,
    /// Span wider than a full turn
    pub rollover: Rgba,
    /// Maximum below minimum
    pub warning: Rgba,
}

impl Default for ArcPalette {
    fn default() -> Self {
        Self {
            unrestricted: colors::UNRESTRICTED,
            rollover: colors::ROLLOVER,
            warning: colors::WARNING,
        }
    }
}

/// Input for a single arc solve. Built per call, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcWedgeSpec {
    /// Arc center in world space
    pub center: Vec3,
    /// Arc basis: zero direction, 90 degree direction, rotation axis
    pub axis: Mat3,
    /// Rim radius
    pub radius: f32,
    /// Minimum limit in degrees
    pub min_deg: f32,
    /// Maximum limit in degrees
    pub max_deg: f32,
    /// Rim step in degrees
    pub step_deg: f32,
    /// Face color for bounded wedges
    pub face_color: Rgba,
    /// Line color for bounded wedges and hooks
    pub line_color: Rgba,
}

impl ArcWedgeSpec {
    /// Spec with default step and colors.
    pub fn new(center: Vec3, axis: Mat3, radius: f32, min_deg: f32, max_deg: f32) -> Self {
        Self {
            center,
            axis,
            radius,
            min_deg,
            max_deg,
            step_deg: 5.0,
            face_color: colors::FACE,
            line_color: colors::LINE,
        }
    }

    /// Copy with a different rim step.
    pub fn with_step(mut self, step_deg: f32) -> Self {
        self.step_deg = step_deg;
        self
    }

    /// Copy with different face and line colors.
    pub fn with_colors(mut self, face_color: Rgba, line_color: Rgba) -> Self {
        self.face_color = face_color;
        self.line_color = line_color;
        self
    }

    /// World-space rim point at `angle_deg`.
    pub fn rim_point(&self, angle_deg: f32) -> Vec3 {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        self.center + (self.axis.x_axis * cos + self.axis.y_axis * sin) * self.radius
    }

    fn validate(&self) -> GeometryResult<()> {
        if !self.center.is_finite() || !self.axis.is_finite() {
            return Err(GeometryError::invalid("arc center or axis is not finite"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeometryError::invalid(format!(
                "arc radius {} must be positive",
                self.radius
            )));
        }
        if !self.min_deg.is_finite() || !self.max_deg.is_finite() {
            return Err(GeometryError::invalid(format!(
                "arc limits [{}, {}] are not finite",
                self.min_deg, self.max_deg
            )));
        }
        if !(MIN_ARC_STEP_DEG..=MAX_ARC_STEP_DEG).contains(&self.step_deg) {
            return Err(GeometryError::invalid(format!(
                "arc step {} outside {MIN_ARC_STEP_DEG}..={MAX_ARC_STEP_DEG}",
                self.step_deg
            )));
        }
        Ok(())
    }
}

/// Result of an arc solve
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSolution {
    /// Case that produced the commands
    pub case: ArcCase,
    /// First rim point drawn
    pub first_rim: Vec3,
    /// Last rim point drawn
    pub last_rim: Vec3,
    /// Commands to submit
    pub commands: Vec<DrawCommand>,
}

/// Solves arc specs into draw commands
#[derive(Debug, Clone)]
pub struct ArcWedgeSolver {
    palette: ArcPalette,
    style: ShapeStyle,
}

impl Default for ArcWedgeSolver {
    fn default() -> Self {
        Self::new(
            ArcPalette::default(),
            ShapeStyle::default().with_mode(RasterMode::Both),
        )
    }
}

impl ArcWedgeSolver {
    /// Create a solver. `style` supplies materials, thickness and blend mode;
    /// its colors are replaced per case.
    pub fn new(palette: ArcPalette, style: ShapeStyle) -> Self {
        Self { palette, style }
    }

    /// Palette in use.
    pub fn palette(&self) -> &ArcPalette {
        &self.palette
    }

    /// Solve `spec` into commands plus the first and last rim points drawn.
    pub fn solve(&self, spec: &ArcWedgeSpec) -> GeometryResult<ArcSolution> {
        spec.validate()?;
        let case = ArcCase::classify(spec.min_deg, spec.max_deg);
        let mut commands = Vec::new();

        let (first_deg, last_deg) = match case {
            ArcCase::Unrestricted => {
                let style = self.case_style(spec, self.palette.unrestricted);
                self.emit_sweep(spec, &style, 0.0, 360.0, false, &mut commands);
                (0.0, 360.0)
            }
            ArcCase::Hook(anchor) => {
                let (bound, direction) = match anchor {
                    HookAnchor::Min => (spec.min_deg, 1.0),
                    HookAnchor::Max => (spec.max_deg, -1.0),
                };
                let end = bound + direction * HOOK_STEP_DEG * HOOK_STEPS as f32;
                let style = self.case_style(spec, spec.line_color);
                self.emit_hook(spec, &style, bound, direction, &mut commands);
                (bound, end)
            }
            ArcCase::Inverted => {
                let style = self.case_style(spec, self.palette.warning);
                let (min, max) = (spec.max_deg, spec.min_deg);
                self.emit_sweep(spec, &style, min, max, true, &mut commands);
                (spec.max_deg, spec.min_deg)
            }
            ArcCase::Rollover => {
                let style = self.case_style(spec, self.palette.rollover);
                let end = spec.min_deg + 360.0;
                self.emit_sweep(spec, &style, spec.min_deg, end, false, &mut commands);
                (spec.min_deg, end)
            }
            ArcCase::Bounded => {
                let style = self.style.with_colors(spec.face_color, spec.line_color);
                let (min, max) = (spec.min_deg, spec.max_deg);
                self.emit_sweep(spec, &style, min, max, true, &mut commands);
                (spec.min_deg, spec.max_deg)
            }
        };

        Ok(ArcSolution {
            case,
            first_rim: spec.rim_point(first_deg),
            last_rim: spec.rim_point(last_deg),
            commands,
        })
    }

    /// Style whose lines use `color` and whose faces use `color` with the
    /// spec's face alpha.
    fn case_style(&self, spec: &ArcWedgeSpec, color: Rgba) -> ShapeStyle {
        let mut face = color;
        face[3] = spec.face_color[3];
        self.style.with_colors(face, color)
    }

    /// Pie slice from `from` to `to` (degrees, `from <= to`).
    fn emit_sweep(
        &self,
        spec: &ArcWedgeSpec,
        style: &ShapeStyle,
        from: f32,
        to: f32,
        radial_edges: bool,
        commands: &mut Vec<DrawCommand>,
    ) {
        let angles = sweep_angles(from, to, spec.step_deg);
        let rim: Vec<Vec3> = angles.iter().map(|&a| spec.rim_point(a)).collect();
        let normal = spec.axis.z_axis.normalize_or_zero();

        if style.mode.has_faces() {
            for pair in rim.windows(2) {
                commands.push(DrawCommand::Triangle(style.triangle(
                    [spec.center, pair[0], pair[1]],
                    normal,
                    style.face_color,
                )));
            }
        }
        if !style.mode.has_lines() {
            return;
        }
        for pair in rim.windows(2) {
            commands.extend(style.line(pair[0], pair[1]).map(DrawCommand::Line));
        }
        if radial_edges && let (Some(first), Some(last)) = (rim.first(), rim.last()) {
            commands.extend(style.line(spec.center, *first).map(DrawCommand::Line));
            commands.extend(style.line(spec.center, *last).map(DrawCommand::Line));
        }
    }

    /// Radial line to `bound` followed by a fixed-length hook.
    fn emit_hook(
        &self,
        spec: &ArcWedgeSpec,
        style: &ShapeStyle,
        bound: f32,
        direction: f32,
        commands: &mut Vec<DrawCommand>,
    ) {
        let anchor = spec.rim_point(bound);
        commands.extend(style.line(spec.center, anchor).map(DrawCommand::Line));

        let mut previous = anchor;
        for i in 1..=HOOK_STEPS {
            let point = spec.rim_point(bound + direction * HOOK_STEP_DEG * i as f32);
            commands.extend(style.line(previous, point).map(DrawCommand::Line));
            previous = point;
        }
    }
}

/// Angles from `from` to `to` every `step`, always ending exactly at `to`.
fn sweep_angles(from: f32, to: f32, step: f32) -> Vec<f32> {
    let span = to - from;
    if span <= 0.0 {
        return vec![from];
    }
    let segments = (span / step).ceil().max(1.0) as usize;
    let mut angles: Vec<f32> = (0..segments).map(|i| from + step * i as f32).collect();
    angles.push(to);
    angles
}
