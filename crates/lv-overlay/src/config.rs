//! Overlay configuration structures
//!
//! Settings that can be serialized and loaded from RON configuration files.
//! Every section falls back to its defaults when omitted.

use std::path::Path;

use lv_core::constants::{MAX_ARC_STEP_DEG, MIN_ARC_STEP_DEG, colors};
use lv_core::{
    ArcPalette, BlendMode, CapStyle, MaterialId, RasterMode, Rgba, ShapeStyle, TessellationKey,
};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LABEL_BUDGET, DEFAULT_LINE_THICKNESS, DEFAULT_NEIGHBOR_RESCAN_TICKS};

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(String),
    /// Text is not valid RON for this structure
    #[error("Parse error: {0}")]
    Parse(String),
    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tessellation quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    /// Coarse geometry
    Low,
    /// Balanced geometry
    #[default]
    Medium,
    /// Fine geometry
    High,
}

/// Tessellation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TessellationConfig {
    /// Step count for the low preset
    pub low: u32,
    /// Step count for the medium preset
    pub medium: u32,
    /// Step count for the high preset
    pub high: u32,
    /// Preset used for primary shapes
    pub preset: QualityPreset,
    /// Generate every preset when the session starts
    pub eager: bool,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            low: 12,
            medium: 24,
            high: 36,
            preset: QualityPreset::Medium,
            eager: true,
        }
    }
}

impl TessellationConfig {
    /// Step count for `preset`.
    pub fn steps(&self, preset: QualityPreset) -> u32 {
        match preset {
            QualityPreset::Low => self.low,
            QualityPreset::Medium => self.medium,
            QualityPreset::High => self.high,
        }
    }

    /// Step count for the configured preset.
    pub fn active_steps(&self) -> u32 {
        self.steps(self.preset)
    }

    /// Every preset step count.
    pub fn all_steps(&self) -> [u32; 3] {
        [self.low, self.medium, self.high]
    }
}

/// Arc and wedge configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcConfig {
    /// Rim step in degrees
    pub step_deg: f32,
    /// Face color for bounded wedges (RGBA)
    pub face_color: Rgba,
    /// Line color for bounded wedges and hooks (RGBA)
    pub line_color: Rgba,
    /// Color when both limits are unlimited (RGBA)
    pub unrestricted_color: Rgba,
    /// Color when the span exceeds a full turn (RGBA)
    pub rollover_color: Rgba,
    /// Color for inverted limits (RGBA)
    pub warning_color: Rgba,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            step_deg: 5.0,
            face_color: colors::FACE,
            line_color: colors::LINE,
            unrestricted_color: colors::UNRESTRICTED,
            rollover_color: colors::ROLLOVER,
            warning_color: colors::WARNING,
        }
    }
}

impl ArcConfig {
    /// Palette for the solver.
    pub fn palette(&self) -> ArcPalette {
        ArcPalette {
            unrestricted: self.unrestricted_color,
            rollover: self.rollover_color,
            warning: self.warning_color,
        }
    }
}

/// Line and face styling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineConfig {
    /// Line thickness in world units
    pub thickness: f32,
    /// Line material
    pub line_material: MaterialId,
    /// Face material
    pub face_material: MaterialId,
    /// Blend mode
    pub blend: BlendMode,
    /// Default shape color (RGBA)
    pub color: Rgba,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_LINE_THICKNESS,
            line_material: MaterialId::SQUARE,
            face_material: MaterialId::SQUARE,
            blend: BlendMode::Standard,
            color: [1.0, 1.0, 1.0, 0.8],
        }
    }
}

impl LineConfig {
    /// Shape style in `mode` using the configured color for lines and faces.
    pub fn style(&self, mode: RasterMode) -> ShapeStyle {
        ShapeStyle {
            mode,
            face_material: self.face_material,
            line_material: self.line_material,
            line_thickness: self.thickness,
            face_color: self.color,
            line_color: self.color,
            blend: self.blend,
        }
    }
}

/// End-cap configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapConfig {
    /// Whether solid cylinders and cones get caps
    pub enabled: bool,
    /// Cap color (RGBA, sRGB)
    pub color: Rgba,
    /// Convert the cap color to linear space
    pub linear_tint: bool,
}

impl Default for CapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0.8, 0.8, 0.8, 0.5],
            linear_tint: true,
        }
    }
}

impl CapConfig {
    /// Cap style for the primitive builder.
    pub fn style(&self) -> CapStyle {
        if self.enabled {
            CapStyle::Tinted {
                color: self.color,
                linear: self.linear_tint,
            }
        } else {
            CapStyle::None
        }
    }
}

/// Label configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelConfig {
    /// Whether labels are emitted at all
    pub enabled: bool,
    /// Maximum labels per frame
    pub budget_per_frame: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            budget_per_frame: DEFAULT_LABEL_BUDGET,
        }
    }
}

impl LabelConfig {
    /// Budget to hand to a new frame.
    pub fn frame_budget(&self) -> u32 {
        if self.enabled {
            self.budget_per_frame
        } else {
            0
        }
    }
}

/// Throttling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThrottleConfig {
    /// Ticks between neighbor rescans
    pub neighbor_rescan_ticks: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            neighbor_rescan_ticks: DEFAULT_NEIGHBOR_RESCAN_TICKS,
        }
    }
}

/// Complete overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OverlayConfig {
    /// Tessellation settings
    #[serde(default)]
    pub tessellation: TessellationConfig,
    /// Arc settings
    #[serde(default)]
    pub arc: ArcConfig,
    /// Line settings
    #[serde(default)]
    pub lines: LineConfig,
    /// Cap settings
    #[serde(default)]
    pub caps: CapConfig,
    /// Label settings
    #[serde(default)]
    pub labels: LabelConfig,
    /// Throttle settings
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

impl OverlayConfig {
    /// Create a new overlay configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loading overlay config from {}", path.display());
        Self::from_ron_str(&text)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for steps in self.tessellation.all_steps() {
            TessellationKey::new(steps).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if !(MIN_ARC_STEP_DEG..=MAX_ARC_STEP_DEG).contains(&self.arc.step_deg) {
            return Err(ConfigError::Invalid(format!(
                "arc step {} outside {MIN_ARC_STEP_DEG}..={MAX_ARC_STEP_DEG}",
                self.arc.step_deg
            )));
        }
        if !self.lines.thickness.is_finite() || self.lines.thickness <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "line thickness {} must be positive",
                self.lines.thickness
            )));
        }
        if self.labels.enabled && self.labels.budget_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "label budget must be positive while labels are enabled".into(),
            ));
        }
        if self.throttle.neighbor_rescan_ticks == 0 {
            return Err(ConfigError::Invalid(
                "neighbor rescan interval must be at least one tick".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = OverlayConfig::from_ron_str(
            r#"(
                labels: (enabled: true, budget_per_frame: 4),
                tessellation: (low: 6, medium: 12, high: 24, preset: High, eager: false),
            )"#,
        )
        .unwrap();
        assert_eq!(config.labels.budget_per_frame, 4);
        assert_eq!(config.tessellation.active_steps(), 24);
        assert_eq!(config.arc, ArcConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = OverlayConfig::default();
        config.arc.step_deg = 10.0;
        config.caps.linear_tint = false;
        let text = config.to_ron_string().unwrap();
        assert_eq!(OverlayConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = OverlayConfig::default();
        config.tessellation.medium = 7;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = OverlayConfig::default();
        config.arc.step_deg = 0.0;
        assert!(config.validate().is_err());

        let mut config = OverlayConfig::default();
        config.throttle.neighbor_rescan_ticks = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_labels_have_no_budget() {
        let labels = LabelConfig {
            enabled: false,
            budget_per_frame: 10,
        };
        assert_eq!(labels.frame_budget(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.ron");
        std::fs::write(
            &path,
            r#"(arc: (
                step_deg: 15.0,
                face_color: (0.0, 0.0, 0.0, 0.1),
                line_color: (1.0, 1.0, 1.0, 1.0),
                unrestricted_color: (0.0, 1.0, 0.0, 1.0),
                rollover_color: (1.0, 1.0, 0.0, 1.0),
                warning_color: (1.0, 0.0, 0.0, 1.0),
            ))"#,
        )
        .unwrap();
        let config = OverlayConfig::load(&path).unwrap();
        assert_eq!(config.arc.step_deg, 15.0);

        let missing = OverlayConfig::load(dir.path().join("missing.ron"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
