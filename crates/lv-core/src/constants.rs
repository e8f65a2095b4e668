//! Global constants for lv-core

/// Smallest accepted tessellation step count
pub const MIN_TESSELLATION_STEPS: u32 = 1;

/// Largest accepted tessellation step count
pub const MAX_TESSELLATION_STEPS: u32 = 360;

/// Default tessellation step count (15 degree cells)
pub const DEFAULT_TESSELLATION_STEPS: u32 = 24;

/// Angle at or beyond which a limit is treated as unlimited, in degrees
pub const UNLIMITED_ANGLE_DEG: f32 = 360.0;

/// Number of rim segments drawn for an open-ended hook
pub const HOOK_STEPS: u32 = 6;

/// Angular size of a single hook segment, in degrees
pub const HOOK_STEP_DEG: f32 = 5.0;

/// Smallest accepted arc step, in degrees
pub const MIN_ARC_STEP_DEG: f32 = 0.5;

/// Largest accepted arc step, in degrees
pub const MAX_ARC_STEP_DEG: f32 = 90.0;

/// Lines shorter than this are dropped instead of emitted
pub const MIN_LINE_LENGTH: f32 = 1e-6;

/// Default line thickness in world units
pub const DEFAULT_LINE_THICKNESS: f32 = 0.01;

/// Default overlay colors (RGBA)
pub mod colors {
    /// Default wedge face color
    pub const FACE: [f32; 4] = [0.2, 0.6, 1.0, 0.25];
    /// Default wedge rim and outline color
    pub const LINE: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    /// Both limits unlimited
    pub const UNRESTRICTED: [f32; 4] = [0.3, 1.0, 0.3, 1.0];
    /// Permitted range exceeds one full turn
    pub const ROLLOVER: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
    /// Minimum limit above maximum limit
    pub const WARNING: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
}
