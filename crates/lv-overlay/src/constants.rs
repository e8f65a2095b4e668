//! Overlay constants

/// Category keys understood by the built-in drawers
pub mod categories {
    /// Motor stator
    pub const MOTOR: &str = "Motor";
    /// Rotor
    pub const ROTOR: &str = "Rotor";
    /// Advanced rotor
    pub const ADVANCED_ROTOR: &str = "AdvancedRotor";
    /// Hinge
    pub const HINGE: &str = "Hinge";
    /// Large turret
    pub const TURRET: &str = "Turret";
    /// Interior turret
    pub const INTERIOR_TURRET: &str = "InteriorTurret";
    /// Searchlight
    pub const SEARCHLIGHT: &str = "Searchlight";
    /// Wheel suspension
    pub const SUSPENSION: &str = "Suspension";
    /// Warhead
    pub const WARHEAD: &str = "Warhead";
    /// Thruster
    pub const THRUSTER: &str = "Thruster";
    /// Large thruster
    pub const LARGE_THRUSTER: &str = "Thruster/Large";
}

/// Default number of labels emitted per frame
pub const DEFAULT_LABEL_BUDGET: u32 = 16;

/// Default number of ticks between neighbor rescans
pub const DEFAULT_NEIGHBOR_RESCAN_TICKS: u64 = 15;

/// Default overlay line thickness in world units
pub const DEFAULT_LINE_THICKNESS: f32 = 0.02;

/// Marker size as a fraction of the view height at the marker's distance
pub const MARKER_SCREEN_SIZE: f32 = 0.01;

/// Arc radius used when an object carries neither a display radius nor bounds
pub const FALLBACK_ARC_RADIUS: f32 = 1.0;

/// Drawer colors (RGBA)
pub mod colors {
    use lv_core::Rgba;

    /// Current-angle indicator
    pub const CURRENT_ANGLE: Rgba = [1.0, 1.0, 1.0, 1.0];
    /// Label text
    pub const LABEL: Rgba = [1.0, 1.0, 1.0, 1.0];
    /// Turret range sphere
    pub const RANGE: Rgba = [1.0, 0.6, 0.0, 0.5];
    /// Suspension travel
    pub const TRAVEL: Rgba = [0.2, 0.6, 1.0, 0.8];
    /// Blast sphere
    pub const BLAST: Rgba = [1.0, 0.2, 0.0, 0.6];
    /// Objects inside a blast radius
    pub const NEIGHBOR: Rgba = [1.0, 0.9, 0.0, 1.0];
    /// Thruster damage capsule
    pub const DAMAGE: Rgba = [1.0, 0.0, 0.0, 0.6];
    /// Thruster flame cone
    pub const FLAME: Rgba = [1.0, 0.5, 0.1, 0.6];
    /// Generic bounds sphere
    pub const BOUNDS: Rgba = [0.6, 0.6, 0.6, 0.5];
}
