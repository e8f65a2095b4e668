//! Overlay object model
//!
//! An [`OverlayObject`] is the orchestrator's description of one displayed
//! object: its category tag, transform, and whichever limit data its drawer
//! needs. Scenes are plain `Vec<OverlayObject>` and round-trip through RON.

use glam::Vec3;
use lv_core::WorldTransform;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::CategoryKey;

/// Rotation limits of a motor, rotor or hinge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleLimits {
    /// Lower limit in degrees (≤ -360 means unlimited)
    pub min_deg: f32,
    /// Upper limit in degrees (≥ 360 means unlimited)
    pub max_deg: f32,
    /// Current angle in degrees
    #[serde(default)]
    pub current_deg: f32,
    /// Arc radius; zero uses the object's bounding radius
    #[serde(default)]
    pub radius: f32,
}

impl AngleLimits {
    /// Limits without a current angle or explicit radius.
    pub fn new(min_deg: f32, max_deg: f32) -> Self {
        Self {
            min_deg,
            max_deg,
            current_deg: 0.0,
            radius: 0.0,
        }
    }

    /// Limits with no bound in either direction.
    pub fn unlimited() -> Self {
        Self::new(-361.0, 361.0)
    }
}

/// Yaw and pitch limits of a turret
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimLimits {
    /// Yaw lower limit in degrees
    pub yaw_min_deg: f32,
    /// Yaw upper limit in degrees
    pub yaw_max_deg: f32,
    /// Pitch lower limit in degrees
    pub pitch_min_deg: f32,
    /// Pitch upper limit in degrees
    pub pitch_max_deg: f32,
    /// Engagement range; zero draws no range sphere
    #[serde(default)]
    pub range: f32,
    /// Arc radius; zero uses the object's bounding radius
    #[serde(default)]
    pub arc_radius: f32,
}

/// Suspension travel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelLimits {
    /// Lowest travel along `Up`
    pub min: f32,
    /// Highest travel along `Up`
    pub max: f32,
    /// Wheel radius
    pub wheel_radius: f32,
}

/// Thruster damage and flame volumes along `Forward`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeShape {
    /// Radius of the damage capsule
    pub damage_radius: f32,
    /// Length of the damage capsule
    pub damage_length: f32,
    /// Base radius of the flame cone
    pub flame_radius: f32,
    /// Length of the flame cone
    pub flame_length: f32,
}

/// One displayed object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayObject {
    /// Identity used to key per-object session caches
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Dispatch tag
    pub category: CategoryKey,
    /// Display name, used in labels
    #[serde(default)]
    pub name: String,
    /// World transform
    #[serde(default)]
    pub transform: WorldTransform,
    /// Bounding sphere radius
    #[serde(default)]
    pub bounding_radius: f32,
    /// Rotation limits
    #[serde(default)]
    pub rotation_limits: Option<AngleLimits>,
    /// Aim limits
    #[serde(default)]
    pub aim_limits: Option<AimLimits>,
    /// Suspension travel
    #[serde(default)]
    pub travel: Option<TravelLimits>,
    /// Blast radius; zero means none
    #[serde(default)]
    pub blast_radius: f32,
    /// Thruster plume
    #[serde(default)]
    pub plume: Option<PlumeShape>,
}

impl OverlayObject {
    /// Create an object with a fresh id at the origin.
    pub fn new(category: impl Into<CategoryKey>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            name: name.into(),
            transform: WorldTransform::IDENTITY,
            bounding_radius: 0.0,
            rotation_limits: None,
            aim_limits: None,
            travel: None,
            blast_radius: 0.0,
            plume: None,
        }
    }

    /// Builder: set the transform.
    pub fn with_transform(mut self, transform: WorldTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: move to `position`.
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform = self.transform.with_translation(position);
        self
    }

    /// Builder: set the bounding radius.
    pub fn with_bounding_radius(mut self, radius: f32) -> Self {
        self.bounding_radius = radius;
        self
    }

    /// Builder: set rotation limits.
    pub fn with_rotation_limits(mut self, limits: AngleLimits) -> Self {
        self.rotation_limits = Some(limits);
        self
    }

    /// Builder: set aim limits.
    pub fn with_aim_limits(mut self, limits: AimLimits) -> Self {
        self.aim_limits = Some(limits);
        self
    }

    /// Builder: set suspension travel.
    pub fn with_travel(mut self, travel: TravelLimits) -> Self {
        self.travel = Some(travel);
        self
    }

    /// Builder: set the blast radius.
    pub fn with_blast_radius(mut self, radius: f32) -> Self {
        self.blast_radius = radius;
        self
    }

    /// Builder: set the thruster plume.
    pub fn with_plume(mut self, plume: PlumeShape) -> Self {
        self.plume = Some(plume);
        self
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Label text, falling back to the category when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.category.as_str()
        } else {
            &self.name
        }
    }
}

/// Object lookup used by drawers that look at their surroundings
pub trait SceneQuery {
    /// Objects whose position lies within `radius` of `center`.
    fn objects_within(&self, center: Vec3, radius: f32) -> Vec<&OverlayObject>;
}

impl SceneQuery for [OverlayObject] {
    fn objects_within(&self, center: Vec3, radius: f32) -> Vec<&OverlayObject> {
        if !radius.is_finite() || radius < 0.0 {
            return Vec::new();
        }
        let radius_sq = radius * radius;
        self.iter()
            .filter(|o| o.position().distance_squared(center) <= radius_sq)
            .collect()
    }
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn objects_within(&self, center: Vec3, radius: f32) -> Vec<&OverlayObject> {
        (**self).objects_within(center, radius)
    }
}

impl SceneQuery for Vec<OverlayObject> {
    fn objects_within(&self, center: Vec3, radius: f32) -> Vec<&OverlayObject> {
        self.as_slice().objects_within(center, radius)
    }
}
