//! World transforms supplied per drawn object.

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Orthonormal-or-scaled object transform.
///
/// The basis vectors may carry scale; nothing here renormalizes them. A
/// transform is borrowed for the duration of a single draw call and never
/// stored by the geometry code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    /// Local +X in world space
    pub right: Vec3,
    /// Local +Y in world space
    pub up: Vec3,
    /// Local forward in world space
    pub forward: Vec3,
    /// Origin in world space
    pub translation: Vec3,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WorldTransform {
    /// Identity transform (forward is local +Z)
    pub const IDENTITY: Self = Self {
        right: Vec3::X,
        up: Vec3::Y,
        forward: Vec3::Z,
        translation: Vec3::ZERO,
    };

    /// Create a transform from its basis and origin.
    pub fn new(right: Vec3, up: Vec3, forward: Vec3, translation: Vec3) -> Self {
        Self {
            right,
            up,
            forward,
            translation,
        }
    }

    /// Identity basis placed at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Build from an affine matrix. Columns 0..3 become right/up/forward.
    pub fn from_mat4(matrix: Mat4) -> Self {
        Self {
            right: matrix.x_axis.truncate(),
            up: matrix.y_axis.truncate(),
            forward: matrix.z_axis.truncate(),
            translation: matrix.w_axis.truncate(),
        }
    }

    /// Affine matrix with right/up/forward as the first three columns.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            self.translation.extend(1.0),
        )
    }

    /// Linear part of the transform.
    pub fn basis(&self) -> Mat3 {
        Mat3::from_cols(self.right, self.up, self.forward)
    }

    /// Copy of this transform moved to a new origin.
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Copy of this transform with the basis replaced.
    pub fn with_basis(mut self, basis: Mat3) -> Self {
        self.right = basis.x_axis;
        self.up = basis.y_axis;
        self.forward = basis.z_axis;
        self
    }

    /// Transform a local-space point.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.transform_vector(local)
    }

    /// Transform a local-space direction (no translation).
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.right * local.x + self.up * local.y + self.forward * local.z
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.right.is_finite()
            && self.up.is_finite()
            && self.forward.is_finite()
            && self.translation.is_finite()
    }

    /// Length of the longest basis vector.
    pub fn max_scale(&self) -> f32 {
        self.right
            .length()
            .max(self.up.length())
            .max(self.forward.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat4_round_trip_keeps_columns() {
        let transform = WorldTransform::new(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            Vec3::X,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let matrix = transform.to_mat4();
        assert_eq!(
            matrix.transform_point3(Vec3::X),
            transform.transform_point(Vec3::X)
        );
        assert_eq!(WorldTransform::from_mat4(matrix), transform);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut transform = WorldTransform::IDENTITY;
        assert!(transform.is_finite());
        transform.translation.y = f32::NAN;
        assert!(!transform.is_finite());
    }

    #[test]
    fn test_max_scale() {
        let transform = WorldTransform::new(Vec3::X * 2.0, Vec3::Y, Vec3::Z * 3.0, Vec3::ZERO);
        assert_eq!(transform.max_scale(), 3.0);
    }
}
