//! Rigid/affine transform composition from heterogeneous inputs.
//!
//! Placement calls accept either a ready-made matrix or a
//! (translation, rotation, scale) triple, with each component given in
//! whichever representation the caller has on hand. The accepted shapes are
//! encoded as sum types, so a malformed transform is unrepresentable: there
//! is no runtime shape sniffing, only composition.
//!
//! # Composition Order
//!
//! A TRS triple always composes as **Translate · Rotate · Scale**: geometry
//! is scaled in its local frame, then oriented, then placed. Callers rely on
//! this order to size-then-orient-then-position primitives, so it is part of
//! the contract, not an implementation detail.

use glam::{Affine3A, Mat3, Mat4, Vec3};

/// A rotation in one of the accepted representations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationSpec {
    /// No rotation.
    Identity,
    /// An orthonormal 3×3 rotation matrix, used directly.
    Matrix(Mat3),
    /// Axis-angle: the vector's direction is the rotation axis, its length
    /// the rotation angle in radians. The zero vector rotates by nothing.
    AxisAngle(Vec3),
}

impl RotationSpec {
    /// The 3×3 rotation matrix for this specification.
    ///
    /// Axis-angle vectors go through the Rodrigues rotation formula (glam's
    /// closed-form axis-angle constructor); a zero-length vector maps to the
    /// identity without ever normalizing, so there is no division by zero.
    pub fn matrix(&self) -> Mat3 {
        match self {
            RotationSpec::Identity => Mat3::IDENTITY,
            RotationSpec::Matrix(m) => *m,
            RotationSpec::AxisAngle(v) => {
                let angle = v.length();
                if angle == 0.0 {
                    Mat3::IDENTITY
                } else {
                    Mat3::from_axis_angle(*v / angle, angle)
                }
            }
        }
    }
}

impl From<Mat3> for RotationSpec {
    fn from(m: Mat3) -> Self {
        RotationSpec::Matrix(m)
    }
}

/// A scale in one of the accepted representations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleSpec {
    /// Unit scale.
    Identity,
    /// The same factor on all three axes.
    Uniform(f32),
    /// Independent per-axis factors.
    PerAxis(Vec3),
}

impl ScaleSpec {
    /// The per-axis scale factors for this specification.
    pub fn factors(&self) -> Vec3 {
        match self {
            ScaleSpec::Identity => Vec3::ONE,
            ScaleSpec::Uniform(s) => Vec3::splat(*s),
            ScaleSpec::PerAxis(v) => *v,
        }
    }
}

impl From<f32> for ScaleSpec {
    fn from(s: f32) -> Self {
        ScaleSpec::Uniform(s)
    }
}

/// A complete placement transform.
///
/// # Example
///
/// ```
/// use peltast::{RotationSpec, ScaleSpec, TransformSpec, Vec3};
///
/// // Double the size, spin a quarter turn around Z, lift along Y.
/// let spec = TransformSpec::trs(
///     Some(Vec3::new(0.0, 2.0, 0.0)),
///     RotationSpec::AxisAngle(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2)),
///     ScaleSpec::Uniform(2.0),
/// );
/// let placed = spec.matrix().transform_point3(Vec3::X);
/// assert!((placed - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformSpec {
    /// A ready-made 4×4 homogeneous matrix, used as-is.
    Matrix(Mat4),
    /// A 3×4 affine transform, embedded into the identity 4×4.
    Affine(Affine3A),
    /// A (translation, rotation, scale) triple; omitted components default
    /// to their identities.
    Trs {
        /// Translation, `None` for zero.
        translation: Option<Vec3>,
        /// Rotation component.
        rotation: RotationSpec,
        /// Scale component.
        scale: ScaleSpec,
    },
}

impl TransformSpec {
    /// The identity placement.
    pub const IDENTITY: Self = TransformSpec::Trs {
        translation: None,
        rotation: RotationSpec::Identity,
        scale: ScaleSpec::Identity,
    };

    /// Builds a TRS placement.
    pub fn trs(
        translation: Option<Vec3>,
        rotation: RotationSpec,
        scale: ScaleSpec,
    ) -> Self {
        TransformSpec::Trs {
            translation,
            rotation,
            scale,
        }
    }

    /// Composes the 4×4 homogeneous matrix, `T · R · S` for TRS triples.
    pub fn matrix(&self) -> Mat4 {
        match self {
            TransformSpec::Matrix(m) => *m,
            TransformSpec::Affine(a) => Mat4::from(*a),
            TransformSpec::Trs {
                translation,
                rotation,
                scale,
            } => {
                Mat4::from_translation(translation.unwrap_or(Vec3::ZERO))
                    * Mat4::from_mat3(rotation.matrix())
                    * Mat4::from_scale(scale.factors())
            }
        }
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for TransformSpec {
    fn from(m: Mat4) -> Self {
        TransformSpec::Matrix(m)
    }
}

impl From<Affine3A> for TransformSpec {
    fn from(a: Affine3A) -> Self {
        TransformSpec::Affine(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_by_default() {
        assert_eq!(TransformSpec::default().matrix(), Mat4::IDENTITY);
        assert_eq!(TransformSpec::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn zero_axis_angle_is_exactly_identity() {
        assert_eq!(RotationSpec::AxisAngle(Vec3::ZERO).matrix(), Mat3::IDENTITY);
    }

    #[test]
    fn axis_is_a_fixed_point_and_determinant_is_one() {
        let v = Vec3::new(0.3, -1.2, 0.8);
        let r = RotationSpec::AxisAngle(v).matrix();
        let axis = v.normalize();
        assert!((r * axis - axis).length() < EPS);
        assert!((r.determinant() - 1.0).abs() < EPS);
    }

    #[test]
    fn quarter_turn_around_z() {
        let r = RotationSpec::AxisAngle(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        let rotated = r.matrix() * Vec3::X;
        assert!((rotated - Vec3::Y).length() < EPS);
    }

    #[test]
    fn composition_scales_before_translating() {
        let spec = TransformSpec::trs(
            Some(Vec3::new(1.0, 0.0, 0.0)),
            RotationSpec::Identity,
            ScaleSpec::Uniform(2.0),
        );
        let p = spec.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn composition_rotates_after_scaling() {
        // Scale X by 3, then quarter-turn around Z: X ends up on +Y at length 3.
        let spec = TransformSpec::trs(
            None,
            RotationSpec::AxisAngle(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2)),
            ScaleSpec::PerAxis(Vec3::new(3.0, 1.0, 1.0)),
        );
        let p = spec.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 3.0, 0.0)).length() < EPS);
    }

    #[test]
    fn affine_embeds_into_identity_row() {
        let affine = Affine3A::from_mat3_translation(Mat3::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        let m = TransformSpec::from(affine).matrix();
        assert_eq!(m.w_axis.to_array(), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.x_axis.to_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn ready_made_matrix_passes_through() {
        let m = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(TransformSpec::from(m).matrix(), m);
    }
}
