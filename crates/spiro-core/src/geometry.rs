//! Small geometric helpers on top of `glam`.

use glam::{Mat3, Vec3};

/// Cosine of the angle between two vectors.
///
/// Returns NaN if either vector has zero length; every comparison against
/// NaN is false, so callers treat such vectors as failing any angular filter.
#[must_use]
pub fn angle_cos(a: Vec3, b: Vec3) -> f32 {
    a.dot(b) / (a.length() * b.length())
}

/// Builds a rotation matrix from an axis-angle vector using Rodrigues' formula.
///
/// The direction of `axis_angle` is the rotation axis and its length is the
/// rotation angle in radians: `R = I + K sin(θ) + K² (1 - cos(θ))`, where `K`
/// is the cross-product matrix of the normalized axis.
///
/// A zero vector yields the identity.
#[must_use]
pub fn rotation_matrix(axis_angle: Vec3) -> Mat3 {
    let theta = axis_angle.length();
    if theta == 0.0 {
        return Mat3::IDENTITY;
    }
    let k = axis_angle / theta;

    // Column-major form of the rows (0, -kz, ky), (kz, 0, -kx), (-ky, kx, 0).
    let cross = Mat3::from_cols(
        Vec3::new(0.0, k.z, -k.y),
        Vec3::new(-k.z, 0.0, k.x),
        Vec3::new(k.y, -k.x, 0.0),
    );

    Mat3::IDENTITY + cross * theta.sin() + (cross * cross) * (1.0 - theta.cos())
}

/// Arithmetic mean of a point set, or `None` if it is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut sum = Vec3::ZERO;
    let mut count = 0_usize;
    for p in points {
        sum += p;
        count += 1;
    }
    (count > 0).then(|| sum * (1.0 / count as f32))
}

/// Axis-aligned bounding box of a point set, or `None` if it is empty.
#[must_use]
pub fn bounding_box(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_quarter_turn_about_z() {
        let r = rotation_matrix(Vec3::Z * FRAC_PI_2);
        let rotated = r * Vec3::X;
        assert!((rotated - Vec3::Y).length() < 1e-6, "got {rotated:?}");
    }

    #[test]
    fn test_rotation_matches_glam_axis_angle() {
        let axis_angle = Vec3::new(0.3, -1.2, 0.7);
        let ours = rotation_matrix(axis_angle);
        let reference = Mat3::from_axis_angle(axis_angle.normalize(), axis_angle.length());
        for v in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 2.0, 3.0)] {
            assert!(((ours * v) - (reference * v)).length() < 1e-5);
        }
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert_eq!(rotation_matrix(Vec3::ZERO), Mat3::IDENTITY);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let r = rotation_matrix(Vec3::new(0.0, 0.01, 0.0) * 1234.5);
        let v = Vec3::new(2.0, -1.0, 0.5);
        assert!(((r * v).length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_angle_cos() {
        assert!((angle_cos(Vec3::X, Vec3::X * 5.0) - 1.0).abs() < 1e-6);
        assert!(angle_cos(Vec3::X, Vec3::Y).abs() < 1e-6);
        assert!(angle_cos(Vec3::ZERO, Vec3::Y).is_nan());
    }

    #[test]
    fn test_centroid_and_bounds() {
        let points = [Vec3::ZERO, Vec3::new(2.0, 4.0, -2.0)];
        assert_eq!(centroid(points), Some(Vec3::new(1.0, 2.0, -1.0)));
        assert_eq!(centroid(std::iter::empty()), None);
        assert_eq!(
            bounding_box(&points),
            Some((Vec3::new(0.0, 0.0, -2.0), Vec3::new(2.0, 4.0, 0.0)))
        );
        assert_eq!(bounding_box(&[]), None);
    }
}
