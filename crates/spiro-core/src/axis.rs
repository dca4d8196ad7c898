//! Per-axis ordering of points.

use std::cmp::Ordering;

use glam::Vec3;

/// A coordinate axis used as a sort and search key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The coordinate of `v` along this axis.
    #[must_use]
    pub fn key(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Compares two points by their coordinate along this axis.
    #[must_use]
    pub fn compare(self, a: Vec3, b: Vec3) -> Ordering {
        compare_keys(self.key(a), self.key(b))
    }

    /// Sorts point ids by this axis. Equal keys keep their relative order.
    pub fn sort_ids(self, ids: &mut [usize], points: &[Vec3]) {
        ids.sort_by(|&a, &b| self.compare(points[a], points[b]));
    }
}

/// Three-way comparison of two keys using exact equality.
///
/// Two keys compare equal only if they are bit-for-bit the same value (or
/// `0.0` and `-0.0`). No epsilon is applied, which keeps orderings reproducible.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compare_keys(a: f32, b: f32) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.key(v), 1.0);
        assert_eq!(Axis::Y.key(v), 2.0);
        assert_eq!(Axis::Z.key(v), 3.0);
    }

    #[test]
    fn test_compare_exact() {
        assert_eq!(compare_keys(1.0, 1.0), Ordering::Equal);
        assert_eq!(compare_keys(1.0, 1.0 + f32::EPSILON), Ordering::Less);
        assert_eq!(compare_keys(2.0, 1.0), Ordering::Greater);
        assert_eq!(compare_keys(0.0, -0.0), Ordering::Equal);
    }

    #[test]
    fn test_sort_ids_is_stable() {
        let points = [
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 5.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(1.0, 4.0, 0.0),
        ];
        let mut ids = vec![0, 1, 2, 3];
        Axis::X.sort_ids(&mut ids, &points);
        assert_eq!(ids, vec![1, 3, 0, 2]);

        Axis::Y.sort_ids(&mut ids, &points);
        assert_eq!(ids, vec![0, 2, 3, 1]);
    }
}
