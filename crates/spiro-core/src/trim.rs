//! Reducing a dense trace to a sparse covering point set.
//!
//! Trimming is a single-pass greedy cover. The first point not yet absorbed
//! becomes a reference and is kept; every remaining point within `radius` of
//! it (the reference included) is absorbed in one sweep. This repeats until
//! at most `residual_threshold` points are left.
//!
//! Every absorbed point therefore lies within `radius` of a kept point. No
//! spacing is promised between kept points beyond what the sweep order gives.

use glam::Vec3;

use crate::axis::Axis;
use crate::hits::HitCounter;
use crate::options::SearchStrategy;
use crate::spatial_index::AxisTree;

/// Relative padding added to the query box so that rounding in the box bounds
/// never excludes a point that passes the distance test.
const BOX_PADDING: f32 = 1e-3;

/// Initial room in the hit counter for one box query.
const QUERY_CAPACITY: usize = 64;

/// Trims `points` with the given strategy.
///
/// Both strategies select references in trace order and absorb with the same
/// distance test, so they return identical results. A negative or NaN
/// `radius` absorbs nothing and yields an empty result.
#[must_use]
pub fn trim_points(
    points: &[Vec3],
    radius: f32,
    residual_threshold: usize,
    strategy: SearchStrategy,
) -> Vec<Vec3> {
    let trimmed = match strategy {
        SearchStrategy::Linear => trim_linear(points, radius, residual_threshold),
        SearchStrategy::Indexed => trim_indexed(points, radius, residual_threshold),
    };
    log::info!(
        "trimmed {} points to {} (radius {radius}, {strategy:?})",
        points.len(),
        trimmed.len()
    );
    trimmed
}

/// Rescans every remaining point for each reference.
#[must_use]
pub fn trim_linear(points: &[Vec3], radius: f32, residual_threshold: usize) -> Vec<Vec3> {
    if !valid_radius(radius) {
        return Vec::new();
    }
    let mut alive: Vec<usize> = (0..points.len()).collect();
    let mut trimmed = Vec::new();

    while alive.len() > residual_threshold {
        let reference = points[alive[0]];
        trimmed.push(reference);
        alive.retain(|&i| !absorbs(reference, points[i], radius));
    }
    trimmed
}

/// Narrows each sweep to the reference's bounding box using per-axis trees.
#[must_use]
pub fn trim_indexed(points: &[Vec3], radius: f32, residual_threshold: usize) -> Vec<Vec3> {
    if !valid_radius(radius) {
        return Vec::new();
    }
    let mut trees = Axis::ALL.map(|axis| AxisTree::new(points, axis));
    log::debug!(
        "axis trees built, heights {:?}",
        trees.iter().map(AxisTree::height).collect::<Vec<_>>()
    );
    let mut counter = HitCounter::with_capacity(3, QUERY_CAPACITY);
    let mut alive = vec![true; points.len()];
    let mut remaining = points.len();
    let mut cursor = 0;
    let reach = radius * (1.0 + BOX_PADDING);
    let mut trimmed = Vec::new();

    while remaining > residual_threshold {
        while !alive[cursor] {
            cursor += 1;
        }
        let reference = points[cursor];
        trimmed.push(reference);

        counter.clear();
        for tree in &trees {
            let key = tree.axis().key(reference);
            tree.range(key - reach, key + reach, |id| counter.add(id));
        }

        for &id in counter.hits() {
            if absorbs(reference, points[id], radius) {
                for tree in &mut trees {
                    tree.remove(id);
                }
                alive[id] = false;
                remaining -= 1;
            }
        }
    }
    trimmed
}

fn valid_radius(radius: f32) -> bool {
    if radius >= 0.0 {
        true
    } else {
        log::warn!("ignoring trim with radius {radius}");
        false
    }
}

fn absorbs(reference: Vec3, point: Vec3, radius: f32) -> bool {
    reference.distance(point) <= radius
}
