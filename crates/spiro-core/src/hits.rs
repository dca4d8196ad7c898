//! Counting how many queries reported each point.
//!
//! Intersecting three per-axis slab queries gives the points inside an
//! axis-aligned box: a point is in the box exactly when all three slabs
//! report it.

use std::collections::HashMap;

/// Hash-based counter that records ids as soon as they reach a required count.
#[derive(Debug, Clone)]
pub struct HitCounter {
    required: u32,
    counts: HashMap<usize, u32>,
    hits: Vec<usize>,
}

impl HitCounter {
    /// Creates a counter that reports ids seen `required` times.
    pub fn new(required: u32) -> Self {
        Self {
            required,
            counts: HashMap::new(),
            hits: Vec::new(),
        }
    }

    /// Creates a counter with room for `capacity` distinct ids.
    pub fn with_capacity(required: u32, capacity: usize) -> Self {
        Self {
            required,
            counts: HashMap::with_capacity(capacity),
            hits: Vec::with_capacity(capacity),
        }
    }

    /// Records one sighting of `id`.
    pub fn add(&mut self, id: usize) {
        let count = self.counts.entry(id).or_insert(0);
        *count += 1;
        if *count == self.required {
            self.hits.push(id);
        }
    }

    /// Ids that reached the required count, in the order they reached it.
    #[must_use]
    pub fn hits(&self) -> &[usize] {
        &self.hits
    }

    /// Forgets every count, keeping allocations.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.hits.clear();
    }
}
