//! Dense point traces sampled from a [`Chain`].

use glam::Vec3;

use crate::chain::Chain;
use crate::geometry::bounding_box;
use crate::options::TraceParams;

/// Lazily samples a chain at evenly spaced times.
///
/// Time is accumulated by repeated addition, so a generator that is resumed
/// produces exactly the same samples as one that runs in a single pass.
#[derive(Debug, Clone)]
pub struct TraceGenerator<'a> {
    chain: &'a Chain,
    time: f32,
    step_delta: f32,
    remaining: usize,
    last_time: Option<f32>,
}

impl<'a> TraceGenerator<'a> {
    /// Creates a generator producing `params.steps` samples.
    pub fn new(chain: &'a Chain, params: &TraceParams) -> Self {
        Self {
            chain,
            time: params.start_time,
            step_delta: params.step_delta,
            remaining: params.steps,
            last_time: None,
        }
    }

    /// Time of the next sample.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Time of the most recent sample, if any has been taken.
    #[must_use]
    pub fn last_time(&self) -> Option<f32> {
        self.last_time
    }
}

impl Iterator for TraceGenerator<'_> {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let point = self.chain.sample(self.time);
        self.last_time = Some(self.time);
        self.time += self.step_delta;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TraceGenerator<'_> {}

/// An ordered, append-only sequence of chain samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    points: Vec<Vec3>,
    end_time: f32,
    last_time: Option<f32>,
}

impl Trace {
    /// Samples `params.steps` points from `chain`.
    pub fn generate(chain: &Chain, params: &TraceParams) -> Self {
        let mut generator = TraceGenerator::new(chain, params);
        let mut points = Vec::with_capacity(generator.len());
        points.extend(generator.by_ref());
        log::debug!(
            "generated trace: {} samples over t = {}..{}",
            points.len(),
            params.start_time,
            generator.time()
        );
        Self {
            points,
            end_time: generator.time(),
            last_time: generator.last_time(),
        }
    }

    /// Appends `count` more samples, continuing from where the trace stopped.
    pub fn extend(&mut self, chain: &Chain, count: usize, step_delta: f32) {
        let params = TraceParams {
            steps: count,
            step_delta,
            start_time: self.end_time,
        };
        let mut generator = TraceGenerator::new(chain, &params);
        self.points.extend(generator.by_ref());
        self.end_time = generator.time();
        self.last_time = generator.last_time().or(self.last_time);
    }

    /// Returns the samples in order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the trace has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time at which the next sample would be taken.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    /// Time of the final sample, or `None` for an empty trace.
    #[must_use]
    pub fn last_time(&self) -> Option<f32> {
        self.last_time
    }

    /// Axis-aligned bounding box of the samples.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        bounding_box(&self.points)
    }
}
