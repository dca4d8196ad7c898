//! Configuration options for trace generation and surface reconstruction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::error::{Result, SpiroError};

/// Sampling parameters for the parametric trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Number of samples to generate.
    pub steps: usize,

    /// Time advanced between consecutive samples.
    pub step_delta: f32,

    /// Time of the first sample.
    pub start_time: f32,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            steps: 20_000,
            step_delta: 0.1,
            start_time: 0.001,
        }
    }
}

impl TraceParams {
    /// Checks that the parameters describe a non-empty, finite sampling.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(SpiroError::InvalidOption {
                name: "steps",
                value: 0.0,
            });
        }
        check_finite("step_delta", self.step_delta)?;
        check_finite("start_time", self.start_time)
    }
}

/// How proximity queries are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SearchStrategy {
    /// Scan every candidate point.
    #[default]
    Linear,
    /// Use per-axis search trees to narrow the candidates first.
    Indexed,
}

/// Tunables for trimming, adjacency and mesh growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Radius absorbed by each retained point when trimming the trace.
    pub point_radius: f32,

    /// Neighbourhood radius as a multiple of `point_radius`.
    pub adjacency_radius_multiplier: f32,

    /// Maximum angle (degrees) between a growth direction and an edge's outward normal.
    pub angle_deviation_degrees: f32,

    /// Search distance for the second seed vertex, as a multiple of `point_radius`.
    pub seed_reach_multiplier: f32,

    /// Upper bound on the distance from an edge midpoint to a new vertex,
    /// as a multiple of `point_radius`.
    pub candidate_reach_multiplier: f32,

    /// Trimming stops once this many unabsorbed points remain (0 = drain).
    pub residual_threshold: usize,

    /// Search strategy used while trimming.
    pub trim_search: SearchStrategy,

    /// Search strategy used while building adjacency.
    pub adjacency_search: SearchStrategy,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            point_radius: 0.09,
            adjacency_radius_multiplier: 3.5,
            angle_deviation_degrees: 45.0,
            seed_reach_multiplier: 3.0,
            candidate_reach_multiplier: 10.0,
            residual_threshold: 0,
            trim_search: SearchStrategy::Linear,
            adjacency_search: SearchStrategy::Linear,
        }
    }
}

impl SurfaceOptions {
    /// Neighbourhood radius used by the adjacency builder.
    #[must_use]
    pub fn adjacency_radius(&self) -> f32 {
        self.point_radius * self.adjacency_radius_multiplier
    }

    /// Cosine threshold a growth direction must exceed.
    #[must_use]
    pub fn min_direction_cos(&self) -> f32 {
        self.angle_deviation_degrees.to_radians().cos()
    }

    /// Checks ranges of every tunable.
    pub fn validate(&self) -> Result<()> {
        check_positive("point_radius", self.point_radius)?;
        check_positive(
            "adjacency_radius_multiplier",
            self.adjacency_radius_multiplier,
        )?;
        check_positive("seed_reach_multiplier", self.seed_reach_multiplier)?;
        check_positive(
            "candidate_reach_multiplier",
            self.candidate_reach_multiplier,
        )?;
        let angle = self.angle_deviation_degrees;
        if !(angle > 0.0 && angle <= 180.0) {
            return Err(SpiroError::InvalidOption {
                name: "angle_deviation_degrees",
                value: angle,
            });
        }
        Ok(())
    }
}

/// Everything needed to build a scene: chain, sampling and surface tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiroConfig {
    /// The chain definition.
    pub chain: Chain,

    /// Trace sampling.
    #[serde(default)]
    pub trace: TraceParams,

    /// Surface reconstruction tunables.
    #[serde(default)]
    pub surface: SurfaceOptions,
}

impl SpiroConfig {
    /// Creates a configuration with default sampling and surface options.
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            trace: TraceParams::default(),
            surface: SurfaceOptions::default(),
        }
    }

    /// Validates the sampling and surface options (the chain validates itself).
    pub fn validate(&self) -> Result<()> {
        self.trace.validate()?;
        self.surface.validate()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpiroError::InvalidOption { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpiroError::InvalidOption { name, value })
    }
}
