//! Named chains that produce interesting surfaces.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use spiro_core::{
    Chain, FrameLink, Result, SearchStrategy, SpiroConfig, SpiroError, SurfaceOptions,
    TraceParams,
};

/// A ready-made chain with sampling and surface settings tuned for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Two unit arms: a fast loop about Z slowly swept about Y.
    TwinLoop,
    /// A single 1.5 arm swept about Z and Y, tracing a sphere.
    Sphere,
    /// Four half-length arms on skewed axes.
    FourLink,
    /// Five arms, three long and two short.
    FiveLink,
    /// Four arms with slow outer rotations, tracing a knotted tube.
    Knot,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::TwinLoop,
        Preset::Sphere,
        Preset::FourLink,
        Preset::FiveLink,
        Preset::Knot,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::TwinLoop => "twin-loop",
            Preset::Sphere => "sphere",
            Preset::FourLink => "four-link",
            Preset::FiveLink => "five-link",
            Preset::Knot => "knot",
        }
    }

    /// The chain links, innermost first.
    #[must_use]
    pub fn links(self) -> Vec<FrameLink> {
        let link = |x, y, z, length| FrameLink::new(Vec3::new(x, y, z), length);
        match self {
            Preset::TwinLoop => vec![link(0.0, 0.01, 0.0, 1.0), link(0.0, 0.0, 1.0, 1.0)],
            Preset::Sphere => vec![link(0.0, 0.01, 0.0, 0.0), link(0.0, 0.0, 1.0, 1.5)],
            Preset::FourLink => vec![
                link(1.0, 0.0, 0.0, 0.5),
                link(1.0, 1.0, 0.0, 0.5),
                link(0.0, 1.0, 1.0, 0.5),
                link(0.0, -1.0, 1.0, 0.5),
            ],
            Preset::FiveLink => vec![
                link(0.2, 0.0, 0.0, 1.0),
                link(0.0, -0.3, 0.0, 1.0),
                link(-0.1, 0.0, 0.0, 1.0),
                link(0.0, 0.3, 0.0, 0.2),
                link(0.0, 0.0117, 0.0, 0.2),
            ],
            Preset::Knot => vec![
                link(0.1, 0.0, 0.0, 1.0),
                link(0.0, -0.1, 0.0, 1.0),
                link(-0.1, 0.0, 0.0, 1.0),
                link(0.0, 0.117, 0.0, 0.2),
            ],
        }
    }

    /// Full configuration for this preset.
    pub fn config(self) -> Result<SpiroConfig> {
        let (steps, point_radius) = match self {
            Preset::TwinLoop | Preset::Sphere => (20_000, 0.09),
            Preset::FourLink => (10_000, 0.05),
            Preset::FiveLink | Preset::Knot => (50_000, 0.09),
        };
        Ok(SpiroConfig {
            chain: Chain::new(self.links())?,
            trace: TraceParams {
                steps,
                ..TraceParams::default()
            },
            surface: SurfaceOptions {
                point_radius,
                trim_search: SearchStrategy::Indexed,
                adjacency_search: SearchStrategy::Indexed,
                ..SurfaceOptions::default()
            },
        })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SpiroError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| SpiroError::UnknownPreset(s.to_string()))
    }
}
