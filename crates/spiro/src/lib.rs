//! spiro-rs: surfaces grown over spirograph traces.
//!
//! A chain of rotating frames traces a dense 3D curve. The curve is trimmed
//! to a sparse set of points, neighbouring points are linked, and a triangle
//! mesh is grown over them from a seed triangle, one step at a time. The
//! result is exported as flat vertex arrays for any renderer.
//!
//! # Quick Start
//!
//! ```no_run
//! use spiro::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut scene = Scene::build(Preset::TwinLoop.config()?)?;
//!     scene.grow_until_finished(1_000)?;
//!
//!     let feed = scene.render_feed();
//!     println!("{} surface floats", feed.surface_floats().len());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! [`SpiroConfig`] holds the chain, the trace sampling and the surface
//! tunables, and round-trips through JSON:
//!
//! ```no_run
//! use spiro::*;
//!
//! fn main() -> Result<()> {
//!     let config = SpiroConfig::from_json_file("chain.json")?;
//!     let scene = Scene::build(config)?;
//!     println!("{:?}", scene.stats());
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod init;
mod presets;
mod scene;

pub use init::init_logging;
pub use presets::Preset;
pub use scene::{Scene, SceneStats};

// Re-export core types
pub use spiro_core::{
    adjacency::{Vertex, VertexArena, VertexId},
    chain::{Chain, FrameLink},
    error::{Result, SpiroError},
    mesh::{GrowthPhase, GrowthReport, Mesh, Triangle, TriangleId},
    options::{SearchStrategy, SpiroConfig, SurfaceOptions, TraceParams},
    render_feed::{
        PointVertex, RenderFeed, SurfaceVertex, LINE_COLOR, POINT_COLOR, SURFACE_COLOR,
    },
    trace::Trace,
    Mat3, Vec3,
};
