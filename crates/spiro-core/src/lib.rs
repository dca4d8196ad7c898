//! Core algorithms for spiro-rs.
//!
//! The pipeline turns a chain of rotating frames into a triangle surface:
//! - [`Chain`] and [`Trace`] sample the tip of the chain over time
//! - [`trim_points`] reduces the dense trace to a sparse radius cover
//! - [`VertexArena`] links every pair of points within the adjacency radius
//! - [`Mesh`] seeds a triangle on the outside and grows it one step at a time
//! - [`RenderFeed`] flattens the result into vertex arrays for a renderer
//!
//! [`AxisTree`] and [`HitCounter`] are the spatial index behind the
//! [`SearchStrategy::Indexed`] strategy.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Point ids and counts are converted to f32 for averaging
#![allow(clippy::cast_precision_loss)]
// Accessors return Self-derived values which don't need must_use
#![allow(clippy::must_use_candidate)]
// Names like point_radius / adjacency_radius_multiplier are descriptive
#![allow(clippy::struct_field_names)]
#![allow(clippy::module_name_repetitions)]

pub mod adjacency;
pub mod axis;
pub mod chain;
pub mod error;
pub mod geometry;
pub mod hits;
pub mod mesh;
pub mod options;
pub mod render_feed;
pub mod spatial_index;
pub mod trace;
pub mod trim;

pub use adjacency::{Vertex, VertexArena, VertexId};
pub use axis::Axis;
pub use chain::{Chain, FrameLink};
pub use error::{Result, SpiroError};
pub use hits::HitCounter;
pub use mesh::{GrowthPhase, GrowthReport, Mesh, Triangle, TriangleId};
pub use options::{SearchStrategy, SpiroConfig, SurfaceOptions, TraceParams};
pub use render_feed::{PointVertex, RenderFeed, SurfaceVertex};
pub use spatial_index::AxisTree;
pub use trace::{Trace, TraceGenerator};
pub use trim::trim_points;

// Re-export glam types for convenience
pub use glam::{Mat3, Vec3};
