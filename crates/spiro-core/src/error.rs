//! Error types for spiro-rs.

use thiserror::Error;

/// The main error type for spiro-rs operations.
#[derive(Error, Debug)]
pub enum SpiroError {
    /// A chain must contain at least one link.
    #[error("chain has no links")]
    EmptyChain,

    /// A link's rotation axis has zero length, so its direction is undefined.
    #[error("link {link} has a zero-length rotation axis")]
    ZeroAxis { link: usize },

    /// A link's axis or arm length contains NaN or infinity.
    #[error("link {link} has a non-finite axis or arm length")]
    NonFiniteLink { link: usize },

    /// A tunable parameter is out of its valid range.
    #[error("invalid value for '{name}': {value}")]
    InvalidOption { name: &'static str, value: f32 },

    /// Too few points to run an operation.
    #[error("not enough points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    /// The point set does not define a usable seed triangle.
    #[error("degenerate seed: {0}")]
    DegenerateSeed(String),

    /// No vertex satisfied the selection rule for a seed corner.
    #[error("no candidate found for the {0} seed vertex")]
    SeedNotFound(&'static str),

    /// Growth was requested before the mesh was seeded.
    #[error("mesh has not been seeded")]
    NotSeeded,

    /// A preset with the given name does not exist.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for spiro-rs operations.
pub type Result<T> = std::result::Result<T, SpiroError>;
