//! Error types surfaced by configuration and generation.

use thiserror::Error;

/// Reasons a generator configuration is rejected before any carving starts.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A grid axis has an even extent, which breaks the offset-2 cell lattice.
    #[error("{axis} must be odd, got {value}")]
    EvenDimension {
        /// Name of the offending axis.
        axis: &'static str,
        /// Rejected extent.
        value: u32,
    },
    /// A grid axis is too small to hold a border and a single corridor.
    #[error("{axis} must be at least {min}, got {value}", min = crate::MIN_DIMENSION)]
    DimensionTooSmall {
        /// Name of the offending axis.
        axis: &'static str,
        /// Rejected extent.
        value: u32,
    },
    /// A grid axis exceeds the supported extent.
    #[error("{axis} must be at most {max}, got {value}", max = crate::MAX_DIMENSION)]
    DimensionTooLarge {
        /// Name of the offending axis.
        axis: &'static str,
        /// Rejected extent.
        value: u32,
    },
    /// A probability or density knob lies outside `[0, 1]`.
    #[error("{name} must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending knob.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The branch length range is empty or starts at zero.
    #[error("branch lengths must satisfy 1 <= min < max, got min {min} and max {max}")]
    InvalidBranchLengths {
        /// Configured minimum length.
        min: usize,
        /// Configured exclusive maximum length.
        max: usize,
    },
    /// Sampled goal placement was configured with zero samples.
    #[error("goal sampling requires at least one sample")]
    ZeroGoalSamples,
    /// The retry ceiling is zero, so no attempt would ever run.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    /// A difficulty name did not match any preset.
    #[error("unknown difficulty `{0}`, expected easy, medium, hard or extreme")]
    UnknownDifficulty(String),
}

/// Failures reported by the generation pipeline.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    /// The requested dimensions or tuning were rejected.
    #[error("invalid generator configuration: {0}")]
    Config(#[from] ConfigError),
    /// Every attempt produced a maze whose goal was unreachable from the start.
    #[error("no solvable maze produced after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}
