use thiserror::Error;

/// Construction-time configuration errors.
///
/// Every precondition is validated once, when an animation is built;
/// stepping never produces an error.
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("path needs at least 2 coordinates, got {points}")]
    DegeneratePath { points: usize },

    #[error("dot spacing must be positive, got {spacing}")]
    InvalidSpacing { spacing: f64 },

    #[error("ring count must be at least 1")]
    InvalidRingCount,

    #[error("overshoot ratio must be in (0, 1], got {ratio}")]
    InvalidOvershootRatio { ratio: f64 },

    #[error("phase split fractions must be positive")]
    InvalidPhaseSplit,
}
