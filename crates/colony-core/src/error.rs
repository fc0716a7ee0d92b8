//! Error types for colony-core

use thiserror::Error;

/// Result type for colony operations
pub type Result<T> = std::result::Result<T, ColonyError>;

/// Errors surfaced by the colony core.
///
/// None of these are fatal: day advancement never returns one. They come
/// back from construction, configuration, and invariant-guarded setters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColonyError {
    /// A production rate assignment was negative (or not a number)
    #[error("production rate cannot be negative (got {0})")]
    NegativeProductionRate(f32),

    /// Not enough Materials in stock to pay for construction
    #[error("Not enough materials. Need {needed}, have {available}.")]
    InsufficientMaterials { needed: f32, available: f32 },

    /// Building size outside 1..=MAX_BUILDING_SIZE
    #[error("building size must be between 1 and {}", crate::components::MAX_BUILDING_SIZE)]
    InvalidSize,

    /// Configuration failed validation
    #[error("invalid colony config: {0}")]
    InvalidConfig(String),
}
