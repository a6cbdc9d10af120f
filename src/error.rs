//! Configuration errors raised before a projection produces any output

use thiserror::Error;

/// Errors that reject a projection run at entry.
///
/// The engine validates once and either returns a complete year series or
/// fails with one of these before computing anything. Domain edge conditions
/// (zero income, over-withdrawal, exhausted NOL) are clamped values in the
/// results, never errors.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Strategy identifier not present in the catalog
    #[error("unknown strategy: {0:?}")]
    UnknownStrategy(String),

    /// Projection length must be at least one year
    #[error("invalid projection horizon: {0} years")]
    InvalidHorizon(u32),

    /// An assumption value outside its valid range
    #[error("invalid assumption {field}: {value}")]
    InvalidAssumption {
        field: &'static str,
        value: f64,
    },

    /// A client profile value outside its valid range
    #[error("invalid profile field {field}: {value}")]
    InvalidProfile {
        field: &'static str,
        value: f64,
    },

    /// Two overrides supplied for the same projection year
    #[error("duplicate override for year {0}")]
    DuplicateOverride(u32),
}
