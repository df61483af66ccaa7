//! Fluid table errors.

use tfl_core::TfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised while assembling a table model or checking its output.
///
/// State evaluation itself never fails; these cover construction-time shape
/// checks and the optional physical checks a caller can run afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Table axes or metadata are unusable.
    #[error("Invalid table: {what}")]
    InvalidTable { what: &'static str },

    /// A tabulated field does not have `nx * ny` entries.
    #[error("Field '{field}' has {found} values, expected {expected}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Too many sweep points failed to converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: String },
}

impl From<FluidError> for TfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::InvalidTable { .. } | FluidError::FieldLength { .. } => {
                TfError::InvalidArg {
                    what: err.to_string(),
                }
            }
            FluidError::NonPhysical { .. } | FluidError::ConvergenceFailed { .. } => {
                TfError::Invariant {
                    what: err.to_string(),
                }
            }
            FluidError::InvalidArg { what } => TfError::InvalidArg { what },
        }
    }
}
