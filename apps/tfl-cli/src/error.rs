//! Error type for the command-line front end.

use tfl_core::TfError;
use tfl_fluids::{FluidError, UnitError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TfError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
