//! Fluid model trait, solve bookkeeping, and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::state::{FluidState, InputPair, StateInput};
use std::fmt;

/// Relative cost of a state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostTier {
    /// Table lookups only.
    #[default]
    Direct,
    /// One secant solve for energy.
    SingleInversion,
    /// A secant solve for density wrapped around energy solves.
    DoubleInversion,
}

impl CostTier {
    pub fn for_pair(pair: InputPair) -> Self {
        match pair {
            InputPair::RhoE => Self::Direct,
            InputPair::PRho | InputPair::RhoT | InputPair::RhoH => Self::SingleInversion,
            InputPair::PT | InputPair::PS | InputPair::HS => Self::DoubleInversion,
        }
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::SingleInversion => write!(f, "single inversion"),
            Self::DoubleInversion => write!(f, "double inversion"),
        }
    }
}

/// Convergence record of the most recent state update.
///
/// `iterations` counts the secant updates of the top-level solves the setter
/// ran; updates inside nested energy solves are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    pub tier: CostTier,
    pub converged: bool,
    pub iterations: usize,
}

impl SolveReport {
    pub const DIRECT: Self = Self {
        tier: CostTier::Direct,
        converged: true,
        iterations: 0,
    };
}

/// Trait for models that hold one current thermodynamic state.
///
/// State updates never fail; inspect [`FluidModel::last_solve`] and
/// [`FluidState::check_physical`] to decide whether to trust the result.
pub trait FluidModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Current state record.
    fn state(&self) -> &FluidState;

    /// Update the full state from any supported input pair.
    fn set_state(&mut self, input: StateInput);

    /// Update only the static energy from pressure and density.
    fn set_energy_prho(&mut self, p: f64, rho: f64);

    /// Convergence record of the last update.
    fn last_solve(&self) -> SolveReport;
}

/// Validation helpers for state records.
pub(crate) mod validation {
    use super::*;

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: f64) -> FluidResult<()> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: f64) -> FluidResult<()> {
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: f64) -> FluidResult<()> {
        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure the squared speed of sound is non-negative and finite.
    pub fn validate_sound_speed2(a2: f64) -> FluidResult<()> {
        if !a2.is_finite() || a2 < 0.0 {
            return Err(FluidError::NonPhysical {
                what: "speed of sound squared must be non-negative and finite",
            });
        }
        Ok(())
    }

    pub fn validate_heat_capacity(c: f64, what: &'static str) -> FluidResult<()> {
        if !c.is_finite() || c <= 0.0 {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }
}
