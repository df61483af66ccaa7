//! Sweep execution: evaluate a table model across one swept input.
//!
//! Points are independent, so they run in parallel. Each rayon worker gets its
//! own clone of the model; clones share the table and own their state record.

use crate::error::{FluidError, FluidResult};
use crate::model::{FluidModel, SolveReport};
use crate::state::{FluidState, InputPair};
use crate::sweeps::SweepDefinition;
use crate::table_fluid::TableFluid;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Which input of the pair is swept; the other one is held fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Swept {
    #[default]
    First,
    Second,
}

/// Result of a sweep, one entry per generated point.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepResult {
    pub input_pair: InputPair,
    pub swept: Swept,
    /// Value of the fixed input (SI)
    pub fixed_value: f64,
    /// Swept input values (SI)
    pub independent_values: Vec<f64>,
    pub states: Vec<FluidState>,
    pub reports: Vec<SolveReport>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn num_unconverged(&self) -> usize {
        self.reports.iter().filter(|r| !r.converged).count()
    }

    /// Number of states that fail [`FluidState::check_physical`].
    pub fn num_non_physical(&self) -> usize {
        self.states
            .iter()
            .filter(|s| s.check_physical().is_err())
            .count()
    }

    pub fn pressure(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.pressure).collect()
    }

    pub fn temperature(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.temperature).collect()
    }

    pub fn density(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.density).collect()
    }

    pub fn static_energy(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.static_energy).collect()
    }
}

/// Evaluate `fluid` at every point of `sweep`, holding the other input at `fixed`.
///
/// `fluid` itself is not modified. Unconverged points stay in the result and
/// are counted; use [`check_sweep`] to turn too many of them into an error.
pub fn execute_sweep(
    fluid: &TableFluid,
    input_pair: InputPair,
    swept: Swept,
    sweep: &SweepDefinition,
    fixed: f64,
) -> FluidResult<SweepResult> {
    if !fixed.is_finite() {
        return Err(FluidError::InvalidArg {
            what: format!("fixed {input_pair} input must be finite"),
        });
    }

    let values = sweep.generate_points();
    let (states, reports): (Vec<FluidState>, Vec<SolveReport>) = values
        .par_iter()
        .map_init(
            || fluid.clone(),
            |model, &value| {
                let input = match swept {
                    Swept::First => input_pair.input(value, fixed),
                    Swept::Second => input_pair.input(fixed, value),
                };
                model.set_state(input);
                (*model.state(), model.last_solve())
            },
        )
        .unzip();

    let result = SweepResult {
        input_pair,
        swept,
        fixed_value: fixed,
        independent_values: values,
        states,
        reports,
    };
    debug!(
        pair = %input_pair,
        points = result.len(),
        unconverged = result.num_unconverged(),
        "sweep finished"
    );
    Ok(result)
}

/// Fail when more than `max_failed_fraction` of the points did not converge.
pub fn check_sweep(result: &SweepResult, max_failed_fraction: f64) -> FluidResult<()> {
    let failed = result.num_unconverged();
    if failed == 0 {
        return Ok(());
    }
    warn!(
        pair = %result.input_pair,
        failed,
        points = result.len(),
        "sweep has unconverged points"
    );
    if failed as f64 > max_failed_fraction * result.len() as f64 {
        return Err(FluidError::ConvergenceFailed {
            what: format!(
                "{} sweep ({} of {} points unconverged)",
                result.input_pair,
                failed,
                result.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableFluidConfig;
    use crate::secant::SecantConfig;
    use crate::sweeps::SweepType;
    use crate::synthetic::IdealGasTable;
    use std::sync::Arc;

    fn fluid(config: TableFluidConfig) -> TableFluid {
        let table = IdealGasTable::default().build().unwrap();
        TableFluid::new(Arc::new(table), config)
    }

    #[test]
    fn temperature_sweep_at_fixed_pressure() {
        let model = fluid(TableFluidConfig::default());
        let sweep = SweepDefinition::new(250.0, 600.0, 8, SweepType::Linear).unwrap();
        let result = execute_sweep(&model, InputPair::PT, Swept::Second, &sweep, 3.0e5).unwrap();

        assert_eq!(result.len(), 8);
        assert_eq!(result.num_unconverged(), 0);
        for (p, (t, want)) in result
            .pressure()
            .iter()
            .zip(result.temperature().iter().zip(&result.independent_values))
        {
            assert!((p - 3.0e5).abs() < 1e-3);
            assert!((t - want).abs() < 1e-6);
        }
        assert!(check_sweep(&result, 0.0).is_ok());
    }

    #[test]
    fn sweep_leaves_the_source_model_untouched() {
        let model = fluid(TableFluidConfig::default());
        let sweep = SweepDefinition::new(1.0, 8.0, 4, SweepType::Logarithmic).unwrap();
        let result = execute_sweep(&model, InputPair::RhoE, Swept::First, &sweep, 2.0e5).unwrap();
        assert_eq!(result.density(), sweep.generate_points());
        assert_eq!(*model.state(), FluidState::default());
    }

    #[test]
    fn unconverged_points_are_counted() {
        let config = TableFluidConfig {
            solver: SecantConfig {
                max_iterations: 1,
                ..SecantConfig::default()
            },
            ..TableFluidConfig::default()
        };
        let model = fluid(config);
        let sweep = SweepDefinition::new(250.0, 600.0, 4, SweepType::Linear).unwrap();
        let result = execute_sweep(&model, InputPair::PT, Swept::Second, &sweep, 3.0e5).unwrap();

        assert_eq!(result.num_unconverged(), 4);
        assert!(matches!(
            check_sweep(&result, 0.5),
            Err(FluidError::ConvergenceFailed { .. })
        ));
    }

    #[test]
    fn non_finite_fixed_value_is_rejected() {
        let model = fluid(TableFluidConfig::default());
        let sweep = SweepDefinition::new(1.0, 2.0, 2, SweepType::Linear).unwrap();
        assert!(execute_sweep(&model, InputPair::PRho, Swept::Second, &sweep, f64::NAN).is_err());
    }
}
