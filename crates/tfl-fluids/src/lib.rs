//! tfl-fluids: table-backed real-fluid properties.
//!
//! Provides:
//! - Property tables on a (density, energy offset) grid with a saturation curve
//! - Bilinear interpolation and a secant root finder
//! - Direct, single-inversion and double-inversion property evaluators
//! - A stateful [`TableFluid`] model behind the [`FluidModel`] trait
//! - Parallel sweeps and unit-tagged input parsing
//!
//! # Architecture
//!
//! A [`PropertyTable`] is built once and shared through an `Arc`. A
//! [`TableEos`] evaluates properties over it without holding any state, and a
//! [`TableFluid`] wraps one evaluator plus the current [`FluidState`]. Every
//! state update is a composition of table lookups and secant solves; none of
//! them fail, so callers check [`FluidModel::last_solve`] and
//! [`FluidState::check_physical`] before trusting a result.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tfl_fluids::{IdealGasTable, TableFluid, TableFluidConfig};
//!
//! let table = IdealGasTable::default().build().unwrap();
//! let mut fluid = TableFluid::new(Arc::new(table), TableFluidConfig::default());
//!
//! fluid.set_state_pt(3.0e5, 350.0);
//! assert!(fluid.last_solve().converged);
//! println!("Density: {} kg/m³", fluid.state().density);
//! ```

pub mod config;
pub mod eos;
pub mod error;
pub mod interp;
pub mod model;
pub mod saturation;
pub mod secant;
pub mod state;
pub mod sweep_executor;
pub mod sweeps;
pub mod synthetic;
pub mod table;
pub mod table_fluid;
pub mod units;

// Re-exports for ergonomics
pub use config::TableFluidConfig;
pub use eos::TableEos;
pub use error::{FluidError, FluidResult};
pub use interp::bilinear;
pub use model::{CostTier, FluidModel, SolveReport};
pub use saturation::SaturationCurve;
pub use secant::{SecantConfig, SecantSolution, secant};
pub use state::{FluidState, InputKind, InputPair, StateInput};
pub use sweep_executor::{SweepResult, Swept, check_sweep, execute_sweep};
pub use sweeps::{SweepDefinition, SweepType};
pub use synthetic::IdealGasTable;
pub use table::{Axis, Property, PropertyTable, TableData};
pub use table_fluid::TableFluid;
pub use units::{UnitError, parse_quantity};
