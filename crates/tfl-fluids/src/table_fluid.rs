//! Table-backed fluid model with a single mutable state record.

use crate::config::TableFluidConfig;
use crate::eos::TableEos;
use crate::model::{CostTier, FluidModel, SolveReport};
use crate::secant::SecantSolution;
use crate::state::{FluidState, InputPair, StateInput};
use crate::table::PropertyTable;
use std::sync::Arc;
use tfl_core::timing::{self, Timer, eval_timing};
use tracing::debug;

/// Real-fluid model evaluated from a shared lookup table.
///
/// Each instance owns one [`FluidState`]; the table is shared. Clone the
/// model to get an independent state record over the same table.
#[derive(Debug, Clone)]
pub struct TableFluid {
    eos: TableEos,
    compute_entropy: bool,
    state: FluidState,
    last_solve: SolveReport,
}

impl TableFluid {
    pub fn new(table: Arc<PropertyTable>, config: TableFluidConfig) -> Self {
        Self {
            eos: TableEos::new(table, config.solver),
            compute_entropy: config.compute_entropy,
            state: FluidState::default(),
            last_solve: SolveReport::default(),
        }
    }

    pub fn eos(&self) -> &TableEos {
        &self.eos
    }

    pub fn computes_entropy(&self) -> bool {
        self.compute_entropy
    }

    pub fn state(&self) -> &FluidState {
        &self.state
    }

    pub fn last_solve(&self) -> SolveReport {
        self.last_solve
    }

    /// Fill the whole record from table lookups at `(rho, e)`.
    fn write_state(&mut self, rho: f64, e: f64) {
        let eos = &self.eos;
        self.state = FluidState {
            density: rho,
            static_energy: e,
            pressure: eos.pressure(rho, e),
            temperature: eos.temperature(rho, e),
            sound_speed2: eos.sound_speed2(rho, e),
            dpdrho_e: eos.dpdrho_e(rho, e),
            dpde_rho: eos.dpde_rho(rho, e),
            dtdrho_e: eos.dtdrho_e(rho, e),
            dtde_rho: eos.dtde_rho(rho, e),
            cv: eos.cv(rho, e),
            cp: eos.cp(rho, e),
            entropy: self.compute_entropy.then(|| eos.entropy(rho, e)),
        };
    }

    /// Record the outcome of the solves behind an update and stop its timer.
    fn finish(&mut self, pair: InputPair, solves: &[SecantSolution], timer: Timer) {
        let tier = CostTier::for_pair(pair);
        self.last_solve = SolveReport {
            tier,
            converged: solves.iter().all(|s| s.converged),
            iterations: solves.iter().map(|s| s.iterations).sum(),
        };
        if !self.last_solve.converged {
            debug!(
                %pair,
                %tier,
                rho = self.state.density,
                e = self.state.static_energy,
                "state update did not converge"
            );
        }
        if timing::is_enabled() {
            let acc = match tier {
                CostTier::Direct => &eval_timing::DIRECT,
                CostTier::SingleInversion => &eval_timing::SINGLE_INVERSION,
                CostTier::DoubleInversion => &eval_timing::DOUBLE_INVERSION,
            };
            timer.stop_into(acc);
        }
    }

    /// Update from density and static energy (table lookups only).
    pub fn set_state_rhoe(&mut self, rho: f64, e: f64) {
        let timer = Timer::start("set_state_rhoe");
        self.write_state(rho, e);
        self.finish(InputPair::RhoE, &[], timer);
    }

    /// Update from pressure and density.
    pub fn set_state_prho(&mut self, p: f64, rho: f64) {
        let timer = Timer::start("set_state_prho");
        let e = self.eos.energy_from_rho_p(rho, p);
        self.write_state(rho, e.x);
        self.finish(InputPair::PRho, &[e], timer);
    }

    /// Update from density and temperature.
    pub fn set_state_rhot(&mut self, rho: f64, t: f64) {
        let timer = Timer::start("set_state_rhot");
        let e = self.eos.energy_from_rho_t(rho, t);
        self.write_state(rho, e.x);
        self.finish(InputPair::RhoT, &[e], timer);
    }

    /// Update from density and enthalpy.
    pub fn set_state_rhoh(&mut self, rho: f64, h: f64) {
        let timer = Timer::start("set_state_rhoh");
        let e = self.eos.energy_from_rho_h(rho, h);
        self.write_state(rho, e.x);
        self.finish(InputPair::RhoH, &[e], timer);
    }

    /// Update from pressure and temperature.
    pub fn set_state_pt(&mut self, p: f64, t: f64) {
        let timer = Timer::start("set_state_pt");
        let rho = self.eos.density_from_p_t(p, t);
        let e = self.eos.energy_from_rho_p(rho.x, p);
        self.write_state(rho.x, e.x);
        self.finish(InputPair::PT, &[rho, e], timer);
    }

    /// Update from pressure and entropy.
    pub fn set_state_ps(&mut self, p: f64, s: f64) {
        let timer = Timer::start("set_state_ps");
        let rho = self.eos.density_from_p_s(p, s);
        let e = self.eos.energy_from_rho_p(rho.x, p);
        self.write_state(rho.x, e.x);
        self.finish(InputPair::PS, &[rho, e], timer);
    }

    /// Update from enthalpy and entropy.
    pub fn set_state_hs(&mut self, h: f64, s: f64) {
        let timer = Timer::start("set_state_hs");
        let rho = self.eos.density_from_h_s(h, s);
        let e = self.eos.energy_from_rho_h(rho.x, h);
        self.write_state(rho.x, e.x);
        self.finish(InputPair::HS, &[rho, e], timer);
    }

    /// Overwrite only the static energy, leaving the rest of the record as is.
    pub fn set_energy_prho(&mut self, p: f64, rho: f64) {
        let timer = Timer::start("set_energy_prho");
        let e = self.eos.energy_from_rho_p(rho, p);
        self.state.static_energy = e.x;
        self.finish(InputPair::PRho, &[e], timer);
    }
}

impl FluidModel for TableFluid {
    fn name(&self) -> &str {
        "LookupTable"
    }

    fn state(&self) -> &FluidState {
        &self.state
    }

    fn set_state(&mut self, input: StateInput) {
        match input {
            StateInput::RhoE { rho, e } => self.set_state_rhoe(rho, e),
            StateInput::PRho { p, rho } => self.set_state_prho(p, rho),
            StateInput::RhoT { rho, t } => self.set_state_rhot(rho, t),
            StateInput::RhoH { rho, h } => self.set_state_rhoh(rho, h),
            StateInput::PT { p, t } => self.set_state_pt(p, t),
            StateInput::PS { p, s } => self.set_state_ps(p, s),
            StateInput::HS { h, s } => self.set_state_hs(h, s),
        }
    }

    fn set_energy_prho(&mut self, p: f64, rho: f64) {
        TableFluid::set_energy_prho(self, p, rho);
    }

    fn last_solve(&self) -> SolveReport {
        self.last_solve
    }
}
