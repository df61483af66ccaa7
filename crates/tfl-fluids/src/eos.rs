//! Property evaluation on top of a shared [`PropertyTable`].
//!
//! Three tiers, each built on the one below:
//!
//! - direct lookups from `(rho, e)`;
//! - energy recovered from `rho` plus one of `P`, `T`, `h` (one secant solve);
//! - density recovered from two of `P`, `T`, `h`, `s` (a secant solve whose
//!   residual runs an energy inversion at every trial density).
//!
//! Nothing here mutates state or reports errors. Inputs outside the table
//! extrapolate, and non-convergence shows up only in [`SecantSolution::converged`].

use crate::secant::{SecantConfig, SecantSolution, secant};
use crate::table::{Property, PropertyTable};
use std::sync::Arc;
use tracing::trace;

/// Evaluator bound to a shared table and a root-finder configuration.
///
/// Cloning is cheap; clones share the table.
#[derive(Debug, Clone)]
pub struct TableEos {
    table: Arc<PropertyTable>,
    solver: SecantConfig,
}

impl TableEos {
    pub fn new(table: Arc<PropertyTable>, solver: SecantConfig) -> Self {
        Self { table, solver }
    }

    pub fn table(&self) -> &PropertyTable {
        &self.table
    }

    /// Handle to the shared table.
    pub fn shared_table(&self) -> Arc<PropertyTable> {
        Arc::clone(&self.table)
    }

    pub fn solver(&self) -> &SecantConfig {
        &self.solver
    }

    /// Saturation energy at `rho`.
    #[inline]
    pub fn saturation_energy(&self, rho: f64) -> f64 {
        self.table.saturation().energy(rho)
    }

    /// Look up `prop` at density `rho` and static energy `e`.
    #[inline]
    pub fn property(&self, prop: Property, rho: f64, e: f64) -> f64 {
        let de = self.table.saturation().offset(rho, e);
        self.table.interpolate(prop, rho, de)
    }

    pub fn pressure(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Pressure, rho, e)
    }

    pub fn temperature(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Temperature, rho, e)
    }

    pub fn enthalpy(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Enthalpy, rho, e)
    }

    pub fn entropy(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Entropy, rho, e)
    }

    pub fn cv(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Cv, rho, e)
    }

    pub fn cp(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::Cp, rho, e)
    }

    pub fn sound_speed2(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::SoundSpeed2, rho, e)
    }

    pub fn dpdrho_e(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::DpDrhoE, rho, e)
    }

    pub fn dpde_rho(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::DpDeRho, rho, e)
    }

    pub fn dtdrho_e(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::DtDrhoE, rho, e)
    }

    pub fn dtde_rho(&self, rho: f64, e: f64) -> f64 {
        self.property(Property::DtDeRho, rho, e)
    }

    /// Energy seed: the saturation energy at `rho` shifted to the lowest tabulated offset.
    #[inline]
    fn energy_seed(&self, rho: f64) -> f64 {
        self.saturation_energy(rho) + self.table.energy_offset_axis().min()
    }

    /// Density seed: the lowest tabulated density.
    #[inline]
    fn density_seed(&self) -> f64 {
        self.table.density_axis().min()
    }

    /// Energy at which `prop(rho, e)` equals `target`.
    fn invert_energy(&self, prop: Property, rho: f64, target: f64) -> SecantSolution {
        secant(
            self.energy_seed(rho),
            |e| self.property(prop, rho, e) - target,
            &self.solver,
        )
    }

    /// Density at which `outer(rho, e)` equals `outer_target`, where `e` is
    /// recovered at each trial density from `inner(rho, e) = inner_target`.
    fn invert_density(
        &self,
        inner: Property,
        inner_target: f64,
        outer: Property,
        outer_target: f64,
    ) -> SecantSolution {
        secant(
            self.density_seed(),
            |rho| {
                let e = self.invert_energy(inner, rho, inner_target);
                if !e.converged {
                    trace!(rho, %inner, inner_target, "inner energy inversion did not converge");
                }
                self.property(outer, rho, e.x) - outer_target
            },
            &self.solver,
        )
    }

    /// Static energy from density and pressure.
    pub fn energy_from_rho_p(&self, rho: f64, p: f64) -> SecantSolution {
        self.invert_energy(Property::Pressure, rho, p)
    }

    /// Static energy from density and temperature.
    pub fn energy_from_rho_t(&self, rho: f64, t: f64) -> SecantSolution {
        self.invert_energy(Property::Temperature, rho, t)
    }

    /// Static energy from density and enthalpy.
    pub fn energy_from_rho_h(&self, rho: f64, h: f64) -> SecantSolution {
        self.invert_energy(Property::Enthalpy, rho, h)
    }

    /// Density from pressure and temperature.
    pub fn density_from_p_t(&self, p: f64, t: f64) -> SecantSolution {
        self.invert_density(Property::Pressure, p, Property::Temperature, t)
    }

    /// Density from pressure and entropy.
    pub fn density_from_p_s(&self, p: f64, s: f64) -> SecantSolution {
        self.invert_density(Property::Pressure, p, Property::Entropy, s)
    }

    /// Density from enthalpy and entropy.
    pub fn density_from_h_s(&self, h: f64, s: f64) -> SecantSolution {
        self.invert_density(Property::Enthalpy, h, Property::Entropy, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::IdealGasTable;
    use crate::table::test_support::table_from_fn;
    use tfl_core::relative_error as rel_err;

    fn ideal_gas(saturation: [f64; 4]) -> TableEos {
        let table = IdealGasTable {
            saturation,
            ..IdealGasTable::default()
        }
        .build()
        .unwrap();
        TableEos::new(Arc::new(table), SecantConfig::default())
    }

    const SAMPLES: [(f64, f64); 5] = [
        (1.2, 2.5e5),
        (2.0, 3.0e5),
        (4.0, 2.0e5),
        (0.8, 4.0e5),
        (6.5, 3.3e5),
    ];

    #[test]
    fn direct_lookup_shifts_energy_by_saturation() {
        // Field value equals its energy-offset coordinate.
        let table = table_from_fn((1.0, 3.0, 3), (0.0, 10.0, 3), [2.0, 1.0, 0.0, 0.0], |_, _, de| {
            de
        });
        let eos = TableEos::new(Arc::new(table), SecantConfig::default());
        // e_sat(2) = 4, so e = 9 sits at offset 5.
        assert!((eos.pressure(2.0, 9.0) - 5.0).abs() < 1e-12);
        assert!((eos.saturation_energy(2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn direct_lookups_match_ideal_gas() {
        let eos = ideal_gas([0.0; 4]);
        let gas = IdealGasTable::default();
        let cv = gas.cv();
        let (rho, e) = (2.0, 3.0e5);
        let t = e / cv;
        assert!(rel_err(eos.temperature(rho, e), t) < 1e-12);
        assert!(rel_err(eos.pressure(rho, e), rho * gas.gas_constant * t) < 1e-12);
        assert!(rel_err(eos.enthalpy(rho, e), gas.gamma * e) < 1e-12);
        assert!(rel_err(eos.sound_speed2(rho, e), gas.gamma * gas.gas_constant * t) < 1e-12);
        assert!(rel_err(eos.cv(rho, e), cv) < 1e-12);
        assert!(rel_err(eos.cp(rho, e), gas.gamma * cv) < 1e-12);
        assert!(rel_err(eos.dpdrho_e(rho, e), (gas.gamma - 1.0) * e) < 1e-12);
        assert!(rel_err(eos.dpde_rho(rho, e), (gas.gamma - 1.0) * rho) < 1e-12);
        assert!(eos.dtdrho_e(rho, e).abs() < 1e-12);
        assert!(rel_err(eos.dtde_rho(rho, e), 1.0 / cv) < 1e-12);
    }

    #[test]
    fn single_inversions_recover_energy() {
        for saturation in [[0.0; 4], [2.0e4, -1.5e3, 8.0e3, -4.0e3]] {
            let eos = ideal_gas(saturation);
            for (rho, e) in SAMPLES {
                let p = eos.pressure(rho, e);
                let t = eos.temperature(rho, e);
                let h = eos.enthalpy(rho, e);

                for sol in [
                    eos.energy_from_rho_p(rho, p),
                    eos.energy_from_rho_t(rho, t),
                    eos.energy_from_rho_h(rho, h),
                ] {
                    assert!(sol.converged, "rho={rho}, e={e}: {sol:?}");
                    assert!(rel_err(sol.x, e) < 1e-9, "rho={rho}, e={e}: {sol:?}");
                }
            }
        }
    }

    #[test]
    fn double_inversions_recover_density() {
        for saturation in [[0.0; 4], [2.0e4, -1.5e3, 8.0e3, -4.0e3]] {
            let eos = ideal_gas(saturation);
            for (rho, e) in SAMPLES {
                let p = eos.pressure(rho, e);
                let t = eos.temperature(rho, e);
                let h = eos.enthalpy(rho, e);
                let s = eos.entropy(rho, e);

                for sol in [
                    eos.density_from_p_t(p, t),
                    eos.density_from_p_s(p, s),
                    eos.density_from_h_s(h, s),
                ] {
                    assert!(sol.converged, "rho={rho}, e={e}: {sol:?}");
                    assert!(rel_err(sol.x, rho) < 1e-8, "rho={rho}, e={e}: {sol:?}");
                }
            }
        }
    }

    #[test]
    fn clones_share_the_table() {
        let eos = ideal_gas([0.0; 4]);
        let other = eos.clone();
        assert!(Arc::ptr_eq(&eos.shared_table(), &other.shared_table()));
    }
}
