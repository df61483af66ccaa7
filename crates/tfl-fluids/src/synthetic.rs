//! Synthetic tables sampled from a calorically perfect gas.
//!
//! Real tables come from an external generator. This one exists so the CLI
//! has something to evaluate out of the box and so tests can compare table
//! results against closed-form values.

use crate::error::FluidResult;
use crate::saturation::SaturationCurve;
use crate::table::{Axis, Property, PropertyTable, TableData};

/// Ideal gas with constant specific heats, sampled on a (density, energy offset) grid.
///
/// ```text
/// T = e / cv        P = ρ R T        h = e + P/ρ        a² = γ R T
/// s = cv ln(T/T0) − R ln(ρ/ρ0)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGasTable {
    /// Specific gas constant [J/(kg·K)]
    pub gas_constant: f64,
    /// Heat capacity ratio
    pub gamma: f64,
    /// Density axis `(min, max, nodes)` [kg/m³]
    pub density: (f64, f64, usize),
    /// Energy offset axis `(min, max, nodes)` [J/kg]
    pub energy_offset: (f64, f64, usize),
    /// Saturation curve the energy offsets are measured from
    pub saturation: [f64; 4],
    /// Temperature at which entropy is zero (together with `reference_density`)
    pub reference_temperature: f64,
    pub reference_density: f64,
}

impl Default for IdealGasTable {
    /// Air-like gas over 0.5-10 kg/m³ and 100-600 kJ/kg on a 41×41 grid.
    fn default() -> Self {
        Self {
            gas_constant: 287.0,
            gamma: 1.4,
            density: (0.5, 10.0, 41),
            energy_offset: (1.0e5, 6.0e5, 41),
            saturation: [0.0; 4],
            reference_temperature: 300.0,
            reference_density: 1.0,
        }
    }
}

impl IdealGasTable {
    pub fn cv(&self) -> f64 {
        self.gas_constant / (self.gamma - 1.0)
    }

    pub fn cp(&self) -> f64 {
        self.gamma * self.cv()
    }

    /// Closed-form value of `prop` at `(rho, e)`.
    pub fn exact(&self, prop: Property, rho: f64, e: f64) -> f64 {
        let r = self.gas_constant;
        let cv = self.cv();
        let t = e / cv;
        match prop {
            Property::Pressure => rho * r * t,
            Property::Temperature => t,
            Property::Enthalpy => e + r * t,
            Property::Entropy => {
                cv * (t / self.reference_temperature).ln()
                    - r * (rho / self.reference_density).ln()
            }
            Property::Cv => cv,
            Property::Cp => self.cp(),
            Property::SoundSpeed2 => self.gamma * r * t,
            Property::DpDrhoE => (self.gamma - 1.0) * e,
            Property::DpDeRho => (self.gamma - 1.0) * rho,
            Property::DtDrhoE => 0.0,
            Property::DtDeRho => 1.0 / cv,
        }
    }

    /// Sample every field on the grid.
    pub fn data(&self) -> FluidResult<TableData> {
        let x = Axis::new(self.density.0, self.density.1, self.density.2)?;
        let y = Axis::new(self.energy_offset.0, self.energy_offset.1, self.energy_offset.2)?;
        let saturation = SaturationCurve::new(self.saturation);

        let sample = |prop: Property| -> Vec<f64> {
            (0..x.len())
                .flat_map(|i| {
                    let rho = x.node(i);
                    (0..y.len()).map(move |j| (rho, y.node(j)))
                })
                .map(|(rho, de)| self.exact(prop, rho, de + saturation.energy(rho)))
                .collect()
        };

        Ok(TableData {
            density: [x.min(), x.max()],
            energy_offset: [y.min(), y.max()],
            nx: x.len(),
            ny: y.len(),
            saturation: self.saturation,
            pressure: sample(Property::Pressure),
            temperature: sample(Property::Temperature),
            enthalpy: sample(Property::Enthalpy),
            entropy: sample(Property::Entropy),
            cv: sample(Property::Cv),
            cp: sample(Property::Cp),
            sound_speed2: sample(Property::SoundSpeed2),
            dpdrho_e: sample(Property::DpDrhoE),
            dpde_rho: sample(Property::DpDeRho),
            dtdrho_e: sample(Property::DtDrhoE),
            dtde_rho: sample(Property::DtDeRho),
        })
    }

    pub fn build(&self) -> FluidResult<PropertyTable> {
        PropertyTable::new(self.data()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_builds() {
        let table = IdealGasTable::default().build().unwrap();
        assert_eq!(table.density_axis().len(), 41);
        assert_eq!(table.field(Property::Entropy).len(), 41 * 41);
    }

    #[test]
    fn nodes_hold_exact_values() {
        let gas = IdealGasTable {
            saturation: [1.0e4, 0.0, 2.0e3, 0.0],
            ..IdealGasTable::default()
        };
        let table = gas.build().unwrap();
        let rho = table.density_axis().node(7);
        let de = table.energy_offset_axis().node(11);
        let e = de + table.saturation().energy(rho);
        let stored = table.node_value(Property::Pressure, 7, 11);
        assert!((stored - gas.exact(Property::Pressure, rho, e)).abs() < 1e-9);
    }

    #[test]
    fn enthalpy_is_gamma_times_energy() {
        let gas = IdealGasTable::default();
        let e = 2.0e5;
        let h = gas.exact(Property::Enthalpy, 1.0, e);
        assert!((h - gas.gamma * e).abs() < 1e-6);
    }

    #[test]
    fn entropy_zero_at_reference() {
        let gas = IdealGasTable::default();
        let e = gas.reference_temperature * gas.cv();
        assert!(gas.exact(Property::Entropy, gas.reference_density, e).abs() < 1e-9);
    }
}
