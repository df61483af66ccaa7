// tfl-core/src/units.rs

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, MassDensity as UomMassDensity,
    Pressure as UomPressure, SpecificHeatCapacity as UomSpecificHeatCapacity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
/// Specific energy or enthalpy [J/kg].
pub type SpecEnergy = UomAvailableEnergy;
/// Specific entropy or heat capacity [J/(kg·K)].
pub type SpecEntropy = UomSpecificHeatCapacity;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn jpkg(v: f64) -> SpecEnergy {
    use uom::si::available_energy::joule_per_kilogram;
    SpecEnergy::new::<joule_per_kilogram>(v)
}

#[inline]
pub fn jpkgk(v: f64) -> SpecEntropy {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecEntropy::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::available_energy::kilojoule_per_kilogram;
    use uom::si::pressure::bar;

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _rho = kgpm3(1.2);
        let _s = jpkgk(6800.0);
        let _a = mps(340.0);
        assert!((pa(1.0e5).get::<bar>() - 1.0).abs() < 1e-12);
        assert!((jpkg(2.5e5).get::<kilojoule_per_kilogram>() - 250.0).abs() < 1e-9);
    }
}
