//! Saturation energy correction.
//!
//! Table energies are stored relative to a saturation curve so that the
//! energy axis stays roughly aligned with the two-phase boundary across the
//! density range:
//!
//! ```text
//! e_sat(ρ) = c0 + c1·ρ + c2·ρ^(1/2) + c3·ρ^(1/3)
//! ```

/// Four-coefficient saturation energy curve, fixed once the table is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SaturationCurve {
    coefficients: [f64; 4],
}

impl SaturationCurve {
    pub const fn new(coefficients: [f64; 4]) -> Self {
        Self { coefficients }
    }

    /// A curve that is identically zero (table energies are absolute).
    pub const fn zero() -> Self {
        Self::new([0.0; 4])
    }

    pub fn coefficients(&self) -> [f64; 4] {
        self.coefficients
    }

    /// Saturation energy [J/kg] at density `rho` [kg/m³].
    ///
    /// `rho` must be positive; the square root of a negative density is NaN.
    #[inline]
    pub fn energy(&self, rho: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coefficients;
        c0 + c1 * rho + c2 * rho.sqrt() + c3 * rho.cbrt()
    }

    /// Energy offset `e - e_sat(rho)` used as the second table coordinate.
    #[inline]
    pub fn offset(&self, rho: f64, e: f64) -> f64 {
        e - self.energy(rho)
    }
}

impl Default for SaturationCurve {
    fn default() -> Self {
        Self::zero()
    }
}
