//! Thermodynamic state definitions.

use crate::error::{FluidError, FluidResult};
use std::fmt;
use tfl_core::units::{Density, Pressure, SpecEnergy, SpecEntropy, Temperature, Velocity};
use tfl_core::units::{jpkg, jpkgk, k, kgpm3, mps, pa};

/// Input specification for a state update, all values in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Density [kg/m³] and static energy [J/kg].
    RhoE { rho: f64, e: f64 },
    /// Pressure [Pa] and density [kg/m³].
    PRho { p: f64, rho: f64 },
    /// Density [kg/m³] and temperature [K].
    RhoT { rho: f64, t: f64 },
    /// Density [kg/m³] and specific enthalpy [J/kg].
    RhoH { rho: f64, h: f64 },
    /// Pressure [Pa] and temperature [K].
    PT { p: f64, t: f64 },
    /// Pressure [Pa] and specific entropy [J/(kg·K)].
    PS { p: f64, s: f64 },
    /// Specific enthalpy [J/kg] and specific entropy [J/(kg·K)].
    HS { h: f64, s: f64 },
}

impl StateInput {
    pub fn pair(&self) -> InputPair {
        match self {
            Self::RhoE { .. } => InputPair::RhoE,
            Self::PRho { .. } => InputPair::PRho,
            Self::RhoT { .. } => InputPair::RhoT,
            Self::RhoH { .. } => InputPair::RhoH,
            Self::PT { .. } => InputPair::PT,
            Self::PS { .. } => InputPair::PS,
            Self::HS { .. } => InputPair::HS,
        }
    }
}

/// Which two variables a state update is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputPair {
    RhoE,
    PRho,
    RhoT,
    RhoH,
    PT,
    PS,
    HS,
}

/// Unit family of one input variable, used to pick a parser for text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Density,
    Energy,
    Pressure,
    Temperature,
    Entropy,
}

impl InputPair {
    pub const ALL: [InputPair; 7] = [
        Self::RhoE,
        Self::PRho,
        Self::RhoT,
        Self::RhoH,
        Self::PT,
        Self::PS,
        Self::HS,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RhoE => "rho-e",
            Self::PRho => "P-rho",
            Self::RhoT => "rho-T",
            Self::RhoH => "rho-h",
            Self::PT => "P-T",
            Self::PS => "P-s",
            Self::HS => "h-s",
        }
    }

    pub fn kinds(self) -> (InputKind, InputKind) {
        use InputKind::*;
        match self {
            Self::RhoE => (Density, Energy),
            Self::PRho => (Pressure, Density),
            Self::RhoT => (Density, Temperature),
            Self::RhoH => (Density, Energy),
            Self::PT => (Pressure, Temperature),
            Self::PS => (Pressure, Entropy),
            Self::HS => (Energy, Entropy),
        }
    }

    pub fn first_label(self) -> &'static str {
        match self {
            Self::RhoE | Self::RhoT | Self::RhoH => "Density [kg/m^3]",
            Self::PRho | Self::PT | Self::PS => "Pressure [Pa]",
            Self::HS => "Enthalpy [J/kg]",
        }
    }

    pub fn second_label(self) -> &'static str {
        match self {
            Self::RhoE => "Energy [J/kg]",
            Self::PRho => "Density [kg/m^3]",
            Self::RhoT | Self::PT => "Temperature [K]",
            Self::RhoH => "Enthalpy [J/kg]",
            Self::PS | Self::HS => "Entropy [J/(kg K)]",
        }
    }

    /// Build the matching [`StateInput`] with values in the order of [`InputPair::label`].
    pub fn input(self, first: f64, second: f64) -> StateInput {
        match self {
            Self::RhoE => StateInput::RhoE {
                rho: first,
                e: second,
            },
            Self::PRho => StateInput::PRho {
                p: first,
                rho: second,
            },
            Self::RhoT => StateInput::RhoT {
                rho: first,
                t: second,
            },
            Self::RhoH => StateInput::RhoH {
                rho: first,
                h: second,
            },
            Self::PT => StateInput::PT {
                p: first,
                t: second,
            },
            Self::PS => StateInput::PS {
                p: first,
                s: second,
            },
            Self::HS => StateInput::HS {
                h: first,
                s: second,
            },
        }
    }
}

impl fmt::Display for InputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for InputPair {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|pair| pair.label().replace('-', "").to_lowercase() == key)
            .ok_or_else(|| FluidError::InvalidArg {
                what: format!("unknown input pair '{s}'"),
            })
    }
}

/// Current thermodynamic state of a table model.
///
/// All fields are SI. `entropy` is `None` unless the model was configured to
/// compute it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidState {
    /// Density [kg/m³]
    pub density: f64,
    /// Static (internal) energy [J/kg]
    pub static_energy: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    /// Temperature [K]
    pub temperature: f64,
    /// Speed of sound squared [m²/s²]
    pub sound_speed2: f64,
    /// (∂P/∂ρ) at constant e
    pub dpdrho_e: f64,
    /// (∂P/∂e) at constant ρ
    pub dpde_rho: f64,
    /// (∂T/∂ρ) at constant e
    pub dtdrho_e: f64,
    /// (∂T/∂e) at constant ρ
    pub dtde_rho: f64,
    /// Isochoric specific heat [J/(kg·K)]
    pub cv: f64,
    /// Isobaric specific heat [J/(kg·K)]
    pub cp: f64,
    /// Specific entropy [J/(kg·K)]
    pub entropy: Option<f64>,
}

impl FluidState {
    pub fn rho(&self) -> Density {
        kgpm3(self.density)
    }

    pub fn e(&self) -> SpecEnergy {
        jpkg(self.static_energy)
    }

    pub fn p(&self) -> Pressure {
        pa(self.pressure)
    }

    pub fn t(&self) -> Temperature {
        k(self.temperature)
    }

    pub fn s(&self) -> Option<SpecEntropy> {
        self.entropy.map(jpkgk)
    }

    /// Speed of sound, or `None` when the tabulated a² is negative or non-finite.
    pub fn sound_speed(&self) -> Option<Velocity> {
        (self.sound_speed2.is_finite() && self.sound_speed2 >= 0.0)
            .then(|| mps(self.sound_speed2.sqrt()))
    }

    /// Specific enthalpy h = e + P/ρ [J/kg].
    pub fn enthalpy(&self) -> f64 {
        self.static_energy + self.pressure / self.density
    }

    /// Heat capacity ratio cp/cv.
    pub fn gamma(&self) -> f64 {
        self.cp / self.cv
    }

    /// Reject records a flow solver should not consume.
    ///
    /// Evaluation never fails on its own; extrapolated or unconverged states
    /// can carry non-finite or non-physical values, and this is the check
    /// callers run before using them.
    pub fn check_physical(&self) -> FluidResult<()> {
        crate::model::validation::validate_density(self.density)?;
        crate::model::validation::validate_pressure(self.pressure)?;
        crate::model::validation::validate_temperature(self.temperature)?;
        crate::model::validation::validate_sound_speed2(self.sound_speed2)?;
        crate::model::validation::validate_heat_capacity(self.cv, "cv must be positive and finite")?;
        crate::model::validation::validate_heat_capacity(self.cp, "cp must be positive and finite")?;
        for (v, what) in [
            (self.static_energy, "static energy must be finite"),
            (self.dpdrho_e, "dP/drho must be finite"),
            (self.dpde_rho, "dP/de must be finite"),
            (self.dtdrho_e, "dT/drho must be finite"),
            (self.dtde_rho, "dT/de must be finite"),
        ] {
            if !v.is_finite() {
                return Err(FluidError::NonPhysical { what });
            }
        }
        if let Some(s) = self.entropy
            && !s.is_finite()
        {
            return Err(FluidError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        Ok(())
    }

    /// Return a summary string of the main properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "State(ρ={:.4}kg/m³,e={:.1}J/kg,P={:.1}Pa,T={:.2}K,a²={:.1}m²/s²,cv={:.2},cp={:.2})",
            self.density,
            self.static_energy,
            self.pressure,
            self.temperature,
            self.sound_speed2,
            self.cv,
            self.cp
        )
    }
}
