//! Sweep generation over one input of a state update.

use crate::error::{FluidError, FluidResult};
use crate::state::InputKind;
use crate::units::parse_quantity;
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepType {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Bounds and spacing of a single parameter sweep, in SI.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> FluidResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "sweep bounds must be finite".to_string(),
            });
        }
        if num_points < 2 {
            return Err(FluidError::InvalidArg {
                what: "sweep must have at least 2 points".to_string(),
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(FluidError::InvalidArg {
                what: "sweep start and end must differ".to_string(),
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(FluidError::InvalidArg {
                what: "logarithmic sweep bounds must be positive".to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Create a sweep from unit-tagged bounds such as `"1 bar"` and `"10 bar"`.
    pub fn from_text(
        start: &str,
        end: &str,
        kind: InputKind,
        num_points: usize,
        sweep_type: SweepType,
    ) -> FluidResult<Self> {
        let parse = |which: &str, text: &str| {
            parse_quantity(text, kind).map_err(|e| FluidError::InvalidArg {
                what: format!("sweep {which} value: {e}"),
            })
        };
        Self::new(parse("start", start)?, parse("end", end)?, num_points, sweep_type)
    }

    /// Generate all points in the sweep, ending exactly on `end`.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        if n <= 1 {
            return vec![self.start];
        }
        let step = |lo: f64, hi: f64, i: usize| lo + (hi - lo) * i as f64 / (n - 1) as f64;

        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => (0..n).map(|i| step(self.start, self.end, i)).collect(),
            SweepType::Logarithmic => {
                let (lo, hi) = (self.start.ln(), self.end.ln());
                (0..n).map(|i| step(lo, hi, i).exp()).collect()
            }
        };
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl std::str::FromStr for SweepType {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lin" | "linear" => Ok(Self::Linear),
            "log" | "logarithmic" => Ok(Self::Logarithmic),
            _ => Err(FluidError::InvalidArg {
                what: format!("unknown sweep type '{s}'"),
            }),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep from {} to {} ({} points, {})",
            self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep_generation() {
        let sweep = SweepDefinition::new(300.0, 400.0, 5, SweepType::Linear).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert_eq!(points[4], 400.0);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepDefinition::new(1e5, 1e6, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 3);
        assert!((points[0] - 1e5).abs() < 1e-6);
        let expected_mid = (1e5_f64 * 1e6_f64).sqrt();
        assert!((points[1] - expected_mid).abs() / expected_mid < 1e-9);
        assert_eq!(points[2], 1e6);
    }

    #[test]
    fn descending_sweep() {
        let sweep = SweepDefinition::new(10.0, 2.0, 5, SweepType::Linear).unwrap();
        assert_eq!(sweep.generate_points(), vec![10.0, 8.0, 6.0, 4.0, 2.0]);
    }

    #[test]
    fn sweep_from_text() {
        let sweep =
            SweepDefinition::from_text("1 bar", "3 bar", InputKind::Pressure, 3, SweepType::Linear)
                .unwrap();
        assert_eq!(sweep.start, 1e5);
        assert_eq!(sweep.end, 3e5);
        assert!(
            SweepDefinition::from_text("1 psi", "3 bar", InputKind::Pressure, 3, SweepType::Linear)
                .is_err()
        );
    }

    #[test]
    fn reject_bad_definitions() {
        assert!(SweepDefinition::new(300.0, 400.0, 1, SweepType::Linear).is_err());
        assert!(SweepDefinition::new(300.0, 300.0, 5, SweepType::Linear).is_err());
        assert!(SweepDefinition::new(-1.0, 10.0, 5, SweepType::Logarithmic).is_err());
        assert!(SweepDefinition::new(f64::NAN, 10.0, 5, SweepType::Linear).is_err());
    }

    #[test]
    fn sweep_type_parses() {
        assert_eq!("log".parse::<SweepType>().unwrap(), SweepType::Logarithmic);
        assert_eq!("Linear".parse::<SweepType>().unwrap(), SweepType::Linear);
        assert!("cubic".parse::<SweepType>().is_err());
    }
}
