//! Tabulated property fields on a uniform (density, energy offset) grid.
//!
//! The table is produced elsewhere; this module only holds it, checks that
//! its shape is consistent, and answers interpolation queries. Every field
//! is flattened density-major: the value at density node `i` and energy
//! offset node `j` lives at `i * ny + j`.

use crate::error::{FluidError, FluidResult};
use crate::interp;
use crate::saturation::SaturationCurve;
use std::fmt;

/// Uniformly spaced grid axis described by its endpoints and node count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    len: usize,
}

impl Axis {
    /// Create an axis with `len` nodes from `min` to `max` inclusive.
    ///
    /// Bilinear blending needs at least two nodes, and the endpoints must be
    /// finite and distinct. `max < min` is allowed (a descending axis).
    pub fn new(min: f64, max: f64, len: usize) -> FluidResult<Self> {
        if len < 2 {
            return Err(FluidError::InvalidTable {
                what: "axis needs at least 2 nodes",
            });
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(FluidError::InvalidTable {
                what: "axis endpoints must be finite",
            });
        }
        if min == max {
            return Err(FluidError::InvalidTable {
                what: "axis endpoints must differ",
            });
        }
        Ok(Self { min, max, len })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; an axis has at least two nodes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Node spacing.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.len - 1) as f64
    }

    /// Coordinate of node `i`.
    pub fn node(&self, i: usize) -> f64 {
        if i + 1 == self.len {
            self.max
        } else {
            self.min + i as f64 * self.step()
        }
    }

    /// Continuous node index of `v`; outside `[0, len - 1]` when `v` is off the axis.
    #[inline]
    pub fn fractional_index(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min) * (self.len - 1) as f64
    }

    /// Whether `v` lies between the endpoints (inclusive).
    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (lo..=hi).contains(&v)
    }
}

/// Tabulated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Pressure [Pa]
    Pressure,
    /// Temperature [K]
    Temperature,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Specific entropy [J/(kg·K)]
    Entropy,
    /// Isochoric specific heat [J/(kg·K)]
    Cv,
    /// Isobaric specific heat [J/(kg·K)]
    Cp,
    /// Speed of sound squared [m²/s²]
    SoundSpeed2,
    /// (∂P/∂ρ) at constant e
    DpDrhoE,
    /// (∂P/∂e) at constant ρ
    DpDeRho,
    /// (∂T/∂ρ) at constant e
    DtDrhoE,
    /// (∂T/∂e) at constant ρ
    DtDeRho,
}

impl Property {
    pub const COUNT: usize = 11;

    pub const ALL: [Property; Self::COUNT] = [
        Self::Pressure,
        Self::Temperature,
        Self::Enthalpy,
        Self::Entropy,
        Self::Cv,
        Self::Cp,
        Self::SoundSpeed2,
        Self::DpDrhoE,
        Self::DpDeRho,
        Self::DtDrhoE,
        Self::DtDeRho,
    ];

    /// Position of this property in [`Property::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Field name as used in table files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
            Self::Cv => "cv",
            Self::Cp => "cp",
            Self::SoundSpeed2 => "sound_speed2",
            Self::DpDrhoE => "dpdrho_e",
            Self::DpDeRho => "dpde_rho",
            Self::DtDrhoE => "dtdrho_e",
            Self::DtDeRho => "dtde_rho",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw table contents as handed over by a loader.
///
/// Axis endpoints are `[min, max]`; every field holds `nx * ny` values in
/// density-major order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableData {
    pub density: [f64; 2],
    pub energy_offset: [f64; 2],
    pub nx: usize,
    pub ny: usize,
    pub saturation: [f64; 4],
    pub pressure: Vec<f64>,
    pub temperature: Vec<f64>,
    pub enthalpy: Vec<f64>,
    pub entropy: Vec<f64>,
    pub cv: Vec<f64>,
    pub cp: Vec<f64>,
    pub sound_speed2: Vec<f64>,
    pub dpdrho_e: Vec<f64>,
    pub dpde_rho: Vec<f64>,
    pub dtdrho_e: Vec<f64>,
    pub dtde_rho: Vec<f64>,
}

impl TableData {
    fn into_fields(self) -> [Vec<f64>; Property::COUNT] {
        // Order must follow `Property::ALL`.
        [
            self.pressure,
            self.temperature,
            self.enthalpy,
            self.entropy,
            self.cv,
            self.cp,
            self.sound_speed2,
            self.dpdrho_e,
            self.dpde_rho,
            self.dtdrho_e,
            self.dtde_rho,
        ]
    }
}

/// Immutable lookup table: two axes, the saturation curve, and one field per
/// [`Property`].
///
/// Share it between models with `Arc<PropertyTable>`; nothing mutates it
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    density: Axis,
    energy_offset: Axis,
    saturation: SaturationCurve,
    fields: [Vec<f64>; Property::COUNT],
}

impl PropertyTable {
    /// Check the shape of `data` and take ownership of its fields.
    pub fn new(data: TableData) -> FluidResult<Self> {
        let density = Axis::new(data.density[0], data.density[1], data.nx)?;
        let energy_offset = Axis::new(data.energy_offset[0], data.energy_offset[1], data.ny)?;
        let saturation = SaturationCurve::new(data.saturation);
        if saturation.coefficients().iter().any(|c| !c.is_finite()) {
            return Err(FluidError::InvalidTable {
                what: "saturation coefficients must be finite",
            });
        }

        let expected = data.nx.checked_mul(data.ny).ok_or(FluidError::InvalidTable {
            what: "grid dimensions overflow",
        })?;
        let fields = data.into_fields();
        for (prop, field) in Property::ALL.iter().zip(&fields) {
            if field.len() != expected {
                return Err(FluidError::FieldLength {
                    field: prop.name(),
                    expected,
                    found: field.len(),
                });
            }
        }

        Ok(Self {
            density,
            energy_offset,
            saturation,
            fields,
        })
    }

    pub fn density_axis(&self) -> &Axis {
        &self.density
    }

    pub fn energy_offset_axis(&self) -> &Axis {
        &self.energy_offset
    }

    pub fn saturation(&self) -> &SaturationCurve {
        &self.saturation
    }

    /// Flattened values of one field.
    pub fn field(&self, prop: Property) -> &[f64] {
        &self.fields[prop.index()]
    }

    /// Stored value at node `(i, j)`.
    pub fn node_value(&self, prop: Property, i: usize, j: usize) -> f64 {
        self.field(prop)[i * self.energy_offset.len() + j]
    }

    /// Interpolate `prop` at table coordinates `(rho, de)`.
    #[inline]
    pub fn interpolate(&self, prop: Property, rho: f64, de: f64) -> f64 {
        interp::bilinear(rho, de, &self.density, &self.energy_offset, self.field(prop))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::table_from_fn;
    use super::*;

    fn uniform_data(nx: usize, ny: usize) -> TableData {
        let field = vec![1.0; nx * ny];
        TableData {
            density: [0.0, 2.0],
            energy_offset: [0.0, 2.0],
            nx,
            ny,
            saturation: [0.0; 4],
            pressure: field.clone(),
            temperature: field.clone(),
            enthalpy: field.clone(),
            entropy: field.clone(),
            cv: field.clone(),
            cp: field.clone(),
            sound_speed2: field.clone(),
            dpdrho_e: field.clone(),
            dpde_rho: field.clone(),
            dtdrho_e: field.clone(),
            dtde_rho: field,
        }
    }

    #[test]
    fn axis_rejects_degenerate_shapes() {
        assert!(Axis::new(0.0, 1.0, 1).is_err());
        assert!(Axis::new(1.0, 1.0, 5).is_err());
        assert!(Axis::new(f64::NAN, 1.0, 5).is_err());
        assert!(Axis::new(0.0, f64::INFINITY, 5).is_err());
    }

    #[test]
    fn axis_nodes_and_fractional_index() {
        let axis = Axis::new(1.0, 3.0, 5).unwrap();
        assert_eq!(axis.step(), 0.5);
        assert_eq!(axis.node(0), 1.0);
        assert_eq!(axis.node(2), 2.0);
        assert_eq!(axis.node(4), 3.0);
        assert_eq!(axis.fractional_index(2.25), 2.5);
        assert_eq!(axis.fractional_index(0.0), -2.0);
        assert!(axis.contains(3.0));
        assert!(!axis.contains(3.1));
    }

    #[test]
    fn property_order_matches_index() {
        for (i, prop) in Property::ALL.iter().enumerate() {
            assert_eq!(prop.index(), i);
        }
        assert_eq!(Property::SoundSpeed2.to_string(), "sound_speed2");
    }

    #[test]
    fn table_accepts_consistent_shape() {
        let table = PropertyTable::new(uniform_data(3, 4)).unwrap();
        assert_eq!(table.density_axis().len(), 3);
        assert_eq!(table.energy_offset_axis().len(), 4);
        assert_eq!(table.field(Property::Cp).len(), 12);
    }

    #[test]
    fn table_rejects_short_field() {
        let mut data = uniform_data(3, 3);
        data.entropy.pop();
        let err = PropertyTable::new(data).unwrap_err();
        assert_eq!(
            err,
            FluidError::FieldLength {
                field: "entropy",
                expected: 9,
                found: 8,
            }
        );
    }

    #[test]
    fn table_rejects_single_row() {
        assert!(PropertyTable::new(uniform_data(1, 3)).is_err());
        assert!(PropertyTable::new(uniform_data(3, 1)).is_err());
    }

    #[test]
    fn node_value_is_density_major() {
        let table = table_from_fn((0.0, 2.0, 3), (0.0, 3.0, 4), [0.0; 4], |_, x, y| {
            10.0 * x + y
        });
        assert_eq!(table.node_value(Property::Pressure, 2, 1), 21.0);
        assert_eq!(table.field(Property::Pressure)[2 * 4 + 1], 21.0);
        assert_eq!(table.interpolate(Property::Pressure, 2.0, 1.0), 21.0);
    }
}
