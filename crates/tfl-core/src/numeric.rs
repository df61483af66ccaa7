use crate::TfError;

/// Floating point type used throughout the evaluator
pub type Real = f64;

/// Mixed absolute/relative tolerance: `|a - b| <= max(abs, rel * max(|a|, |b|))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Relative tolerance with no absolute floor.
    pub const fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }

    pub fn accepts(&self, a: Real, b: Real) -> bool {
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= self.abs.max(self.rel * scale)
    }
}

impl Default for Tolerances {
    /// Matches the secant solver's default relative tolerance.
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.accepts(a, b)
}

/// `|got - want| / |want|`; infinite when `want` is zero and `got` is not.
pub fn relative_error(got: Real, want: Real) -> Real {
    if got == want {
        0.0
    } else {
        (got - want).abs() / want.abs()
    }
}

pub fn ensure_finite(value: Real, what: &'static str) -> Result<Real, TfError> {
    match value.is_finite() {
        true => Ok(value),
        false => Err(TfError::NonFinite { what, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_has_absolute_floor() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn relative_has_no_absolute_floor() {
        let tol = Tolerances::relative(1e-9);
        assert!(!nearly_equal(0.0, 1e-300, tol));
        assert!(nearly_equal(2.5e5, 2.5e5 * (1.0 + 1e-10), tol));
    }

    #[test]
    fn relative_error_of_exact_match_is_zero() {
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert_eq!(relative_error(3.0, 2.0), 0.5);
        assert!(relative_error(1.0, 0.0).is_infinite());
    }

    #[test]
    fn ensure_finite_rejects_nan_and_inf() {
        assert_eq!(ensure_finite(3.0, "x").unwrap(), 3.0);
        let msg = ensure_finite(Real::NAN, "density").unwrap_err().to_string();
        assert!(msg.contains("density"));
        assert!(ensure_finite(Real::NEG_INFINITY, "x").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances { abs: 1e-9, rel: 1e-6 };
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn scaling_preserves_relative_closeness(a in 1e-3_f64..1e3, eps in 0.0_f64..1e-10, k in 1e-3_f64..1e3) {
            let tol = Tolerances::relative(1e-9);
            prop_assert!(nearly_equal(a * k, a * (1.0 + eps) * k, tol));
        }
    }
}
