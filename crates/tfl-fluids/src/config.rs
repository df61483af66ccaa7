//! Model configuration fixed at construction.

use crate::secant::SecantConfig;

/// Settings for a [`TableFluid`](crate::TableFluid).
///
/// With the `serde` feature this deserializes from config files; missing
/// keys fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableFluidConfig {
    /// Evaluate entropy on every state update
    pub compute_entropy: bool,
    /// Root-finder settings shared by every inversion
    pub solver: SecantConfig,
}

impl TableFluidConfig {
    pub fn with_entropy(mut self, compute_entropy: bool) -> Self {
        self.compute_entropy = compute_entropy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TableFluidConfig::default();
        assert!(!config.compute_entropy);
        assert_eq!(config.solver.max_iterations, 20);
        assert_eq!(config.solver.rel_tol, 1e-9);
        assert_eq!(config.solver.perturbation, 1.01);
        assert!(config.with_entropy(true).compute_entropy);
    }
}
