//! Table and configuration loading.

use crate::error::CliResult;
use std::path::Path;
use tfl_core::TfError;
use tfl_fluids::{IdealGasTable, PropertyTable, TableData, TableFluidConfig};
use tracing::info;

fn read(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        TfError::Io {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Read a table from JSON, or sample the default synthetic gas when no path is given.
pub fn load_table(path: Option<&Path>) -> CliResult<PropertyTable> {
    let data = match path {
        Some(path) => {
            let data: TableData = serde_json::from_str(&read(path)?)?;
            info!(path = %path.display(), nx = data.nx, ny = data.ny, "loaded table");
            data
        }
        None => {
            info!("no table given, using the synthetic ideal-gas table");
            IdealGasTable::default().data()?
        }
    };
    Ok(PropertyTable::new(data)?)
}

/// Read model settings from YAML; missing keys keep their defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<TableFluidConfig> {
    match path {
        Some(path) => parse_config(&read(path)?),
        None => Ok(TableFluidConfig::default()),
    }
}

fn parse_config(text: &str) -> CliResult<TableFluidConfig> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn save_table(path: &Path, data: &TableData) -> CliResult<()> {
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content).map_err(|source| TfError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config("compute_entropy: true\nsolver:\n  max_iterations: 40\n").unwrap();
        assert!(config.compute_entropy);
        assert_eq!(config.solver.max_iterations, 40);
        assert_eq!(config.solver.rel_tol, 1e-9);
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(matches!(
            parse_config("solver: [1, 2]"),
            Err(CliError::Yaml(_))
        ));
    }

    #[test]
    fn missing_table_reports_path() {
        let err = load_table(Some(Path::new("/nonexistent/table.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/table.json"));
    }

    #[test]
    fn default_table_is_synthetic() {
        let table = load_table(None).unwrap();
        assert_eq!(table.density_axis().len(), 41);
    }
}
