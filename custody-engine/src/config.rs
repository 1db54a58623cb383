use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables with this prefix override file values,
/// e.g. `STRANDS_ITERATIONS=3`.
pub const ENV_PREFIX: &str = "STRANDS";

fn default_iterations() -> u32 {
    1
}

/// Trade settings the ledger forwards to the market on every open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandsConfig {
    /// Fill batching hint passed through to the market.
    #[serde(default = "default_iterations")]
    iterations: u32,
    /// Lower bound of the acceptable total cost per leg.
    #[serde(default)]
    min_total_cost: Decimal,
    /// Upper bound of the acceptable total cost per leg. Unbounded when unset.
    #[serde(default)]
    max_total_cost: Option<Decimal>,
    /// Where committed custody events are appended. Journaling is off when unset.
    #[serde(default)]
    journal_path: Option<PathBuf>,
}

impl Default for StrandsConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            min_total_cost: Decimal::ZERO,
            max_total_cost: None,
            journal_path: None,
        }
    }
}

impl StrandsConfig {
    /// Loads settings from an optional file, then applies `STRANDS_*`
    /// environment overrides. Missing keys fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_cost_bounds(mut self, min: Decimal, max: Option<Decimal>) -> Self {
        self.min_total_cost = min;
        self.max_total_cost = max;
        self
    }

    pub fn with_journal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal_path = Some(path.into());
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn min_total_cost(&self) -> Decimal {
        self.min_total_cost
    }

    pub fn max_total_cost(&self) -> Option<Decimal> {
        self.max_total_cost
    }

    pub fn journal_path(&self) -> Option<&Path> {
        self.journal_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StrandsConfig::default();
        assert_eq!(config.iterations(), 1);
        assert_eq!(config.min_total_cost(), Decimal::ZERO);
        assert_eq!(config.max_total_cost(), None);
        assert!(config.journal_path().is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "iterations = 3\nmin_total_cost = \"0.5\"\nmax_total_cost = \"250\"\njournal_path = \"custody.csv\""
        )
        .unwrap();

        let config = StrandsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.iterations(), 3);
        assert_eq!(config.min_total_cost(), dec!(0.5));
        assert_eq!(config.max_total_cost(), Some(dec!(250)));
        assert_eq!(config.journal_path(), Some(Path::new("custody.csv")));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = StrandsConfig::load(Some(Path::new("/nonexistent/strands.toml")));
        assert!(result.is_err());
    }
}
