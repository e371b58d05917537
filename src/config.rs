use std::path::PathBuf;

use thiserror::Error;

use crate::views::queries::DEFAULT_CUTOFF_YEAR;

pub const DATA_VAR: &str = "LAYOFFS_DATA";
pub const INDUSTRY_VAR: &str = "LAYOFFS_INDUSTRY";
pub const COUNTRY_VAR: &str = "LAYOFFS_COUNTRY";
pub const CUTOFF_YEAR_VAR: &str = "LAYOFFS_CUTOFF_YEAR";
pub const OUTPUT_VAR: &str = "LAYOFFS_OUTPUT";

pub const DEFAULT_DATA_PATH: &str = "layoffs_data.csv";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, taken from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// `None` selects the first industry in the dataset.
    pub industry: Option<String>,
    /// `None` selects the first country option.
    pub country: Option<String>,
    pub cutoff_year: i32,
    /// `None` writes the dashboard to stdout.
    pub output: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            industry: None,
            country: None,
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            output: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup. Unset and blank variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(DATA_VAR) {
            config.data_path = PathBuf::from(path);
        }
        config.industry = get(INDUSTRY_VAR);
        config.country = get(COUNTRY_VAR);
        if let Some(year) = get(CUTOFF_YEAR_VAR) {
            config.cutoff_year = year.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: CUTOFF_YEAR_VAR,
                    value: year.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        config.output = get(OUTPUT_VAR).map(PathBuf::from);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("layoffs_data.csv"));
        assert_eq!(config.cutoff_year, 2020);
    }

    #[test]
    fn reads_every_variable() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_VAR, "/data/layoffs.parquet"),
            (INDUSTRY_VAR, "Retail"),
            (COUNTRY_VAR, "India"),
            (CUTOFF_YEAR_VAR, " 2022 "),
            (OUTPUT_VAR, "out.json"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/data/layoffs.parquet"));
        assert_eq!(config.industry.as_deref(), Some("Retail"));
        assert_eq!(config.country.as_deref(), Some("India"));
        assert_eq!(config.cutoff_year, 2022);
        assert_eq!(config.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[(INDUSTRY_VAR, "  "), (DATA_VAR, "")])).unwrap();
        assert_eq!(config.industry, None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn rejects_non_numeric_year() {
        let err = DashboardConfig::from_lookup(lookup(&[(CUTOFF_YEAR_VAR, "twenty")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: CUTOFF_YEAR_VAR, ref value, .. } if value == "twenty"
        ));
    }
}
