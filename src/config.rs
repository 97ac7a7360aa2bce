use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};

/// The ten largest African economies, as named in the World Bank dataset.
pub const TOP_TEN_AFRICAN_ECONOMIES: [&str; 10] = [
    "Nigeria",
    "Egypt, Arab Rep.",
    "South Africa",
    "Algeria",
    "Morocco",
    "Kenya",
    "Ethiopia",
    "Ghana",
    "Tanzania",
    "Angola",
];

/// 2020 total population (worldometer), used to extend the population chart past
/// the last year in the dataset.
pub const POPULATION_2020: [(&str, f64); 10] = [
    ("Algeria", 43_851_044.0),
    ("Angola", 32_866_272.0),
    ("Egypt, Arab Rep.", 102_334_404.0),
    ("Ethiopia", 114_963_588.0),
    ("Ghana", 31_072_940.0),
    ("Kenya", 53_771_296.0),
    ("Morocco", 36_910_560.0),
    ("Nigeria", 206_139_589.0),
    ("South Africa", 59_308_690.0),
    ("Tanzania", 59_734_218.0),
];

/// Inputs shared by every figure builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
    #[serde(default = "default_population_2020")]
    pub population_2020: BTreeMap<String, f64>,
    #[serde(default = "default_country_column")]
    pub country_column: String,
    #[serde(default = "default_indicator_column")]
    pub indicator_column: String,
}

fn default_roster() -> Vec<String> {
    TOP_TEN_AFRICAN_ECONOMIES.iter().map(|c| c.to_string()).collect()
}

fn default_population_2020() -> BTreeMap<String, f64> {
    POPULATION_2020
        .iter()
        .map(|(country, pop)| (country.to_string(), *pop))
        .collect()
}

fn default_country_column() -> String {
    "country_name_attr".to_string()
}

fn default_indicator_column() -> String {
    "indicator_code".to_string()
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            population_2020: default_population_2020(),
            country_column: default_country_column(),
            indicator_column: default_indicator_column(),
        }
    }
}

impl FigureConfig {
    /// Load a config from a JSON file; absent fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| FigureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn in_roster(&self, country: &str) -> bool {
        self.roster.iter().any(|c| c == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_roster() {
        let config = FigureConfig::default();
        assert_eq!(config.roster.len(), 10);
        for country in &config.roster {
            assert!(config.population_2020.contains_key(country), "{country}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FigureConfig =
            serde_json::from_str(r#"{"population_2020": {"Kenya": 1.0}}"#).unwrap();
        assert_eq!(config.roster, default_roster());
        assert_eq!(config.population_2020.len(), 1);
        assert_eq!(config.country_column, "country_name_attr");
    }

    #[test]
    fn test_in_roster() {
        let config = FigureConfig::default();
        assert!(config.in_roster("Egypt, Arab Rep."));
        assert!(!config.in_roster("Zambia"));
    }
}
