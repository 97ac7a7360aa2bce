use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};

use crate::config::FigureConfig;
use crate::data::Table;
use crate::error::Result;
use crate::source;

/// Year columns every chart reads.
pub const YEAR_COLUMNS: [&str; 3] = ["1990", "2000", "2010"];

/// Columns kept when a chart does not ask for its own: the country column and
/// [`YEAR_COLUMNS`].
pub fn default_keep_columns(config: &FigureConfig) -> Vec<&str> {
    std::iter::once(config.country_column.as_str())
        .chain(YEAR_COLUMNS)
        .collect()
}

/// Read the dataset at `dataset_path` and reduce it to the roster countries and
/// `indicator_codes`, keeping only `keep_columns`.
pub fn select(
    dataset_path: &Path,
    indicator_codes: &[&str],
    keep_columns: &[&str],
    config: &FigureConfig,
) -> Result<Table> {
    let table = source::load_table(dataset_path)?;
    select_table(&table, indicator_codes, keep_columns, config)
}

/// Filter/select over an already loaded table.
///
/// Rows keep their input order. When a (country, indicator) pair occurs more than
/// once only the first row is kept.
pub fn select_table(
    table: &Table,
    indicator_codes: &[&str],
    keep_columns: &[&str],
    config: &FigureConfig,
) -> Result<Table> {
    let country_idx = table.column_index(&config.country_column)?;
    let indicator_idx = table.column_index(&config.indicator_column)?;
    for col in keep_columns {
        table.column_index(col)?;
    }

    if indicator_codes.is_empty() {
        warn!("no indicator codes requested, selection is empty");
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let filtered = table.filter_rows(|row| {
        let country = row.get(country_idx).map(String::as_str).unwrap_or("");
        let indicator = row.get(indicator_idx).map(String::as_str).unwrap_or("");

        if !config.in_roster(country) || !indicator_codes.contains(&indicator) {
            return false;
        }
        if !seen.insert((country.to_string(), indicator.to_string())) {
            warn!("duplicate row for {country} / {indicator}, keeping the first");
            return false;
        }
        true
    });

    debug!(
        "selected {} of {} rows for {:?}",
        filtered.len(),
        table.len(),
        indicator_codes
    );
    filtered.project(keep_columns)
}
