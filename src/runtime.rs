// Runtime executor: select + reshape for every dashboard chart

use std::path::Path;

use log::{debug, info};

use crate::charts::{self, GDP, GDP_PER_CAPITA, LIFE_EXPECTANCY, POPULATION};
use crate::config::FigureConfig;
use crate::error::Result;
use crate::figure::Figure;
use crate::select::{default_keep_columns, select, YEAR_COLUMNS};

/// Build every dashboard figure from the dataset at `dataset_path`.
///
/// Figures come back in a fixed order: population, GDP bar, GDP per capita, life
/// expectancy, bubble. The dataset is re-read for each chart.
pub fn return_figures(dataset_path: &Path, config: &FigureConfig) -> Result<Vec<Figure>> {
    let mut figures = Vec::with_capacity(5);
    let year_columns = default_keep_columns(config);

    let filtered = select(dataset_path, &[POPULATION], &year_columns, config)?;
    figures.push(charts::population_figure(&filtered, config)?);

    let filtered = select(dataset_path, &[GDP], &year_columns, config)?;
    figures.push(charts::gdp_bar_figure(&filtered, config)?);

    let filtered = select(dataset_path, &[GDP_PER_CAPITA], &year_columns, config)?;
    figures.push(charts::gdp_per_capita_figure(&filtered, config)?);

    let filtered = select(dataset_path, &[LIFE_EXPECTANCY], &year_columns, config)?;
    figures.push(charts::life_expectancy_figure(&filtered, config)?);

    let bubble_columns: Vec<&str> = [
        config.country_column.as_str(),
        config.indicator_column.as_str(),
    ]
    .into_iter()
    .chain(YEAR_COLUMNS)
    .collect();
    let filtered = select(
        dataset_path,
        &[GDP_PER_CAPITA, LIFE_EXPECTANCY, POPULATION],
        &bubble_columns,
        config,
    )?;
    debug!("bubble selection: {} rows", filtered.len());
    figures.push(charts::bubble_figure(&filtered, config)?);

    info!(
        "built {} figures from {}",
        figures.len(),
        dataset_path.display()
    );
    Ok(figures)
}
