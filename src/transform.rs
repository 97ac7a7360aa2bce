use std::collections::{BTreeMap, HashMap};

use crate::data::{parse_value, Table};
use crate::error::Result;
use crate::year::parse_year_label;

/// One unpivoted cell: the id column values, the year of the source column and its
/// value (if the cell held one).
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedRow {
    pub ids: Vec<String>,
    pub year: i32,
    pub value: Option<f64>,
}

/// (country, year, value)
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// All points for one country, ordered by year.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(i32, f64)>,
}

impl Series {
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|(year, _)| *year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, value)| *value).collect()
    }
}

/// One complete (country, year) observation for the bubble chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleRow {
    pub country: String,
    pub year: i32,
    pub gdp_per_capita: f64,
    pub life_expectancy: f64,
    pub population: f64,
}

/// Indicator codes feeding the three bubble chart dimensions.
#[derive(Debug, Clone, Copy)]
pub struct BubbleIndicators<'a> {
    pub gdp_per_capita: &'a str,
    pub life_expectancy: &'a str,
    pub population: &'a str,
}

/// Unpivot `value_cols` into one row per (table row, value column).
///
/// Output is column-major: every row for the first value column, then every row for
/// the next one.
pub fn melt(table: &Table, id_cols: &[&str], value_cols: &[&str]) -> Result<Vec<MeltedRow>> {
    let id_idx = id_cols
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>>>()?;

    let mut melted = Vec::with_capacity(table.len() * value_cols.len());
    for col in value_cols {
        let col_idx = table.column_index(col)?;
        let year = parse_year_label(&table.headers[col_idx])?;

        for r in 0..table.len() {
            melted.push(MeltedRow {
                ids: id_idx.iter().map(|&i| table.cell(r, i).to_string()).collect(),
                year,
                value: parse_value(table.cell(r, col_idx)),
            });
        }
    }

    Ok(melted)
}

/// Melt with the country as the only id column, dropping missing values.
pub fn melt_long(table: &Table, country_col: &str, value_cols: &[&str]) -> Result<Vec<LongRow>> {
    Ok(melt(table, &[country_col], value_cols)?
        .into_iter()
        .filter_map(|row| {
            let value = row.value?;
            let country = row.ids.into_iter().next()?;
            Some(LongRow {
                country,
                year: row.year,
                value,
            })
        })
        .collect())
}

/// Stable sort, largest value first.
pub fn sort_by_value_desc(rows: &mut [LongRow]) {
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
}

/// Group rows by country. Countries appear in first-seen order; points within a
/// country are ordered by year.
pub fn group_by_country(rows: &[LongRow]) -> Vec<Series> {
    let mut order: Vec<Series> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.country.as_str()).or_insert_with(|| {
            order.push(Series {
                name: row.country.clone(),
                points: Vec::new(),
            });
            order.len() - 1
        });
        order[slot].points.push((row.year, row.value));
    }

    for series in &mut order {
        series.points.sort_by_key(|(year, _)| *year);
    }
    order
}

/// Pivot melted (country, indicator) rows into per (country, year) indicator values.
/// Missing cells are left out of the inner map.
pub fn pivot_indicators(rows: &[MeltedRow]) -> BTreeMap<(String, i32), BTreeMap<String, f64>> {
    let mut pivot: BTreeMap<(String, i32), BTreeMap<String, f64>> = BTreeMap::new();

    for row in rows {
        let [country, indicator] = row.ids.as_slice() else {
            continue;
        };
        let entry = pivot.entry((country.clone(), row.year)).or_default();
        if let Some(value) = row.value {
            entry.entry(indicator.clone()).or_insert(value);
        }
    }

    pivot
}

/// Keep only pivoted rows with a value for all three bubble indicators.
/// Rows come out ordered by (country, year).
pub fn complete_bubble_rows(
    pivot: &BTreeMap<(String, i32), BTreeMap<String, f64>>,
    indicators: BubbleIndicators<'_>,
) -> Vec<BubbleRow> {
    pivot
        .iter()
        .filter_map(|((country, year), values)| {
            Some(BubbleRow {
                country: country.clone(),
                year: *year,
                gdp_per_capita: *values.get(indicators.gdp_per_capita)?,
                life_expectancy: *values.get(indicators.life_expectancy)?,
                population: *values.get(indicators.population)?,
            })
        })
        .collect()
}
