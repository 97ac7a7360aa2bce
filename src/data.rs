use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{FigureError, Result};
use crate::year::parse_year_label;

/// A raw table of string cells, as read from the indicator dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a Table from a JSON array of objects.
    ///
    /// Headers come from the first object; later objects missing a key get an empty cell.
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or(FigureError::InvalidRecords("a JSON array of objects"))?;

        let Some(first) = array.first() else {
            return Ok(Self::default());
        };

        let first_obj = first
            .as_object()
            .ok_or(FigureError::InvalidRecords("an array of JSON objects"))?;
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item
                .as_object()
                .ok_or(FigureError::InvalidRecords("an array of JSON objects"))?;

            let row = headers
                .iter()
                .map(|header| match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column named `name` (ASCII case-insensitive).
    ///
    /// A year name such as `1990` also matches a header labelled with that year in
    /// another accepted form, e.g. `1990 [YR1990]`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        if let Some(idx) = self
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
        {
            return Ok(idx);
        }
        match parse_year_label(name) {
            Ok(year) => self
                .year_column_index(year)
                .ok_or_else(|| FigureError::MissingColumn(name.to_string())),
            Err(_) => Err(FigureError::MissingColumn(name.to_string())),
        }
    }

    /// Index of the first column whose header parses as `year`.
    pub fn year_column_index(&self, year: i32) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| parse_year_label(h).map_or(false, |y| y == year))
    }

    /// Cell at (`row`, `col`); short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok((0..self.rows.len()).map(|r| self.cell(r, idx)).collect())
    }

    /// Keep only the rows matching `predicate`, preserving order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&[String]) -> bool,
    {
        Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| predicate(row.as_slice()))
                .cloned()
                .collect(),
        }
    }

    /// Restrict the table to `columns`, in the order given.
    pub fn project(&self, columns: &[&str]) -> Result<Table> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<_>>>()?;

        let headers = indices.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = (0..self.rows.len())
            .map(|r| indices.iter().map(|&i| self.cell(r, i).to_string()).collect())
            .collect();

        Ok(Table { headers, rows })
    }

    /// Append a column whose value for each row is looked up by that row's `key_col`.
    /// Rows with no entry in `values` get an empty cell.
    pub fn append_keyed_column(
        &mut self,
        key_col: &str,
        new_col: &str,
        values: &BTreeMap<String, f64>,
    ) -> Result<()> {
        let key_idx = self.column_index(key_col)?;
        for row in &mut self.rows {
            let key = row.get(key_idx).map(String::as_str).unwrap_or("");
            let cell = values.get(key).map(|v| v.to_string()).unwrap_or_default();
            row.push(cell);
        }
        self.headers.push(new_col.to_string());
        Ok(())
    }
}

/// Parse a raw cell into a value; empty, `..` and non-numeric cells are missing.
pub fn parse_value(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == ".." {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
