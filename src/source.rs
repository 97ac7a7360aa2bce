use std::io::Read;
use std::path::Path;

use log::debug;

use crate::data::Table;
use crate::error::{FigureError, Result};

/// Load a dataset file into a [`Table`]. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by one row per (country, indicator)
/// * `.json` – `[{ "country_name_attr": ..., "indicator_code": ..., "1990": ... }, ...]`
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).map_err(|source| io_error(path, source))?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
            let value: serde_json::Value = serde_json::from_str(&text)?;
            Table::from_json(&value)?
        }
        other => return Err(FigureError::UnsupportedFormat(other.to_string())),
    };

    debug!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Read CSV text with a header row. Rows may be ragged; short rows read as empty cells.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

fn io_error(path: &Path, source: std::io::Error) -> FigureError {
    FigureError::Io {
        path: path.display().to_string(),
        source,
    }
}
