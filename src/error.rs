use thiserror::Error;

/// Errors raised while loading, selecting or reshaping indicator data.
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Column label '{0}' is not a 4-digit year")]
    MalformedYear(String),

    #[error("Input data must be {0}")]
    InvalidRecords(&'static str),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, FigureError>;
