use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("Unparsable date: '{input}'")]
    UnparsableDate { input: String },

    #[error("Malformed elevation source: {0}")]
    MalformedElevationSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    /// Whether the error only invalidates the row it came from.
    ///
    /// Row-level errors are absorbed by the batch pipeline as skipped rows;
    /// everything else aborts the run.
    pub fn is_row_level(&self) -> bool {
        match self {
            ProcessingError::MissingRequiredField { .. }
            | ProcessingError::UnparsableDate { .. } => true,
            ProcessingError::Csv(e) => !e.is_io_error(),
            _ => false,
        }
    }
}
