use thiserror::Error;

#[derive(Error, Debug)]
pub enum SladError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stream '{stream}' is enabled but could not be opened at '{path}'")]
    MissingStream { stream: String, path: String },

    #[error("Schema Error in stream '{stream}', field '{field}': {detail}")]
    Schema {
        stream: String,
        field: String,
        detail: String,
    },

    #[error("Parse Error in stream '{stream}', field '{field}', line {line}: '{value}'")]
    Parse {
        stream: String,
        field: String,
        line: u64,
        value: String,
    },

    #[error("Join Error: stream '{stream}' has {found} records, primary stream has {expected}")]
    Join {
        stream: String,
        expected: usize,
        found: usize,
    },

    #[error("Binning Mismatch: {0}")]
    Binning(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type SladResult<T> = Result<T, SladError>;
