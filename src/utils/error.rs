use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortsError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Empty directory document")]
    EmptyInput,

    #[error("Invalid coordinate format: {raw:?}")]
    InvalidCoordinateFormat { raw: String },

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Could not resolve {location}: {reason}")]
    ResolutionError { location: String, reason: String },

    #[error("Invalid value for {field}: {reason} (got {value:?})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PortsError>;
