use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid date for {field}: \"{value}\" (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    #[error("date range is inverted: {from} is after {to}")]
    InvertedDateRange { from: String, to: String },
}
