//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input spreadsheet does not exist.
    #[error("Source not found: {0}")]
    MissingSource(String),

    /// Sheet or column shape mismatch, or a cell that failed coercion.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Query against a table or view that has not been created yet.
    #[error("Missing relation: {0}")]
    MissingRelation(String),

    /// Join or arithmetic over incompatible types.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Zero or null divisor during a weight computation.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Analytical store error.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingSource(_) => 66,
            Self::Parse(_) | Self::TypeMismatch(_) | Self::DivisionByZero(_) => 65,
            Self::Config(_) => 78,
            Self::MissingRelation(_) | Self::Database(_) | Self::Internal(_) => 70,
        }
    }

    /// Returns the error code used in diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSource(_) => "MISSING_SOURCE",
            Self::Parse(_) => "PARSE_ERROR",
            Self::MissingRelation(_) => "MISSING_RELATION",
            Self::TypeMismatch(_) => "TYPE_MISMATCH",
            Self::DivisionByZero(_) => "DIVISION_BY_ZERO",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
