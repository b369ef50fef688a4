//! Ingestion error types.

use std::path::PathBuf;

use marketdata_shared::AppError;
use thiserror::Error;

/// Errors that can occur while reading a worksheet into records.
///
/// Row numbers are 1-based spreadsheet rows; the header is row 1.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The workbook path does not exist.
    #[error("File not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// The workbook could not be opened or decoded.
    #[error("Cannot read workbook {}: {source}", path.display())]
    Workbook {
        /// Workbook path.
        path: PathBuf,
        /// Reader error.
        #[source]
        source: calamine::Error,
    },

    /// The named worksheet is not in the workbook.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// A required header is absent.
    #[error("Worksheet {sheet} has no column {column}")]
    MissingColumn {
        /// Worksheet name.
        sheet: String,
        /// Column header.
        column: String,
    },

    /// A date cell does not match the accepted pattern.
    #[error("Worksheet {sheet}, row {row}: {value:?} is not a date in format {format}")]
    InvalidDate {
        /// Worksheet name.
        sheet: String,
        /// Spreadsheet row.
        row: usize,
        /// Cell text.
        value: String,
        /// Expected pattern.
        format: String,
    },

    /// A numeric cell could not be coerced, or is a price too small to store.
    #[error("Worksheet {sheet}, row {row}, column {column}: {value:?} is not a number")]
    InvalidNumber {
        /// Worksheet name.
        sheet: String,
        /// Spreadsheet row.
        row: usize,
        /// Column header.
        column: String,
        /// Cell text.
        value: String,
    },

    /// A product identifier cell is empty or fractional.
    #[error("Worksheet {sheet}, row {row}: {value:?} is not a product identifier")]
    InvalidIdentifier {
        /// Worksheet name.
        sheet: String,
        /// Spreadsheet row.
        row: usize,
        /// Cell text.
        value: String,
    },

    /// The identifier column mixes numbers and text.
    #[error("Worksheet {sheet} mixes numeric and text product identifiers")]
    MixedIdentifierKinds {
        /// Worksheet name.
        sheet: String,
    },
}

impl IngestError {
    /// Returns true if the workbook itself was not found.
    #[must_use]
    pub const fn is_missing_source(&self) -> bool {
        matches!(self, Self::MissingSource(_))
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::MissingSource(_) => Self::MissingSource(err.to_string()),
            _ => Self::Parse(err.to_string()),
        }
    }
}
