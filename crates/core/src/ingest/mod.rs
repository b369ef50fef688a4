//! Spreadsheet ingestion.
//!
//! A workbook is read one named worksheet at a time:
//! - `sheet` - open the workbook and locate headers/columns
//! - `normalize` - coerce cells into dates, amounts, prices and ids
//! - `records` - build typed sales and product record sets

pub mod error;
pub mod normalize;
pub mod records;
pub mod sheet;

use std::path::Path;

use marketdata_shared::config::SourceConfig;

pub use error::IngestError;
pub use records::{ProductRecord, ProductSheet, SalesRecord, SalesSheet};
pub use sheet::Worksheet;

/// Fails with [`IngestError::MissingSource`] when `path` does not exist.
pub fn ensure_source_exists(path: &Path) -> Result<(), IngestError> {
    if path.exists() {
        Ok(())
    } else {
        Err(IngestError::MissingSource(path.to_path_buf()))
    }
}

/// Reads and normalizes the sales worksheet of the configured workbook.
///
/// # Errors
///
/// Returns `MissingSource` when the file is absent, otherwise a parse error
/// for a missing sheet, missing column or uncoercible cell.
pub fn read_sales(source: &SourceConfig) -> Result<SalesSheet, IngestError> {
    ensure_source_exists(&source.path)?;
    let sheet = Worksheet::open(&source.path, &source.sales_sheet)?;
    SalesSheet::from_worksheet(&sheet, &source.date_format)
}

/// Reads the products worksheet of the configured workbook.
///
/// # Errors
///
/// Same conditions as [`read_sales`].
pub fn read_products(source: &SourceConfig) -> Result<ProductSheet, IngestError> {
    ensure_source_exists(&source.path)?;
    let sheet = Worksheet::open(&source.path, &source.products_sheet)?;
    ProductSheet::from_worksheet(&sheet)
}
