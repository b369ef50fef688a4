//! Worksheet reading.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use super::error::IngestError;

/// One named worksheet: a header row plus the data rows below it.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<(usize, Vec<Data>)>,
}

impl Worksheet {
    /// Opens `path` and reads the worksheet called `name`.
    ///
    /// The first row of the used range is the header. Fully empty rows are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be decoded or has no sheet
    /// named `name`.
    pub fn open(path: &Path, name: &str) -> Result<Self, IngestError> {
        let workbook_error = |source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(IngestError::SheetNotFound(name.to_string()));
        }
        let range = workbook.worksheet_range(name).map_err(workbook_error)?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|header| header.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();
        let rows = rows.map(<[Data]>::to_vec).collect();

        let sheet = Self::from_rows(name, headers, rows);
        debug!(sheet = name, rows = sheet.len(), "Worksheet read");
        Ok(sheet)
    }

    /// Builds a worksheet from already decoded cells.
    ///
    /// Row numbers are assigned before empty rows are dropped, so they keep
    /// pointing at the spreadsheet row.
    #[must_use]
    pub fn from_rows(name: &str, headers: Vec<String>, rows: Vec<Vec<Data>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| (index + 2, row))
            .filter(|(_, row)| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .collect();
        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    /// Worksheet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column whose header is exactly `header`.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if no header matches.
    pub fn column(&self, header: &str) -> Result<usize, IngestError> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| IngestError::MissingColumn {
                sheet: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Iterates data rows with their 1-based spreadsheet row number.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Data])> {
        self.rows.iter().map(|(number, row)| (*number, row.as_slice()))
    }
}

/// Returns the cell at `column`, treating short rows as empty.
#[must_use]
pub fn cell(row: &[Data], column: usize) -> &Data {
    static EMPTY: Data = Data::Empty;
    row.get(column).unwrap_or(&EMPTY)
}
