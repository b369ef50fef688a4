//! Typed sales and product record sets.

use calamine::{Data, DataType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use marketdata_shared::types::{KeyKind, Money, Price, ProductId};

use super::error::IngestError;
use super::normalize::{parse_amount, parse_date, parse_price, parse_product_id, parse_text};
use super::sheet::{Worksheet, cell};

/// Column headers of the sales worksheet.
pub mod sales_columns {
    /// Transaction date.
    pub const DATE: &str = "DATA";
    /// Sale amount.
    pub const AMOUNT: &str = "VALOR_VENDA";
    /// Product identifier.
    pub const PRODUCT_ID: &str = "ID_PRODUTO";
    /// Time-of-day bucket.
    pub const TIME_RANGE: &str = "FAIXA_HORARIO";
}

/// Column headers of the products worksheet.
pub mod product_columns {
    /// Product identifier.
    pub const PRODUCT_ID: &str = "ID_PRODUTO";
    /// Product name.
    pub const NAME: &str = "NOME_PRODUTO";
    /// Price per kilogram.
    pub const PRICE_PER_KG: &str = "PREÇO_KG";
}

/// One sales transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Transaction date.
    pub sale_date: NaiveDate,
    /// Sale amount, two fractional digits.
    pub amount: Money,
    /// Product sold.
    pub product_id: ProductId,
    /// Time-of-day bucket label, verbatim from the sheet.
    pub time_range: String,
}

/// One product catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Price per kilogram; `None` when the cell is empty.
    pub price_per_kg: Option<Price>,
}

/// Sales rows of a worksheet plus the kind of their product keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSheet {
    /// Records in sheet order.
    pub records: Vec<SalesRecord>,
    /// Kind shared by every product key.
    pub key_kind: KeyKind,
}

/// Product rows of a worksheet plus the kind of their product keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSheet {
    /// Records in sheet order.
    pub records: Vec<ProductRecord>,
    /// Kind shared by every product key.
    pub key_kind: KeyKind,
}

/// Determines the key kind of a column; an empty column is `Text`.
fn key_kind<'a>(
    sheet: &Worksheet,
    mut ids: impl Iterator<Item = &'a ProductId>,
) -> Result<KeyKind, IngestError> {
    let Some(first) = ids.next().map(ProductId::kind) else {
        return Ok(KeyKind::Text);
    };
    if ids.all(|id| id.kind() == first) {
        Ok(first)
    } else {
        Err(IngestError::MixedIdentifierKinds {
            sheet: sheet.name().to_string(),
        })
    }
}

fn product_id_at(sheet: &Worksheet, row: usize, value: &Data) -> Result<ProductId, IngestError> {
    parse_product_id(value).ok_or_else(|| IngestError::InvalidIdentifier {
        sheet: sheet.name().to_string(),
        row,
        value: value.to_string(),
    })
}

impl SalesSheet {
    /// Builds sales records from a worksheet.
    ///
    /// Dates must match `date_format`; amounts are rounded to two digits.
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the first offending cell.
    pub fn from_worksheet(sheet: &Worksheet, date_format: &str) -> Result<Self, IngestError> {
        let date_col = sheet.column(sales_columns::DATE)?;
        let amount_col = sheet.column(sales_columns::AMOUNT)?;
        let id_col = sheet.column(sales_columns::PRODUCT_ID)?;
        let range_col = sheet.column(sales_columns::TIME_RANGE)?;

        let mut records = Vec::with_capacity(sheet.len());
        for (row, cells) in sheet.rows() {
            let date_cell = cell(cells, date_col);
            let sale_date =
                parse_date(date_cell, date_format).ok_or_else(|| IngestError::InvalidDate {
                    sheet: sheet.name().to_string(),
                    row,
                    value: date_cell.to_string(),
                    format: date_format.to_string(),
                })?;

            let amount_cell = cell(cells, amount_col);
            let amount = parse_amount(amount_cell).ok_or_else(|| IngestError::InvalidNumber {
                sheet: sheet.name().to_string(),
                row,
                column: sales_columns::AMOUNT.to_string(),
                value: amount_cell.to_string(),
            })?;

            records.push(SalesRecord {
                sale_date,
                amount,
                product_id: product_id_at(sheet, row, cell(cells, id_col))?,
                time_range: parse_text(cell(cells, range_col)),
            });
        }

        let key_kind = key_kind(sheet, records.iter().map(|r| &r.product_id))?;
        debug!(sheet = sheet.name(), records = records.len(), %key_kind, "Sales normalized");
        Ok(Self { records, key_kind })
    }
}

impl ProductSheet {
    /// Builds product records from a worksheet.
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the first offending cell.
    pub fn from_worksheet(sheet: &Worksheet) -> Result<Self, IngestError> {
        let id_col = sheet.column(product_columns::PRODUCT_ID)?;
        let name_col = sheet.column(product_columns::NAME)?;
        let price_col = sheet.column(product_columns::PRICE_PER_KG)?;

        let mut records = Vec::with_capacity(sheet.len());
        for (row, cells) in sheet.rows() {
            let price_cell = cell(cells, price_col);
            let price_per_kg = if price_cell.is_empty() {
                None
            } else {
                Some(
                    parse_price(price_cell).ok_or_else(|| IngestError::InvalidNumber {
                        sheet: sheet.name().to_string(),
                        row,
                        column: product_columns::PRICE_PER_KG.to_string(),
                        value: price_cell.to_string(),
                    })?,
                )
            };

            records.push(ProductRecord {
                product_id: product_id_at(sheet, row, cell(cells, id_col))?,
                name: parse_text(cell(cells, name_col)),
                price_per_kg,
            });
        }

        let key_kind = key_kind(sheet, records.iter().map(|r| &r.product_id))?;
        debug!(sheet = sheet.name(), records = records.len(), %key_kind, "Products read");
        Ok(Self { records, key_kind })
    }
}
