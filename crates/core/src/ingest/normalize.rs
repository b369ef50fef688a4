//! Cell coercion into calendar dates, decimals and product identifiers.
//!
//! Each function returns `None` when a cell cannot be coerced; the record
//! builders attach sheet, row and column to the error.

use std::str::FromStr;

use calamine::{Data, DataType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use marketdata_shared::types::{Money, Price, ProductId};

/// Parses a sale date.
///
/// Text cells must match `format` exactly (surrounding whitespace ignored).
/// Two-digit years follow the POSIX pivot: 69-99 are 1969-1999, 00-68 are
/// 2000-2068. Cells the workbook already stores as dates are accepted as-is.
#[must_use]
pub fn parse_date(cell: &Data, format: &str) -> Option<NaiveDate> {
    match cell {
        Data::String(text) => {
            let date = NaiveDate::parse_from_str(text.trim(), format).ok()?;
            if format.contains("%y") {
                posix_century(date)
            } else {
                Some(date)
            }
        }
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

/// chrono maps `%y` 00-69 to 2000-2069; POSIX moves 69 to 1969.
fn posix_century(date: NaiveDate) -> Option<NaiveDate> {
    if date.year() == 2069 {
        date.with_year(1969)
    } else {
        Some(date)
    }
}

/// Coerces a numeric or numeric-text cell to a decimal.
#[must_use]
pub fn parse_decimal(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Int(value) => Some(Decimal::from(*value)),
        Data::Float(value) => Decimal::from_f64_retain(*value),
        Data::String(text) => {
            let text = text.trim();
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
        }
        _ => None,
    }
}

/// Coerces a sale amount and rounds it to two fractional digits.
#[must_use]
pub fn parse_amount(cell: &Data) -> Option<Money> {
    parse_decimal(cell).map(Money::new)
}

/// Coerces a price per kilogram, kept at four fractional digits.
///
/// A non-zero price that rounds to zero at that precision is rejected.
#[must_use]
pub fn parse_price(cell: &Data) -> Option<Price> {
    let value = parse_decimal(cell)?;
    let price = Price::new(value);
    (value.is_zero() || !price.is_zero()).then_some(price)
}

/// Coerces a product identifier.
///
/// Whole numbers (including floats with no fractional part) become
/// [`ProductId::Numeric`]; non-empty text becomes [`ProductId::Text`]
/// exactly as written, so `" P1"` and `"P1"` are different products.
#[must_use]
pub fn parse_product_id(cell: &Data) -> Option<ProductId> {
    match cell {
        Data::Int(id) => Some(ProductId::Numeric(*id)),
        Data::Float(value) => {
            let id = Decimal::from_f64_retain(*value)?;
            if id.fract().is_zero() {
                id.to_i64().map(ProductId::Numeric)
            } else {
                None
            }
        }
        Data::String(text) if !text.is_empty() => Some(ProductId::Text(text.clone())),
        _ => None,
    }
}

/// Reads a free-text cell; numbers are rendered, empty cells become "".
#[must_use]
pub fn parse_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
