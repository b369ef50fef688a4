//! Report data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use marketdata_shared::types::{Kilograms, Money, Price};

/// Day label format used on read (`dd/mm/yyyy`).
pub const DAY_LABEL_FORMAT: &str = "%d/%m/%Y";

/// Month label format (`mm/yyyy`).
pub const MONTH_LABEL_FORMAT: &str = "%m/%Y";

/// Formats a date as a `dd/mm/yyyy` label.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

/// Serializes dates as `dd/mm/yyyy` labels.
mod day_label_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DAY_LABEL_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DAY_LABEL_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let label = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&label, DAY_LABEL_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Total sales for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Transaction date.
    #[serde(with = "day_label_serde")]
    pub date: NaiveDate,
    /// Sum of sale amounts.
    pub total: Money,
}

impl DailyTotal {
    /// `dd/mm/yyyy` label of the day.
    #[must_use]
    pub fn label(&self) -> String {
        day_label(self.date)
    }
}

/// Total sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `mm/yyyy` label.
    pub month: String,
    /// Sum of sale amounts.
    pub total: Money,
}

/// Revenue of one (price per kilogram, product name) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRevenue {
    /// Product name.
    pub product_name: String,
    /// Price per kilogram.
    pub price_per_kg: Option<Price>,
    /// Sum of sale amounts.
    pub total: Money,
}

/// Product ranked by weight sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWeight {
    /// Product name.
    pub product_name: String,
    /// Number of matching sales rows.
    pub sale_count: i64,
    /// Sum of sale amounts.
    pub total: Money,
    /// Sum over rows of amount / price per kilogram.
    pub weight: Kilograms,
}

/// Best day for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDay {
    /// Transaction date.
    #[serde(with = "day_label_serde")]
    pub date: NaiveDate,
    /// Sum of sale amounts of the product on that day.
    pub total: Money,
    /// Number of matching sales rows.
    pub sale_count: i64,
}

impl ProductDay {
    /// `dd/mm/yyyy` label of the day.
    #[must_use]
    pub fn label(&self) -> String {
        day_label(self.date)
    }
}

/// Total sales of one time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeTotal {
    /// Bucket label, verbatim from the sheet.
    pub time_range: String,
    /// Sum of sale amounts.
    pub total: Money,
}

/// Result of every catalog operation for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Day with the highest total.
    pub best_selling_day: Option<DailyTotal>,
    /// Totals per day, by date.
    pub daily_sales: Vec<DailyTotal>,
    /// Totals per month, by month.
    pub monthly_sales: Vec<MonthlyTotal>,
    /// Revenue per product, highest first.
    pub sales_per_product: Vec<ProductRevenue>,
    /// Product with the highest weight sold.
    pub best_selling_product_in_kg: Option<ProductWeight>,
    /// Product name used for `best_product_day`.
    pub featured_product: String,
    /// Best day of the featured product.
    pub best_product_day: Option<ProductDay>,
    /// Totals per time-of-day bucket, by label.
    pub sales_by_time_range: Vec<TimeRangeTotal>,
}
