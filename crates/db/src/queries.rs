//! Closed catalog of SQL statements run against the analytical store.
//!
//! Amounts are stored as integer cents and prices as integer ten-thousandths,
//! so every aggregate is exact. Dates are ISO `YYYY-MM-DD` text, which sorts
//! chronologically.

/// Relations the store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Base table of sales transactions.
    Sales,
    /// Base table of catalog entries.
    Products,
    /// View: totals per day.
    DailySales,
    /// View: totals per month.
    MonthlySales,
    /// View: revenue per (price per kg, product name).
    SalesPerProduct,
    /// View: totals per time-of-day bucket.
    SalesByTimeRange,
}

impl Relation {
    /// SQL name of the relation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Products => "products",
            Self::DailySales => "daily_sales",
            Self::MonthlySales => "monthly_sales",
            Self::SalesPerProduct => "sales_per_product",
            Self::SalesByTimeRange => "sales_by_time_range",
        }
    }

    /// Returns true for derived views.
    #[must_use]
    pub const fn is_view(self) -> bool {
        !matches!(self, Self::Sales | Self::Products)
    }

    pub(crate) const fn count_sql(self) -> &'static str {
        match self {
            Self::Sales => "SELECT COUNT(*) FROM sales",
            Self::Products => "SELECT COUNT(*) FROM products",
            Self::DailySales => "SELECT COUNT(*) FROM daily_sales",
            Self::MonthlySales => "SELECT COUNT(*) FROM monthly_sales",
            Self::SalesPerProduct => "SELECT COUNT(*) FROM sales_per_product",
            Self::SalesByTimeRange => "SELECT COUNT(*) FROM sales_by_time_range",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Introspection
// ============================================================================

pub(crate) const RELATION_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1";

pub(crate) const TABLE_NAMES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

pub(crate) const KEY_COLUMN_TYPE: &str =
    "SELECT type FROM pragma_table_info(?1) WHERE name = 'product_id'";

// ============================================================================
// Loading
// ============================================================================

pub(crate) const DROP_SALES: &str = "DROP TABLE IF EXISTS sales";

pub(crate) const CREATE_SALES_INTEGER_KEY: &str = "CREATE TABLE sales (
    sale_date    TEXT    NOT NULL,
    amount_cents INTEGER NOT NULL,
    product_id   INTEGER NOT NULL,
    time_range   TEXT    NOT NULL
)";

pub(crate) const CREATE_SALES_TEXT_KEY: &str = "CREATE TABLE sales (
    sale_date    TEXT    NOT NULL,
    amount_cents INTEGER NOT NULL,
    product_id   TEXT    NOT NULL,
    time_range   TEXT    NOT NULL
)";

pub(crate) const INSERT_SALE: &str =
    "INSERT INTO sales (sale_date, amount_cents, product_id, time_range) VALUES (?1, ?2, ?3, ?4)";

pub(crate) const DROP_PRODUCTS: &str = "DROP TABLE IF EXISTS products";

pub(crate) const CREATE_PRODUCTS_INTEGER_KEY: &str = "CREATE TABLE products (
    product_id  INTEGER NOT NULL,
    name        TEXT    NOT NULL,
    price_units INTEGER
)";

pub(crate) const CREATE_PRODUCTS_TEXT_KEY: &str = "CREATE TABLE products (
    product_id  TEXT    NOT NULL,
    name        TEXT    NOT NULL,
    price_units INTEGER
)";

pub(crate) const INSERT_PRODUCT: &str =
    "INSERT INTO products (product_id, name, price_units) VALUES (?1, ?2, ?3)";

// ============================================================================
// Report catalog
// ============================================================================

pub(crate) const BEST_SELLING_DAY: &str = "SELECT sale_date, SUM(amount_cents) AS total_cents
    FROM sales
    GROUP BY sale_date
    ORDER BY total_cents DESC
    LIMIT 1";

pub(crate) const CREATE_DAILY_SALES_VIEW: &str = "CREATE VIEW IF NOT EXISTS daily_sales AS
    SELECT sale_date, SUM(amount_cents) AS total_cents
    FROM sales
    GROUP BY sale_date
    ORDER BY sale_date";

pub(crate) const SELECT_DAILY_SALES: &str =
    "SELECT sale_date, total_cents FROM daily_sales ORDER BY sale_date";

pub(crate) const CREATE_MONTHLY_SALES_VIEW: &str = "CREATE VIEW IF NOT EXISTS monthly_sales AS
    SELECT strftime('%m/%Y', sale_date) AS month,
           SUM(amount_cents) AS total_cents
    FROM sales
    GROUP BY month
    ORDER BY month";

pub(crate) const SELECT_MONTHLY_SALES: &str =
    "SELECT month, total_cents FROM monthly_sales ORDER BY month";

pub(crate) const CREATE_SALES_PER_PRODUCT_VIEW: &str = "CREATE VIEW IF NOT EXISTS sales_per_product AS
    SELECT p.price_units AS price_units,
           SUM(s.amount_cents) AS total_cents,
           p.name AS product_name
    FROM sales s
    INNER JOIN products p ON s.product_id = p.product_id
    GROUP BY p.price_units, p.name
    ORDER BY total_cents DESC";

pub(crate) const SELECT_SALES_PER_PRODUCT: &str =
    "SELECT product_name, price_units, total_cents FROM sales_per_product ORDER BY total_cents DESC";

/// First joined product whose price cannot divide an amount.
pub(crate) const FIRST_UNPRICED_SOLD_PRODUCT: &str = "SELECT p.name
    FROM sales s
    INNER JOIN products p ON s.product_id = p.product_id
    WHERE p.price_units IS NULL OR p.price_units = 0
    LIMIT 1";

/// Weight is taken per row (in micro-kilograms) and then summed:
/// `amount_cents * 10^8 / price_units` = (cents / 10^2) / (units / 10^4) kg * 10^6.
/// The quotient and remainder are scaled separately so large amounts do not
/// overflow into REAL.
pub(crate) const BEST_SELLING_PRODUCT_IN_KG: &str = "SELECT p.name,
           COUNT(p.product_id),
           SUM(s.amount_cents) AS total_cents,
           SUM((s.amount_cents / p.price_units) * 100000000
               + ((s.amount_cents % p.price_units) * 100000000) / p.price_units) AS weight_micro_kg
    FROM sales s
    INNER JOIN products p ON s.product_id = p.product_id
    GROUP BY p.name
    ORDER BY weight_micro_kg DESC
    LIMIT 1";

pub(crate) const BEST_PRODUCT_SELLING_DAY: &str = "SELECT s.sale_date,
           SUM(s.amount_cents) AS total_cents,
           COUNT(p.product_id)
    FROM sales s
    INNER JOIN products p ON s.product_id = p.product_id
    WHERE p.name = ?1
    GROUP BY s.sale_date
    ORDER BY total_cents DESC
    LIMIT 1";

pub(crate) const CREATE_SALES_BY_TIME_RANGE_VIEW: &str = "CREATE VIEW IF NOT EXISTS sales_by_time_range AS
    SELECT time_range, SUM(amount_cents) AS total_cents
    FROM sales
    GROUP BY time_range
    ORDER BY time_range";

pub(crate) const SELECT_SALES_BY_TIME_RANGE: &str =
    "SELECT time_range, total_cents FROM sales_by_time_range ORDER BY time_range";
