//! Report repository: the fixed catalog of aggregate queries.
//!
//! Point reports return at most one row. View reports create their view on
//! first use (`CREATE VIEW IF NOT EXISTS`) and read it back in order; the
//! views stay valid because `sales` and `products` are never mutated after
//! loading.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use marketdata_core::reports::{
    DailyTotal, MonthlyTotal, ProductDay, ProductRevenue, ProductWeight, TimeRangeTotal,
};
use marketdata_shared::types::{Kilograms, Money, Price};

use crate::error::StoreError;
use crate::queries::{self, Relation};
use crate::store::{ensure_relations, key_kind};

/// Product name used by [`ReportRepository::best_banana_selling_day`].
pub const BANANA: &str = "Banana";

/// Report repository for sales report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Sales-only reports
    // ========================================================================

    /// Day with the highest total sales.
    ///
    /// Ties are broken by engine order. Returns `None` for an empty table.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` before `sales` is loaded.
    pub async fn best_selling_day(&self) -> Result<Option<DailyTotal>, StoreError> {
        ensure_relations(&self.pool, &[Relation::Sales]).await?;

        let row: Option<(NaiveDate, i64)> = sqlx::query_as(queries::BEST_SELLING_DAY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(daily_total))
    }

    /// Totals per day, ascending by date, via the `daily_sales` view.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` before `sales` is loaded.
    pub async fn daily_sales(&self) -> Result<Vec<DailyTotal>, StoreError> {
        self.ensure_view(Relation::DailySales, queries::CREATE_DAILY_SALES_VIEW, &[Relation::Sales])
            .await?;

        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(queries::SELECT_DAILY_SALES)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(daily_total).collect())
    }

    /// Totals per month, ascending by the `mm/yyyy` label (month before year),
    /// via the `monthly_sales` view.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` before `sales` is loaded.
    pub async fn monthly_sales(&self) -> Result<Vec<MonthlyTotal>, StoreError> {
        self.ensure_view(
            Relation::MonthlySales,
            queries::CREATE_MONTHLY_SALES_VIEW,
            &[Relation::Sales],
        )
        .await?;

        let rows: Vec<(String, i64)> = sqlx::query_as(queries::SELECT_MONTHLY_SALES)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(month, cents)| MonthlyTotal {
                month,
                total: Money::from_cents(cents),
            })
            .collect())
    }

    /// Totals per time-of-day bucket, ascending by label (lexical), via the
    /// `sales_by_time_range` view.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` before `sales` is loaded.
    pub async fn sales_by_time_range(&self) -> Result<Vec<TimeRangeTotal>, StoreError> {
        self.ensure_view(
            Relation::SalesByTimeRange,
            queries::CREATE_SALES_BY_TIME_RANGE_VIEW,
            &[Relation::Sales],
        )
        .await?;

        let rows: Vec<(String, i64)> = sqlx::query_as(queries::SELECT_SALES_BY_TIME_RANGE)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(time_range, cents)| TimeRangeTotal {
                time_range,
                total: Money::from_cents(cents),
            })
            .collect())
    }

    // ========================================================================
    // Sales joined with products
    // ========================================================================

    /// Revenue per (price per kg, product name), highest first, via the
    /// `sales_per_product` view.
    ///
    /// Sales whose product id is not in the catalog are dropped by the join.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` before both tables are loaded and
    /// `TypeMismatch` if their key kinds differ.
    pub async fn sales_per_product(&self) -> Result<Vec<ProductRevenue>, StoreError> {
        self.ensure_joinable().await?;
        self.ensure_view(
            Relation::SalesPerProduct,
            queries::CREATE_SALES_PER_PRODUCT_VIEW,
            &[Relation::Sales, Relation::Products],
        )
        .await?;

        let rows: Vec<(String, Option<i64>, i64)> =
            sqlx::query_as(queries::SELECT_SALES_PER_PRODUCT)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(product_name, price_units, cents)| ProductRevenue {
                product_name,
                price_per_kg: price_units.map(Price::from_units),
                total: Money::from_cents(cents),
            })
            .collect())
    }

    /// Product with the highest weight sold.
    ///
    /// Weight is amount / price per kilogram computed per sales row and then
    /// summed, not total amount / price.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if any sold product has a zero or missing
    /// price, plus the join errors of [`Self::sales_per_product`].
    pub async fn best_selling_product_in_kg(&self) -> Result<Option<ProductWeight>, StoreError> {
        self.ensure_joinable().await?;

        let unpriced: Option<String> = sqlx::query_scalar(queries::FIRST_UNPRICED_SOLD_PRODUCT)
            .fetch_optional(&self.pool)
            .await?;
        if let Some(product) = unpriced {
            return Err(StoreError::DivisionByZero { product });
        }

        let row: Option<(String, i64, i64, i64)> =
            sqlx::query_as(queries::BEST_SELLING_PRODUCT_IN_KG)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(product_name, sale_count, cents, micro_kg)| ProductWeight {
            product_name,
            sale_count,
            total: Money::from_cents(cents),
            weight: Kilograms::from_micros(micro_kg),
        }))
    }

    /// Best day for the product named exactly `product_name` (case-sensitive).
    ///
    /// Returns `None` when no sale matches.
    ///
    /// # Errors
    ///
    /// Same join errors as [`Self::sales_per_product`].
    pub async fn best_product_selling_day(
        &self,
        product_name: &str,
    ) -> Result<Option<ProductDay>, StoreError> {
        self.ensure_joinable().await?;

        let row: Option<(NaiveDate, i64, i64)> = sqlx::query_as(queries::BEST_PRODUCT_SELLING_DAY)
            .bind(product_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(date, cents, sale_count)| ProductDay {
            date,
            total: Money::from_cents(cents),
            sale_count,
        }))
    }

    /// Best day for bananas.
    ///
    /// # Errors
    ///
    /// Same as [`Self::best_product_selling_day`].
    pub async fn best_banana_selling_day(&self) -> Result<Option<ProductDay>, StoreError> {
        self.best_product_selling_day(BANANA).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn ensure_view(
        &self,
        view: Relation,
        create_sql: &'static str,
        depends_on: &[Relation],
    ) -> Result<(), StoreError> {
        ensure_relations(&self.pool, depends_on).await?;
        sqlx::query(create_sql).execute(&self.pool).await?;
        debug!(view = view.name(), "View ready");
        Ok(())
    }

    /// Both base tables exist and store product keys of the same kind.
    ///
    /// An empty table has no keys to compare, so it joins with either kind.
    async fn ensure_joinable(&self) -> Result<(), StoreError> {
        let sales = key_kind(&self.pool, Relation::Sales).await?;
        let products = key_kind(&self.pool, Relation::Products).await?;
        match (sales, products) {
            (Some(sales), Some(products)) if sales != products => {
                if self.is_empty(Relation::Sales).await?
                    || self.is_empty(Relation::Products).await?
                {
                    return Ok(());
                }
                Err(StoreError::TypeMismatch { sales, products })
            }
            _ => Ok(()),
        }
    }

    async fn is_empty(&self, relation: Relation) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar(relation.count_sql())
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }
}

fn daily_total((date, cents): (NaiveDate, i64)) -> DailyTotal {
    DailyTotal {
        date,
        total: Money::from_cents(cents),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
