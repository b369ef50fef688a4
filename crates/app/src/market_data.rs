//! Single orchestrating object for one reporting run.

use tracing::{error, info};

use marketdata_core::ingest;
use marketdata_core::reports::{
    DailyTotal, MonthlyTotal, ProductDay, ProductRevenue, ProductWeight, SalesReport,
    TimeRangeTotal,
};
use marketdata_db::{AnalyticalStore, ReportRepository};
use marketdata_shared::AppResult;
use marketdata_shared::config::SourceConfig;

/// Loads one workbook into an in-memory store and answers the report catalog.
///
/// The store is created empty in [`MarketData::new`]; call
/// [`load_sales`](Self::load_sales) and [`load_products`](Self::load_products)
/// before running reports that depend on them.
#[derive(Debug)]
pub struct MarketData {
    source: SourceConfig,
    store: AnalyticalStore,
    reports: ReportRepository,
}

impl MarketData {
    /// Opens an empty store for the given source.
    ///
    /// # Errors
    ///
    /// Returns a database error if the store cannot be opened.
    pub async fn new(source: SourceConfig) -> AppResult<Self> {
        let store = marketdata_db::connect().await?;
        let reports = ReportRepository::new(store.pool().clone());
        Ok(Self {
            source,
            store,
            reports,
        })
    }

    /// Source configuration.
    #[must_use]
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Underlying store, for introspection.
    #[must_use]
    pub fn store(&self) -> &AnalyticalStore {
        &self.store
    }

    /// Reads the sales sheet into the `sales` table; returns the row count.
    ///
    /// On failure the error is logged and returned; the store may be left
    /// without a `sales` table.
    ///
    /// # Errors
    ///
    /// `MissingSource` if the workbook is absent, `Parse` for sheet or cell
    /// problems, `Database` if the insert fails.
    pub async fn load_sales(&self) -> AppResult<u64> {
        self.try_load_sales().await.inspect_err(|err| {
            error!(
                path = %self.source.path.display(),
                code = err.error_code(),
                "Error loading sales data: {err}"
            );
        })
    }

    async fn try_load_sales(&self) -> AppResult<u64> {
        let sheet = ingest::read_sales(&self.source)?;
        let rows = self.store.load_sales(&sheet).await?;
        info!(sheet = %self.source.sales_sheet, rows, "Sales loaded");
        Ok(rows)
    }

    /// Reads the products sheet into the `products` table; returns the row
    /// count.
    ///
    /// Applies the same existence check and failure logging as
    /// [`load_sales`](Self::load_sales).
    ///
    /// # Errors
    ///
    /// Same as [`load_sales`](Self::load_sales).
    pub async fn load_products(&self) -> AppResult<u64> {
        self.try_load_products().await.inspect_err(|err| {
            error!(
                path = %self.source.path.display(),
                code = err.error_code(),
                "Error loading products data: {err}"
            );
        })
    }

    async fn try_load_products(&self) -> AppResult<u64> {
        let sheet = ingest::read_products(&self.source)?;
        let rows = self.store.load_products(&sheet).await?;
        info!(sheet = %self.source.products_sheet, rows, "Products loaded");
        Ok(rows)
    }

    /// Day with the highest total sales.
    ///
    /// # Errors
    ///
    /// `MissingRelation` before sales are loaded.
    pub async fn best_selling_day(&self) -> AppResult<Option<DailyTotal>> {
        Ok(self.reports.best_selling_day().await?)
    }

    /// Totals per day, ascending by date.
    ///
    /// # Errors
    ///
    /// `MissingRelation` before sales are loaded.
    pub async fn daily_sales(&self) -> AppResult<Vec<DailyTotal>> {
        Ok(self.reports.daily_sales().await?)
    }

    /// Totals per month, ascending by month.
    ///
    /// # Errors
    ///
    /// `MissingRelation` before sales are loaded.
    pub async fn monthly_sales(&self) -> AppResult<Vec<MonthlyTotal>> {
        Ok(self.reports.monthly_sales().await?)
    }

    /// Revenue per product, highest first.
    ///
    /// # Errors
    ///
    /// `MissingRelation` before both sheets are loaded, `TypeMismatch` if
    /// their product keys differ in kind.
    pub async fn sales_per_product(&self) -> AppResult<Vec<ProductRevenue>> {
        Ok(self.reports.sales_per_product().await?)
    }

    /// Product with the highest weight sold.
    ///
    /// # Errors
    ///
    /// As [`sales_per_product`](Self::sales_per_product), plus
    /// `DivisionByZero` for a sold product without a usable price.
    pub async fn best_selling_product_in_kg(&self) -> AppResult<Option<ProductWeight>> {
        Ok(self.reports.best_selling_product_in_kg().await?)
    }

    /// Best day for the product named exactly `product_name`.
    ///
    /// # Errors
    ///
    /// As [`sales_per_product`](Self::sales_per_product).
    pub async fn best_product_selling_day(&self, product_name: &str) -> AppResult<Option<ProductDay>> {
        Ok(self.reports.best_product_selling_day(product_name).await?)
    }

    /// Best day for bananas.
    ///
    /// # Errors
    ///
    /// As [`sales_per_product`](Self::sales_per_product).
    pub async fn best_banana_selling_day(&self) -> AppResult<Option<ProductDay>> {
        Ok(self.reports.best_banana_selling_day().await?)
    }

    /// Totals per time-of-day bucket, ascending by label.
    ///
    /// # Errors
    ///
    /// `MissingRelation` before sales are loaded.
    pub async fn sales_by_time_range(&self) -> AppResult<Vec<TimeRangeTotal>> {
        Ok(self.reports.sales_by_time_range().await?)
    }

    /// Runs every report once and collects the results.
    ///
    /// # Errors
    ///
    /// Stops at the first failing report.
    pub async fn run_all(&self, featured_product: &str) -> AppResult<SalesReport> {
        Ok(SalesReport {
            best_selling_day: self.best_selling_day().await?,
            daily_sales: self.daily_sales().await?,
            monthly_sales: self.monthly_sales().await?,
            sales_per_product: self.sales_per_product().await?,
            best_selling_product_in_kg: self.best_selling_product_in_kg().await?,
            featured_product: featured_product.to_string(),
            best_product_day: self.best_product_selling_day(featured_product).await?,
            sales_by_time_range: self.sales_by_time_range().await?,
        })
    }
}
