//! In-memory analytical store for MarketData.
//!
//! This crate provides:
//! - [`AnalyticalStore`], the SQLite `:memory:` database holding `sales` and
//!   `products`
//! - [`ReportRepository`], the fixed catalog of report queries
//! - The SQL text of every statement, in [`queries`]

pub mod error;
pub mod queries;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use queries::Relation;
pub use repositories::ReportRepository;
pub use store::AnalyticalStore;

/// Opens a fresh, empty in-memory store.
///
/// # Errors
///
/// Returns an error if the SQLite connection cannot be established.
pub async fn connect() -> Result<AnalyticalStore, StoreError> {
    AnalyticalStore::open_in_memory().await
}
