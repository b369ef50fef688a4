//! MarketData orchestration.
//!
//! [`MarketData`] owns the source configuration and the analytical store
//! handle. It loads the sales and products sheets and exposes every report of
//! the catalog.

pub mod market_data;

pub use market_data::MarketData;
