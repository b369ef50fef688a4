//! Sales report generation.
//!
//! This module defines the rows returned by the report catalog:
//! - Best selling day and daily totals
//! - Monthly totals
//! - Revenue per product and best product by weight
//! - Best day for a named product
//! - Totals per time-of-day bucket
//!
//! It also renders a collected [`SalesReport`] as text.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
