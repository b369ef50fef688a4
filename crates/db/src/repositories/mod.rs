//! Repository abstractions for data access.
//!
//! Repositories hold a clone of the store's pool and expose typed results,
//! hiding the SQL from the rest of the application.

pub mod report;

pub use report::{BANANA, ReportRepository};
