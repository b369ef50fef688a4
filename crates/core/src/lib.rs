//! Core logic for MarketData.
//!
//! This crate turns spreadsheet sheets into typed records and defines the
//! shape of every report. It has ZERO database dependencies; aggregation runs
//! in the analytical store (`marketdata-db`).
//!
//! # Modules
//!
//! - `ingest` - Worksheet reading and type normalization
//! - `reports` - Report row types and text rendering

pub mod ingest;
pub mod reports;
