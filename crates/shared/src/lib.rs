//! Shared types, errors, and configuration for MarketData.
//!
//! This crate provides common types used across all other crates:
//! - Money, price and weight types with decimal precision
//! - Product identifiers and their key kinds
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
