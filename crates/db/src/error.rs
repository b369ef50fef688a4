//! Analytical store error types.

use marketdata_shared::AppError;
use marketdata_shared::types::KeyKind;
use thiserror::Error;

use crate::queries::Relation;

/// Errors raised while loading tables or running report queries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A table or view the query depends on has not been created.
    #[error("Relation does not exist: {0}")]
    MissingRelation(Relation),

    /// Sales and products store product keys of different kinds.
    #[error("Cannot join sales ({sales} keys) with products ({products} keys)")]
    TypeMismatch {
        /// Key kind of the sales table.
        sales: KeyKind,
        /// Key kind of the products table.
        products: KeyKind,
    },

    /// A sold product has a zero or missing price per kilogram.
    #[error("Product {product:?} has no usable price per kilogram")]
    DivisionByZero {
        /// Product name.
        product: String,
    },

    /// A value does not fit the store's integer representation.
    #[error("Value out of range for {column}: {value}")]
    ValueOutOfRange {
        /// Target column.
        column: &'static str,
        /// Offending value.
        value: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingRelation(_) => Self::MissingRelation(err.to_string()),
            StoreError::TypeMismatch { .. } => Self::TypeMismatch(err.to_string()),
            StoreError::DivisionByZero { .. } => Self::DivisionByZero(err.to_string()),
            StoreError::ValueOutOfRange { .. } => Self::Parse(err.to_string()),
            StoreError::Database(_) => Self::Database(err.to_string()),
        }
    }
}
