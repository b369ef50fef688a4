//! Analytical store: an in-memory SQLite database behind a one-connection pool.

use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::info;

use marketdata_core::ingest::{ProductSheet, SalesSheet};
use marketdata_shared::types::{KeyKind, ProductId};

use crate::error::StoreError;
use crate::queries::{self, Relation};

/// Owned handle to the in-memory database.
///
/// The pool holds exactly one connection that never idles out: every
/// `:memory:` connection is a separate database, so a second one would not
/// see the loaded tables. Dropping the last clone discards all data.
#[derive(Debug, Clone)]
pub struct AnalyticalStore {
    pool: SqlitePool,
}

impl AnalyticalStore {
    /// Opens a fresh, empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite connection cannot be established.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Connection pool shared with repositories.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Materializes sales records as the `sales` table.
    ///
    /// Any previous `sales` table is dropped first. Returns the number of
    /// rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount does not fit in cents or a statement fails.
    pub async fn load_sales(&self, sheet: &SalesSheet) -> Result<u64, StoreError> {
        let create = match sheet.key_kind {
            KeyKind::Numeric => queries::CREATE_SALES_INTEGER_KEY,
            KeyKind::Text => queries::CREATE_SALES_TEXT_KEY,
        };

        let mut tx = self.pool.begin().await?;
        sqlx::query(queries::DROP_SALES).execute(&mut *tx).await?;
        sqlx::query(create).execute(&mut *tx).await?;

        let mut rows = 0;
        for record in &sheet.records {
            let cents = record
                .amount
                .to_cents()
                .ok_or_else(|| StoreError::ValueOutOfRange {
                    column: "amount_cents",
                    value: record.amount.to_string(),
                })?;
            let query = sqlx::query(queries::INSERT_SALE)
                .bind(record.sale_date)
                .bind(cents);
            rows += bind_product_id(query, &record.product_id)
                .bind(record.time_range.as_str())
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;

        info!(table = Relation::Sales.name(), rows, key_kind = %sheet.key_kind, "Table loaded");
        Ok(rows)
    }

    /// Materializes product records as the `products` table.
    ///
    /// Any previous `products` table is dropped first. Returns the number of
    /// rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if a price does not fit the integer column or a
    /// statement fails.
    pub async fn load_products(&self, sheet: &ProductSheet) -> Result<u64, StoreError> {
        let create = match sheet.key_kind {
            KeyKind::Numeric => queries::CREATE_PRODUCTS_INTEGER_KEY,
            KeyKind::Text => queries::CREATE_PRODUCTS_TEXT_KEY,
        };

        let mut tx = self.pool.begin().await?;
        sqlx::query(queries::DROP_PRODUCTS).execute(&mut *tx).await?;
        sqlx::query(create).execute(&mut *tx).await?;

        let mut rows = 0;
        for record in &sheet.records {
            let price_units = record
                .price_per_kg
                .map(|price| {
                    price.to_units().ok_or_else(|| StoreError::ValueOutOfRange {
                        column: "price_units",
                        value: price.to_string(),
                    })
                })
                .transpose()?;
            let query = sqlx::query(queries::INSERT_PRODUCT);
            rows += bind_product_id(query, &record.product_id)
                .bind(record.name.as_str())
                .bind(price_units)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;

        info!(table = Relation::Products.name(), rows, key_kind = %sheet.key_kind, "Table loaded");
        Ok(rows)
    }

    /// Returns true if the table or view exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub async fn relation_exists(&self, relation: Relation) -> Result<bool, StoreError> {
        relation_exists(&self.pool, relation).await
    }

    /// Number of rows in a relation.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` if it has not been created.
    pub async fn row_count(&self, relation: Relation) -> Result<i64, StoreError> {
        ensure_relations(&self.pool, &[relation]).await?;
        let count = sqlx::query_scalar(relation.count_sql())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Names of the base tables currently in the store, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub async fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar(queries::TABLE_NAMES)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    /// Kind of product key stored in a base table.
    ///
    /// # Errors
    ///
    /// Returns `MissingRelation` if the table has not been loaded.
    pub async fn key_kind(&self, relation: Relation) -> Result<Option<KeyKind>, StoreError> {
        key_kind(&self.pool, relation).await
    }
}

fn bind_product_id<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    id: &'q ProductId,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match id {
        ProductId::Numeric(id) => query.bind(*id),
        ProductId::Text(id) => query.bind(id.as_str()),
    }
}

pub(crate) async fn relation_exists(
    pool: &SqlitePool,
    relation: Relation,
) -> Result<bool, StoreError> {
    let count: i64 = sqlx::query_scalar(queries::RELATION_EXISTS)
        .bind(relation.name())
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Fails with `MissingRelation` on the first relation that does not exist.
pub(crate) async fn ensure_relations(
    pool: &SqlitePool,
    relations: &[Relation],
) -> Result<(), StoreError> {
    for &relation in relations {
        if !relation_exists(pool, relation).await? {
            return Err(StoreError::MissingRelation(relation));
        }
    }
    Ok(())
}

pub(crate) async fn key_kind(
    pool: &SqlitePool,
    relation: Relation,
) -> Result<Option<KeyKind>, StoreError> {
    ensure_relations(pool, &[relation]).await?;
    let declared: Option<String> = sqlx::query_scalar(queries::KEY_COLUMN_TYPE)
        .bind(relation.name())
        .fetch_optional(pool)
        .await?;
    Ok(declared.as_deref().and_then(KeyKind::from_sql_type))
}
