//! Integration tests for the report catalog against the in-memory store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use marketdata_core::ingest::{ProductRecord, ProductSheet, SalesRecord, SalesSheet};
use marketdata_db::{AnalyticalStore, Relation, ReportRepository, StoreError};
use marketdata_shared::types::{KeyKind, Money, Price, ProductId};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sale(sale_date: NaiveDate, cents: i64, product_id: &str, time_range: &str) -> SalesRecord {
    SalesRecord {
        sale_date,
        amount: Money::from_cents(cents),
        product_id: ProductId::from(product_id),
        time_range: time_range.to_string(),
    }
}

fn product(product_id: &str, name: &str, price: Option<Price>) -> ProductRecord {
    ProductRecord {
        product_id: ProductId::from(product_id),
        name: name.to_string(),
        price_per_kg: price,
    }
}

fn sales(records: Vec<SalesRecord>) -> SalesSheet {
    SalesSheet {
        records,
        key_kind: KeyKind::Text,
    }
}

fn products(records: Vec<ProductRecord>) -> ProductSheet {
    ProductSheet {
        records,
        key_kind: KeyKind::Text,
    }
}

async fn setup(sales_sheet: &SalesSheet, product_sheet: &ProductSheet) -> (AnalyticalStore, ReportRepository) {
    let store = marketdata_db::connect().await.unwrap();
    store.load_sales(sales_sheet).await.unwrap();
    store.load_products(product_sheet).await.unwrap();
    let repo = ReportRepository::new(store.pool().clone());
    (store, repo)
}

/// Two apple sales on consecutive days.
async fn apple_scenario() -> (AnalyticalStore, ReportRepository) {
    setup(
        &sales(vec![
            sale(date(2024, 1, 1), 1000, "P1", "morning"),
            sale(date(2024, 1, 2), 2000, "P1", "evening"),
        ]),
        &products(vec![product("P1", "Apple", Some(Price::new(dec!(2.00))))]),
    )
    .await
}

#[tokio::test]
async fn test_scenario_best_selling_day() {
    let (_store, repo) = apple_scenario().await;

    let best = repo.best_selling_day().await.unwrap().unwrap();

    assert_eq!(best.label(), "02/01/2024");
    assert_eq!(best.total, Money::new(dec!(20.00)));
}

#[tokio::test]
async fn test_scenario_best_selling_product_in_kg() {
    let (_store, repo) = apple_scenario().await;

    let best = repo.best_selling_product_in_kg().await.unwrap().unwrap();

    assert_eq!(best.product_name, "Apple");
    assert_eq!(best.sale_count, 2);
    assert_eq!(best.total, Money::new(dec!(30.00)));
    assert_eq!(best.weight.value(), dec!(15));
}

#[tokio::test]
async fn test_load_row_counts_match_records() {
    let (store, _repo) = apple_scenario().await;

    assert_eq!(
        store.table_names().await.unwrap(),
        vec!["products".to_string(), "sales".to_string()]
    );
    assert_eq!(store.row_count(Relation::Sales).await.unwrap(), 2);
    assert_eq!(store.row_count(Relation::Products).await.unwrap(), 1);
}

#[tokio::test]
async fn test_reload_replaces_table() {
    let (store, repo) = apple_scenario().await;

    let returned = store
        .load_sales(&sales(vec![sale(date(2024, 2, 1), 500, "P1", "noon")]))
        .await
        .unwrap();

    assert_eq!(returned, 1);
    assert_eq!(store.row_count(Relation::Sales).await.unwrap(), 1);
    let best = repo.best_selling_day().await.unwrap().unwrap();
    assert_eq!(best.date, date(2024, 2, 1));
}

#[tokio::test]
async fn test_reports_before_load_fail_with_missing_relation() {
    let store = marketdata_db::connect().await.unwrap();
    let repo = ReportRepository::new(store.pool().clone());

    assert!(matches!(
        repo.best_selling_day().await,
        Err(StoreError::MissingRelation(Relation::Sales))
    ));
    assert!(matches!(
        repo.daily_sales().await,
        Err(StoreError::MissingRelation(Relation::Sales))
    ));
    assert!(matches!(
        repo.sales_per_product().await,
        Err(StoreError::MissingRelation(Relation::Sales))
    ));
    // A failed view report leaves no view behind
    assert!(!store.relation_exists(Relation::DailySales).await.unwrap());
}

#[tokio::test]
async fn test_daily_sales_ascending_by_date() {
    let (_store, repo) = setup(
        &sales(vec![
            sale(date(2024, 3, 2), 100, "P1", "a"),
            sale(date(2023, 12, 31), 200, "P1", "a"),
            sale(date(2024, 3, 2), 300, "P1", "a"),
        ]),
        &products(vec![]),
    )
    .await;

    let daily = repo.daily_sales().await.unwrap();

    let labels: Vec<String> = daily.iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec!["31/12/2023", "02/03/2024"]);
    assert_eq!(daily[1].total, Money::from_cents(400));
}

#[tokio::test]
async fn test_monthly_sales_ordered_by_label() {
    let (_store, repo) = setup(
        &sales(vec![
            sale(date(2024, 2, 10), 100, "P1", "a"),
            sale(date(2023, 11, 5), 200, "P1", "a"),
            sale(date(2024, 2, 20), 300, "P1", "a"),
            sale(date(2025, 1, 1), 50, "P1", "a"),
        ]),
        &products(vec![]),
    )
    .await;

    let monthly = repo.monthly_sales().await.unwrap();

    // mm/yyyy compares month first
    let months: Vec<&str> = monthly.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["01/2025", "02/2024", "11/2023"]);
    assert_eq!(monthly[1].total, Money::from_cents(400));
}

#[tokio::test]
async fn test_sales_by_time_range_is_lexical() {
    let (_store, repo) = setup(
        &sales(vec![
            sale(date(2024, 1, 1), 100, "P1", "tarde"),
            sale(date(2024, 1, 1), 200, "P1", "manhã"),
            sale(date(2024, 1, 2), 300, "P1", "noite"),
            sale(date(2024, 1, 2), 400, "P1", "manhã"),
        ]),
        &products(vec![]),
    )
    .await;

    let ranges = repo.sales_by_time_range().await.unwrap();

    let labels: Vec<&str> = ranges.iter().map(|r| r.time_range.as_str()).collect();
    assert_eq!(labels, vec!["manhã", "noite", "tarde"]);
    assert_eq!(ranges[0].total, Money::from_cents(600));
}

#[tokio::test]
async fn test_sales_per_product_drops_unmatched_and_unsold() {
    let (_store, repo) = setup(
        &sales(vec![
            sale(date(2024, 1, 1), 1000, "P1", "a"),
            sale(date(2024, 1, 1), 3000, "P2", "a"),
            sale(date(2024, 1, 2), 9900, "P9", "a"),
        ]),
        &products(vec![
            product("P1", "Apple", Some(Price::new(dec!(2)))),
            product("P2", "Banana", Some(Price::new(dec!(4.5)))),
            product("P3", "Uva", Some(Price::new(dec!(12)))),
        ]),
    )
    .await;

    let revenue = repo.sales_per_product().await.unwrap();

    let names: Vec<&str> = revenue.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["Banana", "Apple"]);
    assert_eq!(revenue[0].price_per_kg.map(Price::value), Some(dec!(4.5)));
    assert_eq!(revenue[0].total, Money::from_cents(3000));
}

#[tokio::test]
async fn test_weight_is_summed_per_row() {
    // Two catalog rows share a name with different prices: per-row weight
    // 10/2 + 10/5 = 7 kg, while total/avg price would give something else.
    let (_store, repo) = setup(
        &sales(vec![
            sale(date(2024, 1, 1), 1000, "P1", "a"),
            sale(date(2024, 1, 1), 1000, "P2", "a"),
            sale(date(2024, 1, 1), 6000, "P3", "a"),
        ]),
        &products(vec![
            product("P1", "Apple", Some(Price::new(dec!(2)))),
            product("P2", "Apple", Some(Price::new(dec!(5)))),
            product("P3", "Melon", Some(Price::new(dec!(10)))),
        ]),
    )
    .await;

    let best = repo.best_selling_product_in_kg().await.unwrap().unwrap();

    assert_eq!(best.product_name, "Apple");
    assert_eq!(best.weight.value(), dec!(7));
    assert_eq!(best.sale_count, 2);
}

#[tokio::test]
async fn test_weight_with_zero_price_is_division_by_zero() {
    let (_store, repo) = setup(
        &sales(vec![sale(date(2024, 1, 1), 1000, "P1", "a")]),
        &products(vec![product("P1", "Free", Some(Price::new(dec!(0))))]),
    )
    .await;

    let err = repo.best_selling_product_in_kg().await.unwrap_err();
    assert!(matches!(err, StoreError::DivisionByZero { ref product } if product == "Free"));
}

#[tokio::test]
async fn test_weight_with_missing_price_is_division_by_zero() {
    let (_store, repo) = setup(
        &sales(vec![sale(date(2024, 1, 1), 1000, "P1", "a")]),
        &products(vec![product("P1", "Mystery", None)]),
    )
    .await;

    assert!(matches!(
        repo.best_selling_product_in_kg().await,
        Err(StoreError::DivisionByZero { .. })
    ));
    // Revenue does not divide, so it still works
    assert_eq!(repo.sales_per_product().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unsold_zero_price_product_is_ignored() {
    let (_store, repo) = setup(
        &sales(vec![sale(date(2024, 1, 1), 1000, "P1", "a")]),
        &products(vec![
            product("P1", "Apple", Some(Price::new(dec!(2)))),
            product("P2", "Free", Some(Price::new(dec!(0)))),
        ]),
    )
    .await;

    assert!(repo.best_selling_product_in_kg().await.unwrap().is_some());
}

#[tokio::test]
async fn test_banana_day_absent_returns_none() {
    let (_store, repo) = apple_scenario().await;

    assert!(repo.best_banana_selling_day().await.unwrap().is_none());
}

#[tokio::test]
async fn test_mismatched_key_kinds_fail_join() {
    let store = marketdata_db::connect().await.unwrap();
    store
        .load_sales(&SalesSheet {
            records: vec![SalesRecord {
                sale_date: date(2024, 1, 1),
                amount: Money::from_cents(100),
                product_id: ProductId::from(1),
                time_range: "a".to_string(),
            }],
            key_kind: KeyKind::Numeric,
        })
        .await
        .unwrap();
    store
        .load_products(&products(vec![product("1", "Apple", Some(Price::new(dec!(1))))]))
        .await
        .unwrap();
    let repo = ReportRepository::new(store.pool().clone());

    assert_eq!(store.key_kind(Relation::Sales).await.unwrap(), Some(KeyKind::Numeric));
    assert_eq!(store.key_kind(Relation::Products).await.unwrap(), Some(KeyKind::Text));
    assert!(matches!(
        repo.sales_per_product().await,
        Err(StoreError::TypeMismatch {
            sales: KeyKind::Numeric,
            products: KeyKind::Text
        })
    ));
    assert!(matches!(
        repo.best_selling_product_in_kg().await,
        Err(StoreError::TypeMismatch { .. })
    ));
    // Sales-only reports are unaffected
    assert_eq!(repo.daily_sales().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_sales_join_numeric_products() {
    let store = marketdata_db::connect().await.unwrap();
    store.load_sales(&sales(vec![])).await.unwrap();
    store
        .load_products(&ProductSheet {
            records: vec![ProductRecord {
                product_id: ProductId::from(1),
                name: "Banana".to_string(),
                price_per_kg: Some(Price::new(dec!(5))),
            }],
            key_kind: KeyKind::Numeric,
        })
        .await
        .unwrap();
    let repo = ReportRepository::new(store.pool().clone());

    assert!(repo.best_banana_selling_day().await.unwrap().is_none());
    assert!(repo.sales_per_product().await.unwrap().is_empty());
    assert!(repo.best_selling_product_in_kg().await.unwrap().is_none());
}

#[tokio::test]
async fn test_weight_of_large_sale_stays_integral() {
    // 1e11 cents * 1e8 would not fit in an i64
    let (_store, repo) = setup(
        &sales(vec![sale(date(2024, 1, 1), 100_000_000_000, "P1", "a")]),
        &products(vec![product("P1", "Gold", Some(Price::new(dec!(3))))]),
    )
    .await;

    let best = repo.best_selling_product_in_kg().await.unwrap().unwrap();

    assert_eq!(best.total, Money::from_cents(100_000_000_000));
    assert_eq!(best.weight.value(), dec!(333333333.333333));
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The best selling day's total equals the largest per-date sum computed
    /// directly from the rows.
    #[test]
    fn test_best_selling_day_matches_independent_max(
        rows in prop::collection::vec((0u32..20, 0i64..100_000), 1..60),
    ) {
        let records: Vec<SalesRecord> = rows
            .iter()
            .map(|&(offset, cents)| {
                sale(date(2024, 1, 1) + chrono::Duration::days(offset.into()), cents, "P1", "a")
            })
            .collect();

        let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for record in &records {
            *per_day.entry(record.sale_date).or_default() += record.amount.to_cents().unwrap();
        }
        let expected_max = per_day.values().copied().max().unwrap();

        let best = runtime().block_on(async {
            let (_store, repo) = setup(&sales(records), &products(vec![])).await;
            repo.best_selling_day().await.unwrap().unwrap()
        });

        prop_assert_eq!(best.total, Money::from_cents(expected_max));
        prop_assert_eq!(per_day[&best.date], expected_max);
    }

    /// Daily totals always add up to the sum of every sale.
    #[test]
    fn test_daily_sales_sum_to_grand_total(
        rows in prop::collection::vec((0u32..40, 0i64..100_000), 0..60),
    ) {
        let records: Vec<SalesRecord> = rows
            .iter()
            .map(|&(offset, cents)| {
                sale(date(2024, 1, 1) + chrono::Duration::days(offset.into()), cents, "P1", "a")
            })
            .collect();
        let grand_total: i64 = rows.iter().map(|&(_, cents)| cents).sum();

        let daily = runtime().block_on(async {
            let (_store, repo) = setup(&sales(records), &products(vec![])).await;
            repo.daily_sales().await.unwrap()
        });

        let summed: i64 = daily.iter().map(|d| d.total.to_cents().unwrap()).sum();
        prop_assert_eq!(summed, grand_total);
        prop_assert!(daily.windows(2).all(|pair| pair[0].date < pair[1].date));
    }
}
