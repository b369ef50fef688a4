//! Tests for report rendering and serialization.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use marketdata_shared::types::{Kilograms, Money, Price};

use super::service::ReportService;
use super::types::{
    DailyTotal, MonthlyTotal, ProductDay, ProductRevenue, ProductWeight, SalesReport,
    TimeRangeTotal, day_label,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_report() -> SalesReport {
    let first = DailyTotal {
        date: date(2024, 1, 1),
        total: Money::new(dec!(10)),
    };
    let second = DailyTotal {
        date: date(2024, 1, 2),
        total: Money::new(dec!(20)),
    };

    SalesReport {
        best_selling_day: Some(second.clone()),
        daily_sales: vec![first, second],
        monthly_sales: vec![MonthlyTotal {
            month: "01/2024".to_string(),
            total: Money::new(dec!(30)),
        }],
        sales_per_product: vec![ProductRevenue {
            product_name: "Apple".to_string(),
            price_per_kg: Some(Price::new(dec!(2))),
            total: Money::new(dec!(30)),
        }],
        best_selling_product_in_kg: Some(ProductWeight {
            product_name: "Apple".to_string(),
            sale_count: 2,
            total: Money::new(dec!(30)),
            weight: Kilograms::from_micros(15_000_000),
        }),
        featured_product: "Banana".to_string(),
        best_product_day: None,
        sales_by_time_range: vec![
            TimeRangeTotal {
                time_range: "evening".to_string(),
                total: Money::new(dec!(20)),
            },
            TimeRangeTotal {
                time_range: "morning".to_string(),
                total: Money::new(dec!(10)),
            },
        ],
    }
}

#[test]
fn test_day_label_format() {
    assert_eq!(day_label(date(2024, 1, 2)), "02/01/2024");
    assert_eq!(day_label(date(1999, 12, 31)), "31/12/1999");
}

#[test]
fn test_render_text_contains_every_section() {
    let text = ReportService::render_text(&sample_report());

    for heading in [
        "Best selling day",
        "Daily sales",
        "Monthly sales",
        "Sales per product",
        "Best selling product (kg)",
        "Best day for Banana",
        "Sales by time range",
    ] {
        assert!(text.contains(heading), "missing section {heading}");
    }
}

#[test]
fn test_render_text_formats_values() {
    let text = ReportService::render_text(&sample_report());

    assert!(text.contains("02/01/2024         20.00"));
    assert!(text.contains("Apple  2 sales  30.00  15.000 kg"));
    assert!(text.contains("01/2024"));
    // No banana sales
    assert!(text.contains("(no data)"));
}

#[test]
fn test_json_uses_day_labels() {
    let json = serde_json::to_value(sample_report()).unwrap();

    assert_eq!(json["best_selling_day"]["date"], "02/01/2024");
    assert_eq!(json["best_selling_day"]["total"], "20.00");
    assert!(json["best_product_day"].is_null());
}

#[test]
fn test_json_roundtrip_keeps_dates() {
    let day = ProductDay {
        date: date(2024, 3, 5),
        total: Money::new(dec!(12.5)),
        sale_count: 3,
    };

    let json = serde_json::to_string(&day).unwrap();
    let back: ProductDay = serde_json::from_str(&json).unwrap();

    assert_eq!(back, day);
    assert_eq!(back.label(), "05/03/2024");
}
