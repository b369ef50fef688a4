//! Report rendering service.

use std::fmt;

use super::types::SalesReport;

/// Service for presenting collected sales reports.
pub struct ReportService;

impl ReportService {
    /// Renders a report as plain-text sections.
    ///
    /// Dates are shown as `dd/mm/yyyy`, amounts with two decimals.
    #[must_use]
    pub fn render_text(report: &SalesReport) -> String {
        TextReport(report).to_string()
    }
}

struct TextReport<'a>(&'a SalesReport);

impl TextReport<'_> {
    fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.chars().count()))
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        const NONE: &str = "(no data)";

        Self::heading(f, "Best selling day")?;
        match &report.best_selling_day {
            Some(day) => writeln!(f, "{}  {:>12}", day.label(), day.total)?,
            None => writeln!(f, "{NONE}")?,
        }

        Self::heading(f, "Daily sales")?;
        for day in &report.daily_sales {
            writeln!(f, "{}  {:>12}", day.label(), day.total)?;
        }

        Self::heading(f, "Monthly sales")?;
        for month in &report.monthly_sales {
            writeln!(f, "{:<10}  {:>12}", month.month, month.total)?;
        }

        Self::heading(f, "Sales per product")?;
        for product in &report.sales_per_product {
            let price = product
                .price_per_kg
                .map_or_else(|| "-".to_string(), |price| price.to_string());
            writeln!(
                f,
                "{:<24} {:>10}/kg  {:>12}",
                product.product_name, price, product.total
            )?;
        }

        Self::heading(f, "Best selling product (kg)")?;
        match &report.best_selling_product_in_kg {
            Some(best) => writeln!(
                f,
                "{}  {} sales  {}  {}",
                best.product_name, best.sale_count, best.total, best.weight
            )?,
            None => writeln!(f, "{NONE}")?,
        }

        Self::heading(f, &format!("Best day for {}", report.featured_product))?;
        match &report.best_product_day {
            Some(day) => writeln!(
                f,
                "{}  {:>12}  {} sales",
                day.label(),
                day.total,
                day.sale_count
            )?,
            None => writeln!(f, "{NONE}")?,
        }

        Self::heading(f, "Sales by time range")?;
        for bucket in &report.sales_by_time_range {
            writeln!(f, "{:<16}  {:>12}", bucket.time_range, bucket.total)?;
        }

        Ok(())
    }
}
