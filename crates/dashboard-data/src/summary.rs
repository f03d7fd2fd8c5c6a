//! One-call rollup of every table the dashboard renders.

use dashboard_core::models::{Dataset, DateField, DimensionField, FilterSelection, MeasureField};
use serde::{Deserialize, Serialize};

use crate::aggregator::{
    self, CustomerSales, DatePoint, GroupTotal, Totals, TOP_CUSTOMERS_DEFAULT,
};

/// Every aggregate the dashboard shows for one filter selection.
///
/// All tables are computed from the same filtered view, so they are
/// mutually consistent: each one sums to the same headline totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTables {
    pub totals: Totals,
    pub top_customers: Vec<CustomerSales>,
    pub sales_by_region: Vec<GroupTotal>,
    pub profit_by_category: Vec<GroupTotal>,
    pub daily_sales: Vec<DatePoint>,
    pub daily_profit: Vec<DatePoint>,
    /// How many records matched the selection.
    pub filtered_rows: usize,
}

/// Filter `dataset` by `selection` and compute all dashboard tables.
///
/// Trend lines run on the order date; top customers keep at most
/// [`TOP_CUSTOMERS_DEFAULT`] entries. An empty match produces zero totals
/// and empty tables rather than an error.
pub fn build_dashboard(dataset: &Dataset, selection: &FilterSelection) -> DashboardTables {
    let view = aggregator::filter(dataset, selection);

    DashboardTables {
        totals: aggregator::totals(&view),
        top_customers: aggregator::top_customers(&view, TOP_CUSTOMERS_DEFAULT),
        sales_by_region: aggregator::group_sum(
            &view,
            DimensionField::Region,
            MeasureField::Sales,
        ),
        profit_by_category: aggregator::group_sum(
            &view,
            DimensionField::Category,
            MeasureField::Profit,
        ),
        daily_sales: aggregator::time_trend(&view, DateField::OrderDate, MeasureField::Sales),
        daily_profit: aggregator::time_trend(&view, DateField::OrderDate, MeasureField::Profit),
        filtered_rows: view.len(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::Record;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(
        order_date: NaiveDate,
        customer: &str,
        region: &str,
        category: &str,
        sales: f64,
        profit: f64,
    ) -> Record {
        Record {
            order_date,
            ship_date: order_date.succ_opt(),
            customer_name: customer.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            sub_category: "Phones".to_string(),
            sales,
            profit,
            year: 2016,
            month: 1,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            make_record(date(2016, 1, 1), "Alice", "East", "Technology", 100.0, 10.0),
            make_record(date(2016, 1, 1), "Ben", "East", "Technology", 50.0, -5.0),
            make_record(date(2016, 1, 2), "Cara", "West", "Furniture", 200.0, 40.0),
        ])
    }

    #[test]
    fn test_full_selection_builds_all_tables() {
        let dataset = sample_dataset();
        let tables = build_dashboard(&dataset, &FilterSelection::all(&dataset));

        assert_eq!(tables.filtered_rows, 3);
        assert!((tables.totals.sales - 350.0).abs() < 1e-9);
        assert!((tables.totals.profit - 45.0).abs() < 1e-9);

        assert_eq!(tables.top_customers[0].customer_name, "Cara");
        assert_eq!(tables.sales_by_region.len(), 2);
        assert_eq!(tables.profit_by_category.len(), 2);
        assert_eq!(tables.daily_sales.len(), 2);
        assert_eq!(tables.daily_profit.len(), 2);
    }

    #[test]
    fn test_empty_selection_builds_zeroed_tables() {
        let dataset = sample_dataset();
        let tables = build_dashboard(&dataset, &FilterSelection::empty());

        assert_eq!(tables.filtered_rows, 0);
        assert_eq!(tables.totals, Totals::default());
        assert!(tables.top_customers.is_empty());
        assert!(tables.sales_by_region.is_empty());
        assert!(tables.profit_by_category.is_empty());
        assert!(tables.daily_sales.is_empty());
        assert!(tables.daily_profit.is_empty());
    }

    #[test]
    fn test_top_customers_capped_at_default_limit() {
        let day = date(2016, 1, 1);
        let records: Vec<Record> = (1..=6)
            .map(|i| {
                make_record(
                    day,
                    &format!("Customer {i}"),
                    "East",
                    "Technology",
                    (i as f64) * 10.0,
                    1.0,
                )
            })
            .collect();
        let dataset = Dataset::new(records);
        let tables = build_dashboard(&dataset, &FilterSelection::all(&dataset));

        assert_eq!(tables.top_customers.len(), TOP_CUSTOMERS_DEFAULT);
        assert_eq!(tables.top_customers[0].customer_name, "Customer 6");
    }

    #[test]
    fn test_tables_are_mutually_consistent() {
        let dataset = sample_dataset();
        let tables = build_dashboard(&dataset, &FilterSelection::all(&dataset));

        let region_sales: f64 = tables.sales_by_region.iter().map(|g| g.total).sum();
        assert!((region_sales - tables.totals.sales).abs() < 1e-9);

        let category_profit: f64 = tables.profit_by_category.iter().map(|g| g.total).sum();
        assert!((category_profit - tables.totals.profit).abs() < 1e-9);

        let daily_sales: f64 = tables.daily_sales.iter().map(|p| p.total).sum();
        assert!((daily_sales - tables.totals.sales).abs() < 1e-9);

        let daily_profit: f64 = tables.daily_profit.iter().map(|p| p.total).sum();
        assert!((daily_profit - tables.totals.profit).abs() < 1e-9);
    }

    #[test]
    fn test_dropped_rows_never_reach_tables() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mixed.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "Order Date,Ship Date,Sales,Profit,Customer Name,Region,Category,Sub-Category"
        )
        .unwrap();
        writeln!(file, "2016-01-01,2016-01-03,100,10,Alice,East,Technology,Phones").unwrap();
        writeln!(file, "2016-01-02,2016-01-04,N/A,5,Ben,East,Technology,Phones").unwrap();
        drop(file);

        let (dataset, report) = crate::loader::load_csv(&path).unwrap();
        assert_eq!(report.rows_dropped_non_numeric, 1);

        let tables = build_dashboard(&dataset, &FilterSelection::all(&dataset));
        assert_eq!(tables.filtered_rows, 1);
        assert!((tables.totals.sales - 100.0).abs() < 1e-9);
        assert!(tables
            .top_customers
            .iter()
            .all(|c| c.customer_name != "Ben"));
    }
}
