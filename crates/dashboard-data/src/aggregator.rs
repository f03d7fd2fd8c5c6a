//! Filtering and aggregation over a loaded [`Dataset`].
//!
//! Every function here works on borrowed records, so building a filtered
//! view and rolling it up never clones row data. Aggregations are plain
//! folds; ordering rules (first appearance for group keys, ascending dates
//! for trends) are part of each function's contract.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use dashboard_core::models::{
    DateField, Dataset, DimensionField, FilterSelection, MeasureField, Record,
};
use serde::{Deserialize, Serialize};

/// Borrowed view of the records matching a selection.
pub type FilteredView<'a> = Vec<&'a Record>;

/// Number of customers a top-customer ranking keeps by default.
pub const TOP_CUSTOMERS_DEFAULT: usize = 5;

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Collect the records matching `selection`, preserving dataset order.
///
/// A record matches when its region, category, and sub-category are all in
/// the corresponding selection sets, so an empty set matches nothing.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    dataset
        .records()
        .iter()
        .filter(|record| selection.matches(record))
        .collect()
}

// ── Totals ────────────────────────────────────────────────────────────────────

/// Headline sums over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub sales: f64,
    pub profit: f64,
}

/// Sum sales and profit over `records`. Empty input yields zero totals.
pub fn totals(records: &[&Record]) -> Totals {
    records.iter().fold(Totals::default(), |mut acc, record| {
        acc.sales += record.sales;
        acc.profit += record.profit;
        acc
    })
}

// ── Group sums ────────────────────────────────────────────────────────────────

/// One group's summed measure, keyed by a dimension value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Sum `measure` per distinct value of `dimension`.
///
/// Groups appear in order of first appearance in `records`, matching
/// [`Dataset::distinct_values`]. Absent groups are absent, never zero.
pub fn group_sum(
    records: &[&Record],
    dimension: DimensionField,
    measure: MeasureField,
) -> Vec<GroupTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();

    for record in records {
        let key = dimension.value(record);
        match index.get(key) {
            Some(&slot) => groups[slot].total += measure.value(record),
            None => {
                index.insert(key, groups.len());
                groups.push(GroupTotal {
                    key: key.to_string(),
                    total: measure.value(record),
                });
            }
        }
    }

    groups
}

// ── Top customers ─────────────────────────────────────────────────────────────

/// One customer's summed sales, for ranking tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSales {
    pub customer_name: String,
    pub total_sales: f64,
}

/// Rank customers by total sales, descending, keeping at most `limit`.
///
/// The sort is stable over first-appearance grouping order, so customers
/// with equal totals keep the order they first appear in `records`.
pub fn top_customers(records: &[&Record], limit: usize) -> Vec<CustomerSales> {
    let mut ranked: Vec<CustomerSales> =
        group_sum(records, DimensionField::CustomerName, MeasureField::Sales)
            .into_iter()
            .map(|group| CustomerSales {
                customer_name: group.key,
                total_sales: group.total,
            })
            .collect();

    ranked.sort_by(|a, b| {
        b.total_sales
            .partial_cmp(&a.total_sales)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

// ── Time trend ────────────────────────────────────────────────────────────────

/// One day's summed measure on a trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub total: f64,
}

/// Sum `measure` per calendar day of `date_field`, ascending by date.
///
/// Records without a value for the date field (a missing ship date) are
/// skipped. Days with no records do not appear; the line has no gap filling.
pub fn time_trend(
    records: &[&Record],
    date_field: DateField,
    measure: MeasureField,
) -> Vec<DatePoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records {
        let Some(date) = date_field.value(record) else {
            continue;
        };
        *by_date.entry(date).or_insert(0.0) += measure.value(record);
    }

    by_date
        .into_iter()
        .map(|(date, total)| DatePoint { date, total })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
