use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cleaned sales transaction.
///
/// Records only exist post-cleaning: every string field is non-blank, sales
/// and profit are finite numbers, and `year`/`month` are derived from the
/// parsed order date. The loader is the only producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date the order was placed. Required; rows without a
    /// parseable order date never become records.
    pub order_date: NaiveDate,
    /// Calendar date the order shipped. `None` when the source value was
    /// blank or did not parse; such rows are kept.
    pub ship_date: Option<NaiveDate>,
    /// Customer display name.
    pub customer_name: String,
    /// Sales region, e.g. `"East"`.
    pub region: String,
    /// Product category, e.g. `"Technology"`.
    pub category: String,
    /// Product sub-category, e.g. `"Phones"`.
    pub sub_category: String,
    /// Sale amount in dollars. Expected non-negative but not enforced.
    pub sales: f64,
    /// Profit in dollars. May be negative.
    pub profit: f64,
    /// Year component of `order_date`.
    pub year: i32,
    /// Month component of `order_date` (1–12).
    pub month: u32,
}

// ── Field selectors ───────────────────────────────────────────────────────────

/// Categorical columns a view can be filtered or grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionField {
    Region,
    Category,
    SubCategory,
    CustomerName,
}

impl DimensionField {
    /// The record's value for this dimension.
    pub fn value(self, record: &Record) -> &str {
        match self {
            DimensionField::Region => &record.region,
            DimensionField::Category => &record.category,
            DimensionField::SubCategory => &record.sub_category,
            DimensionField::CustomerName => &record.customer_name,
        }
    }
}

/// Numeric columns an aggregation can sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureField {
    Sales,
    Profit,
}

impl MeasureField {
    /// The record's value for this measure.
    pub fn value(self, record: &Record) -> f64 {
        match self {
            MeasureField::Sales => record.sales,
            MeasureField::Profit => record.profit,
        }
    }
}

/// Date columns a time trend can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    OrderDate,
    ShipDate,
}

impl DateField {
    /// The record's date on this axis. Only the ship-date axis can be `None`.
    pub fn value(self, record: &Record) -> Option<NaiveDate> {
        match self {
            DateField::OrderDate => Some(record.order_date),
            DateField::ShipDate => record.ship_date,
        }
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The full cleaned dataset, immutable after load.
///
/// Row order matches the source file. There are no mutators: filtering and
/// aggregation borrow records and never touch the dataset itself, so a
/// reload is the only way to change what a `Dataset` holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap a cleaned, source-ordered batch of records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a dimension, in the order they first appear.
    ///
    /// This is the list a filter widget offers for the dimension, so the
    /// ordering follows the data rather than the alphabet.
    pub fn distinct_values(&self, field: DimensionField) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut values = Vec::new();
        for record in &self.records {
            let value = field.value(record);
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }
        values
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// User-chosen allowed values for the three categorical filters.
///
/// A record passes when its region, category, and sub-category are each
/// members of the corresponding set. An empty set admits nothing, so the
/// default selection shows an empty dashboard rather than everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Allowed region values.
    pub regions: BTreeSet<String>,
    /// Allowed category values.
    pub categories: BTreeSet<String>,
    /// Allowed sub-category values.
    pub sub_categories: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every value present in `dataset`, the "all filters on" state
    /// a dashboard starts from.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            regions: dataset
                .distinct_values(DimensionField::Region)
                .into_iter()
                .collect(),
            categories: dataset
                .distinct_values(DimensionField::Category)
                .into_iter()
                .collect(),
            sub_categories: dataset
                .distinct_values(DimensionField::SubCategory)
                .into_iter()
                .collect(),
        }
    }

    /// Select nothing; every record is excluded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `record` passes all three membership checks.
    pub fn matches(&self, record: &Record) -> bool {
        self.regions.contains(&record.region)
            && self.categories.contains(&record.category)
            && self.sub_categories.contains(&record.sub_category)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
