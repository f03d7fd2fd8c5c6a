//! CSV loading and cleaning for the sales dashboard.
//!
//! Reads a Superstore-style export and produces the immutable [`Dataset`]
//! every aggregation runs over. Per-row problems drop the row and bump a
//! counter in the [`CleaningReport`]; only an unusable source file fails
//! the load.

use std::fs::File;
use std::path::Path;

use chrono::Datelike;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Dataset, Record};
use dashboard_core::parsers::{DateParser, NumberParser};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Header names the source table must carry. Ship dates may be blank per
/// row, but the column itself is required.
const REQUIRED_COLUMNS: &[&str] = &[
    "Order Date",
    "Ship Date",
    "Sales",
    "Profit",
    "Customer Name",
    "Region",
    "Category",
    "Sub-Category",
];

// ── Raw rows ──────────────────────────────────────────────────────────────────

/// One row as it appears in the source file, before any cleaning.
///
/// Everything is optional text here; the csv reader maps blank cells to
/// `None` and the cleaning passes decide what survives.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Order Date")]
    order_date: Option<String>,
    #[serde(rename = "Ship Date")]
    ship_date: Option<String>,
    #[serde(rename = "Sales")]
    sales: Option<String>,
    #[serde(rename = "Profit")]
    profit: Option<String>,
    #[serde(rename = "Customer Name")]
    customer_name: Option<String>,
    #[serde(rename = "Region")]
    region: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Sub-Category")]
    sub_category: Option<String>,
}

// ── CleaningReport ────────────────────────────────────────────────────────────

/// Per-stage row accounting for one load.
///
/// `rows_read` always equals `rows_retained` plus the four drop counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Data rows the csv reader yielded, including ones it could not decode.
    pub rows_read: usize,
    /// Rows the csv reader itself rejected (wrong field count, bad encoding).
    pub rows_unreadable: usize,
    /// Rows dropped because a critical field was missing or blank.
    pub rows_dropped_missing_fields: usize,
    /// Rows dropped because sales or profit did not parse as a number.
    pub rows_dropped_non_numeric: usize,
    /// Rows dropped because the order date was missing or did not parse.
    pub rows_dropped_bad_order_date: usize,
    /// Rows that survived every cleaning pass.
    pub rows_retained: usize,
}

impl CleaningReport {
    /// Total rows dropped across all cleaning passes.
    pub fn rows_dropped(&self) -> usize {
        self.rows_unreadable
            + self.rows_dropped_missing_fields
            + self.rows_dropped_non_numeric
            + self.rows_dropped_bad_order_date
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and clean a CSV export into a [`Dataset`].
///
/// The cleaning runs in two explicit passes over each row, mirroring a
/// presence check followed by a numeric coercion:
///
/// 1. Drop the row if sales, profit, customer name, region, category, or
///    sub-category is missing or blank. This pass tests presence only, so a
///    non-numeric sales value like `"N/A"` survives it.
/// 2. Coerce sales and profit to numbers; rows whose values do not parse
///    are dropped here even though pass 1 kept them.
///
/// A typed [`Record`] is then materialised only when the order date parsed;
/// ship-date failures become `None` without dropping the row. Row order is
/// preserved from the source.
///
/// Fails only when the file cannot be opened, the content is not decodable
/// as a CSV table, or the header lacks a required column.
pub fn load_csv(path: &Path) -> Result<(Dataset, CleaningReport)> {
    let file = File::open(path).map_err(|source| DashboardError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == *column) {
            return Err(DashboardError::MissingColumn((*column).to_string()));
        }
    }

    let mut records: Vec<Record> = Vec::new();
    let mut report = CleaningReport::default();

    for row_result in reader.deserialize::<RawRecord>() {
        report.rows_read += 1;
        let row = match row_result {
            Ok(row) => row,
            Err(e) => {
                report.rows_unreadable += 1;
                warn!("Skipping unreadable row in {}: {}", path.display(), e);
                continue;
            }
        };

        // Pass 1: critical-field presence.
        if !has_critical_fields(&row) {
            report.rows_dropped_missing_fields += 1;
            continue;
        }

        // Pass 2: numeric coercion.
        let Some((sales, profit)) = coerce_numeric(&row) else {
            report.rows_dropped_non_numeric += 1;
            continue;
        };

        // A record only exists once the order date parsed.
        let Some(record) = to_record(row, sales, profit) else {
            report.rows_dropped_bad_order_date += 1;
            continue;
        };

        records.push(record);
    }

    report.rows_retained = records.len();

    debug!(
        "Loaded {}: {} rows read, {} retained, {} dropped ({} unreadable, {} missing fields, {} non-numeric, {} bad order date)",
        path.display(),
        report.rows_read,
        report.rows_retained,
        report.rows_dropped(),
        report.rows_unreadable,
        report.rows_dropped_missing_fields,
        report.rows_dropped_non_numeric,
        report.rows_dropped_bad_order_date,
    );

    Ok((Dataset::new(records), report))
}

// ── Cleaning passes ───────────────────────────────────────────────────────────

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Pass 1: every critical field present, blank counting as missing.
fn has_critical_fields(row: &RawRecord) -> bool {
    is_present(&row.sales)
        && is_present(&row.profit)
        && is_present(&row.customer_name)
        && is_present(&row.region)
        && is_present(&row.category)
        && is_present(&row.sub_category)
}

/// Pass 2: both money columns coerce to finite numbers.
fn coerce_numeric(row: &RawRecord) -> Option<(f64, f64)> {
    let sales = NumberParser::parse(row.sales.as_deref()?)?;
    let profit = NumberParser::parse(row.profit.as_deref()?)?;
    Some((sales, profit))
}

/// Materialise a typed record from a row that passed both cleaning passes.
///
/// Returns `None` when the order date is missing or unparseable. A failed
/// ship date stays in as `None`. Year and month are derived from the parsed
/// order date; stored strings are trimmed.
fn to_record(row: RawRecord, sales: f64, profit: f64) -> Option<Record> {
    let order_date = DateParser::parse(row.order_date.as_deref()?)?;
    let ship_date = row.ship_date.as_deref().and_then(DateParser::parse);

    Some(Record {
        order_date,
        ship_date,
        customer_name: row.customer_name?.trim().to_string(),
        region: row.region?.trim().to_string(),
        category: row.category?.trim().to_string(),
        sub_category: row.sub_category?.trim().to_string(),
        sales,
        profit,
        year: order_date.year(),
        month: order_date.month(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
