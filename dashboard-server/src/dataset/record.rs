//! Transaction record type

use chrono::{NaiveDate, NaiveDateTime};

/// One transaction row, reduced to the fields the dashboard reads.
/// Dimension fields are optional because the CSV may not carry their
/// columns at all.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    /// Binary fraud flag (`class` column)
    pub is_fraud: u8,

    /// Purchase timestamp, when present
    pub purchase_time: Option<NaiveDateTime>,

    /// Purchase date derived from the timestamp, for trend grouping
    pub purchase_date: Option<NaiveDate>,

    pub country: Option<String>,
    pub device_id: Option<String>,
    pub source: Option<String>,
    pub browser: Option<String>,
}
