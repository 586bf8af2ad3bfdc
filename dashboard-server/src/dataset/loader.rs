//! CSV dataset loading
//!
//! The loader is header-driven: the fraud flag column is required, every
//! dimension column is optional. Absent columns are recorded in
//! `DatasetColumns` so the chart aggregations can degrade to placeholder
//! figures instead of failing.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;

use super::record::TransactionRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which optional columns the loaded CSV actually carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetColumns {
    pub purchase_time: bool,
    pub country: bool,
    pub device_id: bool,
    pub source: bool,
    pub browser: bool,
}

/// The immutable in-memory transaction dataset.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
    columns: DatasetColumns,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open dataset: {:?}", path.as_ref()))?;

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .clone();

        let class_idx = match find_column(&headers, "class") {
            Some(idx) => idx,
            None => bail!("dataset has no 'class' column"),
        };
        let time_idx = find_column(&headers, "purchase_time");
        let country_idx = find_column(&headers, "country");
        let device_idx = find_column(&headers, "device_id");
        let source_idx = find_column(&headers, "source");
        let browser_idx = find_column(&headers, "browser");

        let columns = DatasetColumns {
            purchase_time: time_idx.is_some(),
            country: country_idx.is_some(),
            device_id: device_idx.is_some(),
            source: source_idx.is_some(),
            browser: browser_idx.is_some(),
        };

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read row {}", row + 1))?;

            let is_fraud = parse_fraud_flag(record.get(class_idx))
                .with_context(|| format!("Bad fraud flag in row {}", row + 1))?;

            let purchase_time = time_idx
                .and_then(|i| record.get(i))
                .and_then(parse_timestamp);

            records.push(TransactionRecord {
                is_fraud,
                purchase_date: purchase_time.map(|t| t.date()),
                purchase_time,
                country: field(&record, country_idx),
                device_id: field(&record, device_idx),
                source: field(&record, source_idx),
                browser: field(&record, browser_idx),
            });
        }

        Ok(Self { records, columns })
    }

    /// Build a dataset directly from records, for tests.
    #[cfg(test)]
    pub fn from_records(records: Vec<TransactionRecord>, columns: DatasetColumns) -> Self {
        Self { records, columns }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn columns(&self) -> &DatasetColumns {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total fraud cases (sum of the binary flag).
    pub fn total_fraud(&self) -> u64 {
        self.records.iter().map(|r| r.is_fraud as u64).sum()
    }

    /// Mean of the fraud flag; 0.0 for an empty dataset.
    pub fn fraud_rate(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.total_fraud() as f64 / self.records.len() as f64
        }
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The flag is stored as "0"/"1", but some exports carry it as a float.
fn parse_fraud_flag(value: Option<&str>) -> Result<u8> {
    let raw = value.map(str::trim).unwrap_or("");
    if let Ok(flag) = raw.parse::<u8>() {
        return Ok(if flag > 0 { 1 } else { 0 });
    }

    let float: f64 = raw
        .parse()
        .with_context(|| format!("not a number: {:?}", raw))?;
    Ok(if float > 0.0 { 1 } else { 0 })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}
