//! Dashboard aggregations
//!
//! Every function here is a pure function of the immutable dataset,
//! recomputed on each request. A chart whose column is absent from the
//! CSV degrades to a placeholder figure instead of failing. Groupings
//! use ordered maps so identical datasets always produce identical
//! figures.

use std::collections::BTreeMap;

use serde::Serialize;

use super::figure::Figure;
use crate::dataset::{Dataset, TransactionRecord};

/// Summary box values.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_transactions: usize,
    pub total_fraud_cases: u64,
    pub fraud_percentage: f64,
}

pub fn summary(dataset: &Dataset) -> Summary {
    Summary {
        total_transactions: dataset.len(),
        total_fraud_cases: dataset.total_fraud(),
        fraud_percentage: dataset.fraud_rate() * 100.0,
    }
}

/// Fraud cases summed per purchase date.
pub fn fraud_trend(dataset: &Dataset) -> Figure {
    if !dataset.columns().purchase_time {
        return Figure::placeholder("No Date Data Available");
    }

    let mut by_date: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(date) = record.purchase_date {
            *by_date.entry(date).or_insert(0) += record.is_fraud as u64;
        }
    }

    let (x, y) = split_pairs(by_date.into_iter().map(|(date, n)| (date.to_string(), n)));
    Figure::line("Fraud Cases Over Time", x, y)
}

/// Fraud cases summed per country, for the map chart.
pub fn fraud_map(dataset: &Dataset) -> Figure {
    if !dataset.columns().country {
        return Figure::placeholder("No Country Data Available");
    }

    let by_country = sum_by(dataset, |r| r.country.as_deref());
    let (locations, z) = split_pairs(by_country.into_iter());
    Figure::choropleth("Fraud Cases by Country", locations, z)
}

/// Fraud cases summed per device identifier.
pub fn fraud_by_device(dataset: &Dataset) -> Figure {
    if !dataset.columns().device_id {
        return Figure::placeholder("No Device Data Available");
    }

    let by_device = sum_by(dataset, |r| r.device_id.as_deref());
    let (x, y) = split_pairs(by_device.into_iter());
    Figure::bar("Fraud Cases by Device", x, y)
}

/// Fraud cases summed per acquisition source.
pub fn fraud_by_source(dataset: &Dataset) -> Figure {
    if !dataset.columns().source {
        return Figure::placeholder("No Source Data Available");
    }

    let by_source = sum_by(dataset, |r| r.source.as_deref());
    let (x, y) = split_pairs(by_source.into_iter());
    Figure::bar("Fraud Cases by Source", x, y)
}

/// Fraud cases summed per browser.
pub fn fraud_by_browser(dataset: &Dataset) -> Figure {
    if !dataset.columns().browser {
        return Figure::placeholder("No Browser Data Available");
    }

    let by_browser = sum_by(dataset, |r| r.browser.as_deref());
    let (x, y) = split_pairs(by_browser.into_iter());
    Figure::bar("Fraud Cases by Browser", x, y)
}

/// Sum the fraud flag per value of one dimension column. Records without
/// a value in that column are skipped.
fn sum_by<'a, F>(dataset: &'a Dataset, key: F) -> BTreeMap<String, u64>
where
    F: Fn(&'a TransactionRecord) -> Option<&'a str>,
{
    let mut sums = BTreeMap::new();
    for record in dataset.records() {
        if let Some(k) = key(record) {
            *sums.entry(k.to_string()).or_insert(0) += record.is_fraud as u64;
        }
    }
    sums
}

fn split_pairs<I: Iterator<Item = (String, u64)>>(pairs: I) -> (Vec<String>, Vec<u64>) {
    pairs.unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::Trace;
    use crate::dataset::DatasetColumns;
    use chrono::NaiveDate;

    fn record(
        is_fraud: u8,
        date: Option<(i32, u32, u32)>,
        country: Option<&str>,
        device: Option<&str>,
        source: Option<&str>,
        browser: Option<&str>,
    ) -> TransactionRecord {
        let purchase_date = date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        TransactionRecord {
            is_fraud,
            purchase_time: purchase_date.map(|d| d.and_hms_opt(12, 0, 0).unwrap()),
            purchase_date,
            country: country.map(str::to_string),
            device_id: device.map(str::to_string),
            source: source.map(str::to_string),
            browser: browser.map(str::to_string),
        }
    }

    fn full_columns() -> DatasetColumns {
        DatasetColumns {
            purchase_time: true,
            country: true,
            device_id: true,
            source: true,
            browser: true,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(
            vec![
                record(1, Some((2015, 2, 24)), Some("Japan"), Some("dev-a"), Some("SEO"), Some("Chrome")),
                record(0, Some((2015, 2, 24)), Some("Japan"), Some("dev-b"), Some("Ads"), Some("FireFox")),
                record(1, Some((2015, 3, 1)), Some("United States"), Some("dev-a"), Some("SEO"), Some("Chrome")),
                record(1, Some((2015, 3, 2)), None, Some("dev-c"), Some("Direct"), Some("Safari")),
            ],
            full_columns(),
        )
    }

    #[test]
    fn summary_counts_the_dataset() {
        let dataset = sample_dataset();
        let summary = summary(&dataset);

        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.total_fraud_cases, 3);
        assert!((summary.fraud_percentage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn trend_totals_match_fraud_count() {
        let dataset = sample_dataset();
        let figure = fraud_trend(&dataset);

        let Trace::Scatter { x, y, .. } = &figure.data[0] else {
            panic!("expected scatter trace");
        };
        assert_eq!(x.len(), 3);
        assert_eq!(y.iter().sum::<u64>(), dataset.total_fraud());
    }

    #[test]
    fn trend_dates_are_sorted() {
        let dataset = sample_dataset();
        let figure = fraud_trend(&dataset);

        let Trace::Scatter { x, .. } = &figure.data[0] else {
            panic!("expected scatter trace");
        };
        assert_eq!(x, &["2015-02-24", "2015-03-01", "2015-03-02"]);
    }

    #[test]
    fn map_sums_per_country_and_skips_blank_rows() {
        let dataset = sample_dataset();
        let figure = fraud_map(&dataset);

        let Trace::Choropleth { locations, z, .. } = &figure.data[0] else {
            panic!("expected choropleth trace");
        };
        assert_eq!(locations, &["Japan", "United States"]);
        assert_eq!(z, &[1, 1]);
    }

    #[test]
    fn source_chart_sums_per_source() {
        let dataset = sample_dataset();
        let figure = fraud_by_source(&dataset);

        let Trace::Bar { x, y } = &figure.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(x, &["Ads", "Direct", "SEO"]);
        assert_eq!(y, &[0, 1, 2]);
    }

    #[test]
    fn missing_columns_produce_placeholders() {
        let dataset = Dataset::from_records(
            vec![record(1, None, None, None, None, None)],
            DatasetColumns::default(),
        );

        let cases = [
            (fraud_trend(&dataset), "No Date Data Available"),
            (fraud_map(&dataset), "No Country Data Available"),
            (fraud_by_device(&dataset), "No Device Data Available"),
            (fraud_by_source(&dataset), "No Source Data Available"),
            (fraud_by_browser(&dataset), "No Browser Data Available"),
        ];

        for (figure, title) in cases {
            assert!(figure.data.is_empty(), "{} should be empty", title);
            assert_eq!(figure.layout.title.text, title);
        }
    }

    #[test]
    fn aggregates_are_deterministic() {
        let dataset = sample_dataset();

        let first = serde_json::to_value(fraud_by_browser(&dataset)).unwrap();
        let second = serde_json::to_value(fraud_by_browser(&dataset)).unwrap();
        assert_eq!(first, second);
    }
}
