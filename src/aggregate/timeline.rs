//! Day-granularity time series for chart display.

use crate::record::{PublicationDate, PublicationRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Sparse per-day counts: days with no records do not appear, gaps are never
/// filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    /// Points sorted ascending by date.
    pub points: Vec<TimeSeriesPoint>,
    /// Records skipped because their publication date was missing or
    /// unparseable.
    pub excluded: usize,
}

impl TimeSeries {
    /// Sum of all bucket counts, i.e. the number of dated records.
    pub fn total(&self) -> u64 {
        self.points.iter().map(|point| point.count).sum()
    }
}

/// Bucket records by calendar day of their publication date. Dates are used
/// as parsed; no timezone conversion is applied.
pub fn bucket_by_date(records: &[PublicationRecord]) -> TimeSeries {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut excluded = 0usize;
    for record in records {
        match record.date {
            PublicationDate::Known(date) => *buckets.entry(date).or_insert(0) += 1,
            PublicationDate::Unknown => excluded += 1,
        }
    }
    TimeSeries {
        points: buckets
            .into_iter()
            .map(|(date, count)| TimeSeriesPoint { date, count })
            .collect(),
        excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize;
    use serde_json::json;

    #[test]
    fn test_bucket_by_date_scenario() {
        let records: Vec<PublicationRecord> = vec![
            json!({"id": 1, "publication_date": "2023-01-05", "keywords": "AI, ml"}),
            json!({"id": 2, "publication_date": "2023-01-05", "keywords": "ai"}),
            json!({"id": 3, "publication_date": "bad-date", "keywords": ""}),
        ]
        .iter()
        .map(normalize)
        .collect();

        let series = bucket_by_date(&records);
        assert_eq!(series.points.len(), 1);
        assert_eq!(
            series.points[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
        assert_eq!(series.points[0].count, 2);
        assert_eq!(series.excluded, 1);
        assert_eq!(series.total(), 2);
    }

    #[test]
    fn test_points_sorted_ascending_and_sparse() {
        let records: Vec<PublicationRecord> = vec![
            json!({"id": 1, "publication_date": "2023-03-01"}),
            json!({"id": 2, "publication_date": "2023-01-01"}),
            json!({"id": 3, "publication_date": "2023-03-01"}),
        ]
        .iter()
        .map(normalize)
        .collect();

        let series = bucket_by_date(&records);
        let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            ]
        );
        // no synthesized zero-count days in between
        assert_eq!(series.points.len(), 2);
    }

    #[test]
    fn test_exclusion_accounting() {
        let records: Vec<PublicationRecord> = vec![
            json!({"id": 1}),
            json!({"id": 2, "publication_date": "2024-06-01"}),
            json!({"id": 3, "publication_date": ""}),
        ]
        .iter()
        .map(normalize)
        .collect();

        let series = bucket_by_date(&records);
        assert_eq!(series.excluded, 2);
        assert_eq!(series.total() as usize + series.excluded, records.len());
    }
}
