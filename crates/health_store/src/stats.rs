//! Pure aggregation over quantity samples: discrete min/max/avg statistics
//! and anchored cumulative-sum bucketing (the statistics-collection query).

use crate::{QuantitySample, StepBucket, TimeRange};
use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc};
use std::collections::BTreeMap;

/// Discrete statistics over a sample set. Empty input is all zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantityStatistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sum: f64,
    pub count: usize,
}

pub fn summarize(samples: &[QuantitySample]) -> QuantityStatistics {
    if samples.is_empty() {
        return QuantityStatistics::default();
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for sample in samples {
        min = min.min(sample.value);
        max = max.max(sample.value);
        sum += sample.value;
    }
    QuantityStatistics {
        min,
        max,
        avg: sum / samples.len() as f64,
        sum,
        count: samples.len(),
    }
}

/// Monday 00:00 UTC of the ISO week containing `at` — the anchor date from
/// which bucket boundaries are computed.
pub fn week_anchor(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    let monday = date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()));
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Cumulative-sum statistics collection: sums sample values into buckets of
/// `interval` length whose boundaries lie at `anchor + k * interval`.
///
/// Samples are assigned by their start timestamp and only counted when that
/// timestamp falls inside `range`. Buckets whose sum is zero are omitted;
/// output is ascending by bucket start. A non-positive `interval` yields no
/// buckets.
pub fn bucket_sum(
    samples: &[QuantitySample],
    anchor: DateTime<Utc>,
    interval: TimeDelta,
    range: TimeRange,
) -> Vec<StepBucket> {
    let interval_secs = interval.num_seconds();
    if interval_secs <= 0 {
        return Vec::new();
    }

    let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
    for sample in samples {
        if !range.contains(sample.start) {
            continue;
        }
        let offset = (sample.start - anchor).num_seconds();
        let index = offset.div_euclid(interval_secs);
        *sums.entry(index).or_insert(0.0) += sample.value;
    }

    sums.into_iter()
        .filter(|(_, sum)| *sum > 0.0)
        .map(|(index, sum)| StepBucket {
            start: anchor + TimeDelta::seconds(index * interval_secs),
            count: sum.round().max(0.0) as u64,
        })
        .collect()
}
