use crate::error::{FootfallError, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Calendar period used to aggregate daily values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Day,
    Week,
    Month,
    Year,
}

impl Frequency {
    /// First day of the period containing `date` (weeks start on Monday).
    pub fn bucket(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Day => date,
            Frequency::Week => {
                let offset = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
            Frequency::Month => date.with_day(1).unwrap_or(date),
            Frequency::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Day => "day",
            Frequency::Week => "week",
            Frequency::Month => "month",
            Frequency::Year => "year",
        }
    }
}

impl FromStr for Frequency {
    type Err = FootfallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Frequency::Day),
            "week" => Ok(Frequency::Week),
            "month" => Ok(Frequency::Month),
            "year" => Ok(Frequency::Year),
            _ => Err(FootfallError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Mean,
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Mean => self.sum / self.count as f64,
        }
    }
}

/// Aggregate daily values into ordered `(period start, value)` pairs.
pub fn resample(
    dates: &[NaiveDate],
    values: &[f64],
    frequency: Frequency,
    aggregation: Aggregation,
) -> Result<Vec<(NaiveDate, f64)>> {
    if dates.len() != values.len() {
        return Err(FootfallError::InputShape(format!(
            "{} dates but {} values to resample",
            dates.len(),
            values.len()
        )));
    }

    let buckets = dates.iter().zip(values).fold(
        BTreeMap::<NaiveDate, Accumulator>::new(),
        |mut acc, (&date, &value)| {
            acc.entry(frequency.bucket(date)).or_default().add(value);
            acc
        },
    );

    Ok(buckets
        .into_iter()
        .map(|(period, acc)| (period, acc.finish(aggregation)))
        .collect())
}

/// Period-over-period change in percent; undefined for the first value and after a zero.
pub fn percent_change(values: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(values.windows(2).map(|pair| {
            (pair[0] != 0.0).then(|| (pair[1] - pair[0]) / pair[0] * 100.0)
        }))
        .take(values.len())
        .collect()
}
