use crate::error::Result;
use crate::types::TimeSeriesFrame;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashSet};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// Append one-hot `month_<Name>` and `wday_<Name>` columns.
///
/// Only levels seen in the index get a column. They are sorted by name and the
/// first is dropped as the baseline, so a full year has no `month_April` or
/// `wday_Friday` column.
pub fn add_calendar_dummies(frame: &TimeSeriesFrame) -> Result<TimeSeriesFrame> {
    let with_months = add_dummies(frame, "month", month_name)?;
    add_dummies(&with_months, "wday", weekday_name)
}

/// Append a 0/1 column that is 1 on the given dates.
pub fn add_holiday_flag(
    frame: &TimeSeriesFrame,
    name: &str,
    holidays: &HashSet<NaiveDate>,
) -> Result<TimeSeriesFrame> {
    let flags = frame
        .dates()
        .iter()
        .map(|date| if holidays.contains(date) { 1.0 } else { 0.0 })
        .collect();
    frame.with_column(name, flags)
}

fn add_dummies(
    frame: &TimeSeriesFrame,
    prefix: &str,
    level_of: fn(NaiveDate) -> &'static str,
) -> Result<TimeSeriesFrame> {
    let present: BTreeSet<&str> = frame.dates().iter().map(|&date| level_of(date)).collect();

    let mut out = frame.clone();
    for level in present.into_iter().skip(1) {
        let values = frame
            .dates()
            .iter()
            .map(|&date| if level_of(date) == level { 1.0 } else { 0.0 })
            .collect();
        out = out.with_column(&format!("{}_{}", prefix, level), values)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn frame_for(dates: Vec<NaiveDate>) -> TimeSeriesFrame {
        let counts: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();
        let df = df! { "count" => counts }.unwrap();
        TimeSeriesFrame::new(dates, df).unwrap()
    }

    #[test]
    fn test_full_year_drops_april_and_friday() {
        let dates: Vec<NaiveDate> = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .iter_days()
            .take(365)
            .collect();
        let out = add_calendar_dummies(&frame_for(dates)).unwrap();

        let names = out.column_names();
        assert_eq!(names.len(), 1 + 11 + 6);
        assert_eq!(names[1], "month_August");
        assert_eq!(names[12], "wday_Monday");
        assert!(!names.contains(&"month_April".to_string()));
        assert!(!names.contains(&"wday_Friday".to_string()));

        // 2021-04-02 is a Friday in April: both baselines, so every dummy is zero.
        let row = 31 + 28 + 31 + 1;
        for name in &names[1..] {
            assert_eq!(out.values(name).unwrap()[row], 0.0, "{}", name);
        }
    }

    #[test]
    fn test_baseline_is_first_level_present() {
        // Monday 2021-08-02 and Tuesday 2021-09-07.
        let dates = vec![
            NaiveDate::from_ymd_opt(2021, 8, 2).unwrap(),
            NaiveDate::from_ymd_opt(2021, 9, 7).unwrap(),
        ];
        let out = add_calendar_dummies(&frame_for(dates)).unwrap();

        assert_eq!(
            out.column_names(),
            vec!["count", "month_September", "wday_Tuesday"]
        );
        assert_eq!(out.values("month_September").unwrap(), vec![0.0, 1.0]);
        assert_eq!(out.values("wday_Tuesday").unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_holiday_flag_marks_listed_dates() {
        let dates: Vec<NaiveDate> = NaiveDate::from_ymd_opt(2021, 5, 1)
            .unwrap()
            .iter_days()
            .take(5)
            .collect();
        let holidays: HashSet<NaiveDate> = [dates[2]].into_iter().collect();
        let out = add_holiday_flag(&frame_for(dates), "bank_hols", &holidays).unwrap();

        assert_eq!(out.values("bank_hols").unwrap(), vec![0.0, 0.0, 1.0, 0.0, 0.0]);
    }
}
