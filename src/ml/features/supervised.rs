use crate::error::{FootfallError, Result};
use crate::types::{float_values, SupervisedFrame, TimeSeriesFrame};
use log::debug;
use polars::prelude::*;

/// `var{var}(t-{lag})`, 1-based variable index.
pub fn lag_name(var: usize, lag: usize) -> String {
    format!("var{}(t-{})", var, lag)
}

/// `var{var}(t)` for `lead == 0`, `var{var}(t+{lead})` otherwise.
pub fn lead_name(var: usize, lead: usize) -> String {
    if lead == 0 {
        format!("var{}(t)", var)
    } else {
        format!("var{}(t+{})", var, lead)
    }
}

/// Split a supervised column name into its variable index and time offset
/// (negative for lags). Returns `None` for names outside the scheme.
pub fn parse_column_name(name: &str) -> Option<(usize, i64)> {
    let rest = name.strip_prefix("var")?;
    let open = rest.find('(')?;
    let var = rest[..open].parse::<usize>().ok()?;
    let step = rest[open..].strip_prefix("(t")?.strip_suffix(')')?;
    let offset = match step {
        "" => 0,
        s if s.starts_with('-') => -s[1..].parse::<i64>().ok()?,
        s if s.starts_with('+') => s[1..].parse::<i64>().ok()?,
        _ => return None,
    };
    Some((var, offset))
}

/// Every supervised column built from variable `var`, in table order.
pub fn variable_columns(var: usize, n_in: usize, n_out: usize) -> Vec<String> {
    (1..=n_in)
        .rev()
        .map(|lag| lag_name(var, lag))
        .chain((0..n_out).map(|lead| lead_name(var, lead)))
        .collect()
}

/// Frame a date-indexed table as a supervised learning problem.
///
/// The output holds every variable lagged `n_in..=1` steps, then every
/// variable at `t`, then `t+1..t+n_out-1`. Output row `r` describes input row
/// `r + n_in`. With `dropnan`, rows containing any null (window edges or gaps
/// in the input) are removed, so every remaining row is fully populated.
pub fn series_to_supervised(
    frame: &TimeSeriesFrame,
    n_in: usize,
    n_out: usize,
    dropnan: bool,
) -> Result<SupervisedFrame> {
    let n_vars = frame.data().width();
    if n_vars == 0 {
        return Err(FootfallError::InputShape("Frame has no columns".to_string()));
    }
    if n_out == 0 {
        return Err(FootfallError::Configuration(
            "n_out must be at least 1".to_string(),
        ));
    }
    if n_in + n_out > frame.len() {
        return Err(FootfallError::InputShape(format!(
            "Window of {} lags and {} steps ahead needs more than the {} available rows",
            n_in,
            n_out,
            frame.len()
        )));
    }

    let source = frame.data().get_columns();
    let mut columns: Vec<Column> = Vec::with_capacity(n_vars * (n_in + n_out));

    // Input sequence (t-n, ... t-1)
    for lag in (1..=n_in).rev() {
        for (j, column) in source.iter().enumerate() {
            let shifted = column
                .as_materialized_series()
                .shift(lag as i64)
                .with_name(lag_name(j + 1, lag).into());
            columns.push(Column::from(shifted));
        }
    }

    // Forecast sequence (t, t+1, ... t+n)
    for lead in 0..n_out {
        for (j, column) in source.iter().enumerate() {
            let shifted = column
                .as_materialized_series()
                .shift(-(lead as i64))
                .with_name(lead_name(j + 1, lead).into());
            columns.push(Column::from(shifted));
        }
    }

    let data = DataFrame::new(columns)?;
    let supervised = SupervisedFrame::new(frame.dates().to_vec(), data)?;
    if !dropnan {
        return Ok(supervised);
    }

    let keep = complete_rows(supervised.data())?;
    let dropped = keep.iter().filter(|&&kept| !kept).count();
    debug!(
        "Supervised window n_in={} n_out={}: dropped {} incomplete rows of {}",
        n_in,
        n_out,
        dropped,
        keep.len()
    );
    supervised.filter_rows(&keep)
}

fn complete_rows(df: &DataFrame) -> Result<Vec<bool>> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        let values = float_values(df, column.name().as_str())?;
        for (flag, value) in keep.iter_mut().zip(values) {
            if !matches!(value, Some(v) if !v.is_nan()) {
                *flag = false;
            }
        }
    }
    Ok(keep)
}
