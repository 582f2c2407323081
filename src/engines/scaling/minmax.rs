use crate::engines::splitters::Fold;
use crate::error::{FootfallError, Result};
use crate::ml::features::{parse_column_name, variable_columns};
use crate::types::SupervisedFrame;
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Train-set range of one scaled column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// A constant column has no range; its values map to `x - min`.
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            value - self.min
        } else {
            (value - self.min) / span
        }
    }
}

/// Min-max scaler fitted on one fold's training rows. Test rows outside the
/// training range fall outside `[0, 1]`; nothing is clamped.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    params: Vec<ColumnRange>,
}

impl MinMaxScaler {
    pub fn fit(train: &SupervisedFrame, columns: &[String]) -> Result<Self> {
        let available = train.column_names();
        let mut params = Vec::with_capacity(columns.len());
        for name in columns {
            if !available.contains(name) {
                return Err(FootfallError::Configuration(format!(
                    "Cannot scale unknown column '{}'",
                    name
                )));
            }
            let values = train.values(name)?;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if !min.is_finite() || !max.is_finite() {
                return Err(FootfallError::InputShape(format!(
                    "Cannot fit scaler on column '{}' without finite training values",
                    name
                )));
            }
            if min == max {
                debug!("Column '{}' is constant ({}) in the training rows", name, min);
            }
            params.push(ColumnRange {
                name: name.clone(),
                min,
                max,
            });
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &[ColumnRange] {
        &self.params
    }

    pub fn transform(&self, frame: &SupervisedFrame) -> Result<SupervisedFrame> {
        let mut out = frame.clone();
        for range in &self.params {
            let scaled: Vec<f64> = frame
                .values(&range.name)?
                .into_iter()
                .map(|value| range.scale(value))
                .collect();
            out.data_mut()
                .with_column(Column::new(range.name.as_str().into(), scaled))?;
        }
        Ok(out)
    }

    /// Fit on `fold.train` and rescale both halves with the same ranges.
    pub fn fit_transform_fold(fold: &Fold, columns: &[String]) -> Result<(Fold, MinMaxScaler)> {
        let scaler = Self::fit(&fold.train, columns)?;
        let scaled = Fold {
            train: scaler.transform(&fold.train)?,
            test: scaler.transform(&fold.test)?,
        };
        Ok((scaled, scaler))
    }
}

/// Map configured names to supervised columns.
///
/// An exact supervised name (`var2(t-1)`) is taken as is; a source column
/// name (`mean_temp`) expands to every lag and step column of that variable.
/// A supervised-style name missing from the table is reported with its offset.
pub fn expand_scale_columns(
    requested: &[String],
    source_columns: &[String],
    supervised_columns: &[String],
    n_in: usize,
    n_out: usize,
) -> Result<Vec<String>> {
    let mut expanded: Vec<String> = Vec::new();
    for name in requested {
        let names = if supervised_columns.contains(name) {
            vec![name.clone()]
        } else if let Some(index) = source_columns.iter().position(|source| source == name) {
            variable_columns(index + 1, n_in, n_out)
        } else if let Some((var, offset)) = parse_column_name(name) {
            return Err(FootfallError::Configuration(format!(
                "Scale column '{}' (variable {}, offset {}) is outside the table \
                 built with {} variable(s), {} lag(s) and {} step(s)",
                name,
                var,
                offset,
                source_columns.len(),
                n_in,
                n_out
            )));
        } else {
            return Err(FootfallError::Configuration(format!(
                "Scale column '{}' is neither an input nor a supervised column",
                name
            )));
        };
        for column in names {
            if supervised_columns.contains(&column) && !expanded.contains(&column) {
                expanded.push(column);
            }
        }
    }
    Ok(expanded)
}
