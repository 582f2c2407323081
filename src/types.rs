use crate::error::{FootfallError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Date-indexed table of the target (first column) and its numeric covariates.
#[derive(Debug, Clone)]
pub struct TimeSeriesFrame {
    dates: Vec<NaiveDate>,
    data: DataFrame,
}

impl TimeSeriesFrame {
    pub fn new(dates: Vec<NaiveDate>, data: DataFrame) -> Result<Self> {
        check_index(&dates, &data)?;
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(FootfallError::InputShape(format!(
                "Dates must be unique and strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self {
            dates,
            data: cast_all_float(data)?,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.data)
    }

    /// Name of the forecast target, which is always the first column.
    pub fn target_name(&self) -> Result<String> {
        self.column_names()
            .into_iter()
            .next()
            .ok_or_else(|| FootfallError::InputShape("Frame has no columns".to_string()))
    }

    pub fn values(&self, column: &str) -> Result<Vec<f64>> {
        dense_values(&self.data, column)
    }

    /// Keep only the rows whose flag is set.
    pub fn filter_rows(&self, keep: &[bool]) -> Result<Self> {
        let (dates, data) = filter_indexed(&self.dates, &self.data, keep)?;
        Ok(Self { dates, data })
    }

    /// Append a numeric column aligned with the date index.
    pub fn with_column(&self, name: &str, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(FootfallError::InputShape(format!(
                "Column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.len()
            )));
        }
        let mut data = self.data.clone();
        data.with_column(Column::new(name.into(), values))?;
        Ok(Self {
            dates: self.dates.clone(),
            data,
        })
    }
}

/// Lagged feature/target table; `dates[r]` is the timestamp of the `(t)` step of row `r`.
#[derive(Debug, Clone)]
pub struct SupervisedFrame {
    dates: Vec<NaiveDate>,
    data: DataFrame,
}

impl SupervisedFrame {
    pub fn new(dates: Vec<NaiveDate>, data: DataFrame) -> Result<Self> {
        check_index(&dates, &data)?;
        Ok(Self { dates, data })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataFrame {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.data)
    }

    pub fn values(&self, column: &str) -> Result<Vec<f64>> {
        dense_values(&self.data, column)
    }

    /// Contiguous block of rows, `offset..offset + len`, clipped to the table.
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        let offset = offset.min(self.dates.len());
        let end = offset.saturating_add(len).min(self.dates.len());
        Self {
            dates: self.dates[offset..end].to_vec(),
            data: self.data.slice(offset as i64, end - offset),
        }
    }

    pub fn filter_rows(&self, keep: &[bool]) -> Result<Self> {
        let (dates, data) = filter_indexed(&self.dates, &self.data, keep)?;
        Ok(Self { dates, data })
    }

    /// Replace the column layout, keeping the index.
    pub fn with_data(&self, data: DataFrame) -> Result<Self> {
        Self::new(self.dates.clone(), data)
    }

    /// Positional row-major view of the table, in current column order.
    pub fn rows(&self) -> Result<Vec<Vec<f64>>> {
        let columns = self
            .column_names()
            .iter()
            .map(|name| self.values(name))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..self.len())
            .map(|row| columns.iter().map(|column| column[row]).collect())
            .collect())
    }
}

/// One day of the walk-forward horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
    pub rolling_mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRecord {
    pub feature: String,
    pub importance: f64,
    pub lag_depth: usize,
}

pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Column as `f64` values, nulls preserved.
pub(crate) fn float_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(column)?.cast(&DataType::Float64)?;
    Ok(series.f64()?.iter().collect())
}

/// Column as `f64` values; a null is an error.
pub(crate) fn dense_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    float_values(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                FootfallError::DataQuality(format!(
                    "Null value in column '{}' at row {}",
                    column, row
                ))
            })
        })
        .collect()
}

fn check_index(dates: &[NaiveDate], data: &DataFrame) -> Result<()> {
    if dates.len() != data.height() {
        return Err(FootfallError::InputShape(format!(
            "Index has {} dates but the table has {} rows",
            dates.len(),
            data.height()
        )));
    }
    Ok(())
}

fn cast_all_float(data: DataFrame) -> Result<DataFrame> {
    let columns = data
        .get_columns()
        .iter()
        .map(|column| {
            if !is_numeric(column.dtype()) {
                return Err(FootfallError::InputShape(format!(
                    "Column '{}' must be numeric, found {:?}",
                    column.name().as_str(),
                    column.dtype()
                )));
            }
            Ok(column.cast(&DataType::Float64)?)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DataFrame::new(columns)?)
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
            | DataType::Boolean
    )
}

fn filter_indexed(
    dates: &[NaiveDate],
    data: &DataFrame,
    keep: &[bool],
) -> Result<(Vec<NaiveDate>, DataFrame)> {
    if keep.len() != dates.len() {
        return Err(FootfallError::InputShape(format!(
            "Row mask has {} entries for {} rows",
            keep.len(),
            dates.len()
        )));
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    let data = data.filter(&mask)?;
    let dates = dates
        .iter()
        .zip(keep)
        .filter_map(|(date, &kept)| kept.then_some(*date))
        .collect();
    Ok((dates, data))
}
