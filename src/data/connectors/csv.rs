use super::{
    types::{DatasetMetadata, SkipReason},
    validator::DataValidator,
};
use crate::config::DataConfig;
use crate::error::{FootfallError, Result};
use crate::ml::features::{add_calendar_dummies, add_holiday_flag};
use crate::types::{float_values, is_numeric, TimeSeriesFrame};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// Name of the flag column appended from the holiday list.
pub const HOLIDAY_COLUMN: &str = "bank_hols";

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn read<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FootfallError::DataLoading(format!(
                "Input file {} does not exist",
                path.display()
            )));
        }
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| FootfallError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a tidy table: date index, target first, then covariates.
    ///
    /// Rows with an unreadable date or no target are skipped and logged.
    /// The result is sorted by date with duplicate dates removed (first kept).
    pub fn load<P: AsRef<Path>>(
        path: P,
        config: &DataConfig,
    ) -> Result<(TimeSeriesFrame, DatasetMetadata)> {
        let df = Self::read(&path)?;
        let (frame, mut metadata) = Self::from_dataframe(&df, config)?;
        metadata.file_path = path.as_ref().to_string_lossy().to_string();
        Ok((frame, metadata))
    }

    /// Build the frame from an already-read table.
    pub fn from_dataframe(
        df: &DataFrame,
        config: &DataConfig,
    ) -> Result<(TimeSeriesFrame, DatasetMetadata)> {
        let mut required = vec![config.date_column.clone(), config.target_column.clone()];
        required.extend(config.covariates.iter().cloned());
        DataValidator::validate_columns(df, &required)?;

        let value_columns = Self::value_columns(df, config);
        DataValidator::validate_numeric(df, &value_columns)?;

        let raw_dates = df.column(&config.date_column)?.cast(&DataType::String)?;
        let raw_dates: Vec<Option<String>> = raw_dates
            .str()?
            .iter()
            .map(|value| value.map(str::to_string))
            .collect();
        let target = float_values(df, &config.target_column)?;

        let mut rows: Vec<(NaiveDate, usize)> = Vec::with_capacity(df.height());
        let mut skipped_rows = 0;
        for (row, (raw, value)) in raw_dates.iter().zip(&target).enumerate() {
            let parsed = match raw {
                None => Err(SkipReason::MissingDate),
                Some(text) => NaiveDate::parse_from_str(text.trim(), &config.date_format)
                    .map_err(|_| SkipReason::BadDate(text.clone())),
            };
            let outcome = parsed.and_then(|date| match value {
                Some(v) if v.is_finite() => Ok(date),
                _ => Err(SkipReason::MissingTarget),
            });
            match outcome {
                Ok(date) => rows.push((date, row)),
                Err(reason) => {
                    warn!("Skipping row {}: {:?}", row, reason);
                    skipped_rows += 1;
                }
            }
        }

        rows.sort_by_key(|&(date, _)| date);
        let before = rows.len();
        rows.dedup_by_key(|(date, _)| *date);
        let duplicate_dates = before - rows.len();
        if duplicate_dates > 0 {
            info!("Dropped {} rows with duplicate dates", duplicate_dates);
        }

        let mut columns = Vec::with_capacity(value_columns.len());
        for name in &value_columns {
            let values = float_values(df, name)?;
            let ordered: Vec<Option<f64>> = rows.iter().map(|&(_, row)| values[row]).collect();
            columns.push(Column::new(name.as_str().into(), ordered));
        }
        let data = DataFrame::new(columns)?;

        let null_report = DataValidator::check_nulls(&data);
        if !null_report.is_empty() {
            warn!("Null values detected: {:?}", null_report);
        }
        DataValidator::validate_minimum_rows(data.height(), config.min_rows)?;

        let dates: Vec<NaiveDate> = rows.iter().map(|&(date, _)| date).collect();
        let metadata = DatasetMetadata {
            file_path: String::new(),
            num_rows: dates.len(),
            num_columns: value_columns.len(),
            columns: value_columns,
            date_range: dates.first().copied().zip(dates.last().copied()),
            skipped_rows,
            duplicate_dates,
        };
        info!(
            "Loaded {} days ({:?}) with {} columns, skipped {} rows",
            metadata.num_rows, metadata.date_range, metadata.num_columns, skipped_rows
        );

        Ok((TimeSeriesFrame::new(dates, data)?, metadata))
    }

    /// Load the configured input and append the configured calendar covariates.
    pub fn load_configured(config: &DataConfig) -> Result<(TimeSeriesFrame, DatasetMetadata)> {
        let input = config.input.as_ref().ok_or_else(|| {
            FootfallError::Configuration("[data] input path is not set".to_string())
        })?;
        let (mut frame, metadata) = Self::load(input, config)?;

        if config.calendar_dummies {
            frame = add_calendar_dummies(&frame)?;
        }
        if let Some(path) = &config.holidays {
            let holidays = Self::load_dates(path, &config.date_format)?;
            frame = add_holiday_flag(&frame, HOLIDAY_COLUMN, &holidays)?;
        }
        Ok((frame, metadata))
    }

    /// Read the first column of a CSV as a set of dates, skipping unreadable entries.
    pub fn load_dates<P: AsRef<Path>>(path: P, date_format: &str) -> Result<HashSet<NaiveDate>> {
        let df = Self::read(&path)?;
        let column = df.get_columns().first().ok_or_else(|| {
            FootfallError::DataLoading(format!("{} has no columns", path.as_ref().display()))
        })?;
        let text = column.cast(&DataType::String)?;

        let mut dates = HashSet::new();
        for (row, value) in text.str()?.iter().enumerate() {
            match value.map(|v| NaiveDate::parse_from_str(v.trim(), date_format)) {
                Some(Ok(date)) => {
                    dates.insert(date);
                }
                _ => warn!("Skipping unreadable date at row {}: {:?}", row, value),
            }
        }
        debug!("Loaded {} dates from {}", dates.len(), path.as_ref().display());
        Ok(dates)
    }

    /// Target first, then the configured covariates (or every other numeric column).
    fn value_columns(df: &DataFrame, config: &DataConfig) -> Vec<String> {
        let mut columns = vec![config.target_column.clone()];
        if !config.covariates.is_empty() {
            columns.extend(config.covariates.iter().cloned());
            return columns;
        }
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == config.date_column || name == config.target_column {
                continue;
            }
            if is_numeric(column.dtype()) {
                columns.push(name.to_string());
            } else {
                debug!("Ignoring non-numeric column '{}'", name);
            }
        }
        columns
    }
}
