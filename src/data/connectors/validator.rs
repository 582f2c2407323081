use crate::error::{FootfallError, Result};
use crate::types::is_numeric;
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Every listed column must be present
    pub fn validate_columns(df: &DataFrame, required: &[String]) -> Result<()> {
        let columns = df.get_column_names();
        let missing: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|name| !columns.iter().any(|col| col.as_str() == *name))
            .collect();

        if !missing.is_empty() {
            return Err(FootfallError::DataLoading(format!(
                "Missing required column(s): {:?} (found: {:?})",
                missing, columns
            )));
        }
        Ok(())
    }

    /// Listed columns must hold numbers
    pub fn validate_numeric(df: &DataFrame, columns: &[String]) -> Result<()> {
        for name in columns {
            let series = df.column(name)?;
            if !is_numeric(series.dtype()) {
                return Err(FootfallError::DataLoading(format!(
                    "Column '{}' must be numeric, found {:?}",
                    name,
                    series.dtype()
                )));
            }
        }
        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(rows: usize, min_rows: usize) -> Result<()> {
        if rows < min_rows {
            return Err(FootfallError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                rows, min_rows
            )));
        }
        Ok(())
    }

    /// Null counts of every column that has any
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|column| column.null_count() > 0)
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect()
    }
}
