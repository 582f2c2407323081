use super::supervised::{lag_name, lead_name};
use crate::error::{FootfallError, Result};
use crate::types::{column_names, SupervisedFrame};
use polars::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    After,
    Before,
}

/// New column order with `to_move` placed directly after or before `reference`.
///
/// Columns not being moved keep their relative order and every column
/// appears exactly once. `reference` may itself be one of the moved columns.
pub fn reordered_columns(
    columns: &[String],
    to_move: &[String],
    reference: &str,
    placement: Placement,
) -> Result<Vec<String>> {
    let known: HashSet<&str> = columns.iter().map(String::as_str).collect();
    let mut moving: HashSet<&str> = HashSet::new();
    for name in to_move {
        if !known.contains(name.as_str()) {
            return Err(missing_column(name));
        }
        if !moving.insert(name.as_str()) {
            return Err(FootfallError::Configuration(format!(
                "Column '{}' listed twice to move",
                name
            )));
        }
    }
    let ref_pos = columns
        .iter()
        .position(|name| name == reference)
        .ok_or_else(|| missing_column(reference))?;

    let (head, mut middle): (&[String], Vec<String>) = match placement {
        Placement::After => (&columns[..=ref_pos], to_move.to_vec()),
        Placement::Before => {
            let mut middle = to_move.to_vec();
            if !moving.contains(reference) {
                middle.push(reference.to_string());
            }
            (&columns[..ref_pos], middle)
        }
    };

    let placed: HashSet<String> = middle.iter().cloned().collect();
    let mut order: Vec<String> = head
        .iter()
        .filter(|name| !placed.contains(*name))
        .cloned()
        .collect();
    order.append(&mut middle);
    let taken: HashSet<String> = order.iter().cloned().collect();
    order.extend(columns.iter().filter(|name| !taken.contains(*name)).cloned());

    Ok(order)
}

/// Reorder a polars frame with [`reordered_columns`].
pub fn move_columns(
    df: &DataFrame,
    to_move: &[String],
    reference: &str,
    placement: Placement,
) -> Result<DataFrame> {
    let order = reordered_columns(&column_names(df), to_move, reference, placement)?;
    Ok(df.select(order)?)
}

/// Move the target's lags and `var1(t)` to the end, leaving `var1(t)` last.
pub fn arrange_target_last(frame: &SupervisedFrame, n_in: usize) -> Result<SupervisedFrame> {
    let names = frame.column_names();
    let reference = names
        .last()
        .cloned()
        .ok_or_else(|| FootfallError::InputShape("Frame has no columns".to_string()))?;

    let mut target_columns: Vec<String> = (1..=n_in).map(|lag| lag_name(1, lag)).collect();
    target_columns.push(lead_name(1, 0));

    let data = move_columns(frame.data(), &target_columns, &reference, Placement::After)?;
    frame.with_data(data)
}

fn missing_column(name: &str) -> FootfallError {
    FootfallError::Configuration(format!("Column '{}' not found", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_after_reference() {
        let order = reordered_columns(
            &names(&["a", "b", "c", "d", "e"]),
            &names(&["a", "b"]),
            "d",
            Placement::After,
        )
        .unwrap();
        assert_eq!(order, names(&["c", "d", "a", "b", "e"]));
    }

    #[test]
    fn test_move_before_reference() {
        let order = reordered_columns(
            &names(&["a", "b", "c", "d", "e"]),
            &names(&["e"]),
            "b",
            Placement::Before,
        )
        .unwrap();
        assert_eq!(order, names(&["a", "e", "b", "c", "d"]));
    }

    #[test]
    fn test_reference_inside_moved_set() {
        let order = reordered_columns(
            &names(&["x", "y", "z"]),
            &names(&["z", "x"]),
            "z",
            Placement::After,
        )
        .unwrap();
        assert_eq!(order, names(&["y", "z", "x"]));
    }

    #[test]
    fn test_missing_column_is_configuration_error() {
        let result = reordered_columns(&names(&["a"]), &names(&["b"]), "a", Placement::After);
        assert!(matches!(result, Err(FootfallError::Configuration(_))));
    }
}
