use chrono::NaiveDate;
use footfall::ml::features::{arrange_target_last, move_columns, series_to_supervised, Placement};
use footfall::{FootfallError, SupervisedFrame, TimeSeriesFrame};
use polars::df;

fn dates(n: usize) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .iter_days()
        .take(n)
        .collect()
}

fn two_vars() -> TimeSeriesFrame {
    let df = df! {
        "count" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        "temp" => &[10.0, 20.0, 30.0, 40.0, 50.0],
    }
    .unwrap();
    TimeSeriesFrame::new(dates(5), df).unwrap()
}

#[test]
fn test_columns_are_lag_major() {
    let supervised = series_to_supervised(&two_vars(), 2, 1, true).unwrap();

    assert_eq!(
        supervised.column_names(),
        vec!["var1(t-2)", "var2(t-2)", "var1(t-1)", "var2(t-1)", "var1(t)", "var2(t)"]
    );
    assert_eq!(supervised.len(), 3);
    assert_eq!(
        supervised.rows().unwrap()[0],
        vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]
    );
}

#[test]
fn test_row_r_is_dated_by_its_current_step() {
    let input = two_vars();
    let supervised = series_to_supervised(&input, 2, 1, true).unwrap();

    assert_eq!(supervised.dates(), &input.dates()[2..]);
    // The (t) value of each row is the input value on that row's date.
    assert_eq!(supervised.values("var1(t)").unwrap(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_lead_columns() {
    let supervised = series_to_supervised(&two_vars(), 1, 2, true).unwrap();

    assert_eq!(
        supervised.column_names(),
        vec!["var1(t-1)", "var2(t-1)", "var1(t)", "var2(t)", "var1(t+1)", "var2(t+1)"]
    );
    // 5 rows - 1 lag - 1 extra step ahead.
    assert_eq!(supervised.len(), 3);
    assert_eq!(supervised.values("var1(t+1)").unwrap(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_without_dropnan_keeps_edge_rows() {
    let supervised = series_to_supervised(&two_vars(), 1, 1, false).unwrap();

    assert_eq!(supervised.len(), 5);
    assert_eq!(supervised.data().column("var1(t-1)").unwrap().null_count(), 1);
}

#[test]
fn test_interior_gap_drops_affected_rows() {
    let df = df! {
        "count" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        "temp" => &[Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)],
    }
    .unwrap();
    let input = TimeSeriesFrame::new(dates(6), df).unwrap();

    let supervised = series_to_supervised(&input, 1, 1, true).unwrap();

    // The gap on day 3 removes the row at day 3 (current) and day 4 (lag).
    assert_eq!(supervised.values("var1(t)").unwrap(), vec![2.0, 5.0, 6.0]);
    for name in supervised.column_names() {
        assert_eq!(supervised.data().column(&name).unwrap().null_count(), 0);
    }
}

#[test]
fn test_window_longer_than_series_is_rejected() {
    let result = series_to_supervised(&two_vars(), 5, 1, true);
    assert!(matches!(result, Err(FootfallError::InputShape(_))));

    let result = series_to_supervised(&two_vars(), 1, 0, true);
    assert!(matches!(result, Err(FootfallError::Configuration(_))));
}

#[test]
fn test_target_is_moved_last() {
    let supervised = series_to_supervised(&two_vars(), 2, 1, true).unwrap();
    let arranged = arrange_target_last(&supervised, 2).unwrap();

    assert_eq!(
        arranged.column_names(),
        vec!["var2(t-2)", "var2(t-1)", "var2(t)", "var1(t-1)", "var1(t-2)", "var1(t)"]
    );
    assert_eq!(arranged.dates(), supervised.dates());
    assert_eq!(arranged.values("var1(t)").unwrap(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_reordering_back_recovers_values() {
    let supervised = series_to_supervised(&two_vars(), 2, 1, true).unwrap();
    let arranged = arrange_target_last(&supervised, 2).unwrap();

    // Put the target block back in front of the first covariate column.
    let target_block: Vec<String> = ["var1(t-2)", "var1(t-1)"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let df = move_columns(arranged.data(), &target_block, "var2(t-2)", Placement::Before).unwrap();
    let df = move_columns(&df, &["var1(t-1)".to_string()], "var2(t-2)", Placement::After).unwrap();
    let df = move_columns(&df, &["var1(t)".to_string()], "var2(t-1)", Placement::After).unwrap();
    let restored = arranged.with_data(df).unwrap();

    assert_eq!(restored.column_names(), supervised.column_names());
    for name in supervised.column_names() {
        let bits = |frame: &SupervisedFrame| -> Vec<u64> {
            frame.values(&name).unwrap().iter().map(|v| v.to_bits()).collect()
        };
        let (before, after) = (bits(&supervised), bits(&restored));
        assert_eq!(before, after, "{}", name);
    }
}
