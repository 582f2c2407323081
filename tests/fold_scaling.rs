use chrono::NaiveDate;
use footfall::engines::scaling::MinMaxScaler;
use footfall::engines::splitters::{FoldSplitter, HoldoutSplitter};
use footfall::{FootfallError, SupervisedFrame};
use polars::df;
use polars::prelude::Column;

fn supervised() -> SupervisedFrame {
    let dates = NaiveDate::from_ymd_opt(2021, 1, 1)
        .unwrap()
        .iter_days()
        .take(6)
        .collect();
    let df = df! {
        "var2(t-1)" => &[0.0, 5.0, 10.0, 2.0, 20.0, -10.0],
        "var3(t-1)" => &[3.0, 3.0, 3.0, 3.0, 4.0, 3.0],
        "var1(t)" => &[100.0, 110.0, 120.0, 130.0, 140.0, 150.0],
    }
    .unwrap();
    SupervisedFrame::new(dates, df).unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_holdout_partitions_in_order() {
    let data = supervised();
    let fold = HoldoutSplitter::new(2).split(&data).unwrap();

    assert_eq!(fold.train.len() + fold.test.len(), data.len());
    assert_eq!(fold.test.dates(), &data.dates()[4..]);
    assert_eq!(fold.train.dates(), &data.dates()[..4]);
}

#[test]
fn test_scaler_uses_training_rows_only() {
    let fold = HoldoutSplitter::new(2).split(&supervised()).unwrap();
    let (scaled, scaler) = MinMaxScaler::fit_transform_fold(&fold, &names(&["var2(t-1)"])).unwrap();

    let range = &scaler.params()[0];
    assert_eq!((range.min, range.max), (0.0, 10.0));
    assert_eq!(scaled.train.values("var2(t-1)").unwrap(), vec![0.0, 0.5, 1.0, 0.2]);

    // Test values outside the training range are not clamped.
    assert_eq!(scaled.test.values("var2(t-1)").unwrap(), vec![2.0, -1.0]);

    // Unlisted columns are untouched.
    assert_eq!(scaled.test.values("var1(t)").unwrap(), vec![140.0, 150.0]);
}

#[test]
fn test_scaling_does_not_touch_the_source_fold() {
    let fold = HoldoutSplitter::new(2).split(&supervised()).unwrap();
    let _ = MinMaxScaler::fit_transform_fold(&fold, &names(&["var2(t-1)"])).unwrap();

    assert_eq!(fold.train.values("var2(t-1)").unwrap(), vec![0.0, 5.0, 10.0, 2.0]);
}

#[test]
fn test_constant_training_column_is_finite() {
    let fold = HoldoutSplitter::new(2).split(&supervised()).unwrap();
    let (scaled, _) = MinMaxScaler::fit_transform_fold(&fold, &names(&["var3(t-1)"])).unwrap();

    assert_eq!(scaled.train.values("var3(t-1)").unwrap(), vec![0.0; 4]);
    assert_eq!(scaled.test.values("var3(t-1)").unwrap(), vec![1.0, 0.0]);
}

#[test]
fn test_unknown_column_is_a_configuration_error() {
    let fold = HoldoutSplitter::new(2).split(&supervised()).unwrap();
    let result = MinMaxScaler::fit(&fold.train, &names(&["var9(t)"]));

    assert!(matches!(result, Err(FootfallError::Configuration(_))));
}

#[test]
fn test_mutating_train_leaves_test_alone() {
    let fold = HoldoutSplitter::new(2).split(&supervised()).unwrap();
    let mut train = fold.train.clone();
    train
        .data_mut()
        .with_column(Column::new("var1(t)".into(), vec![0.0; 4]))
        .unwrap();

    assert_eq!(train.values("var1(t)").unwrap(), vec![0.0; 4]);
    assert_eq!(fold.test.values("var1(t)").unwrap(), vec![140.0, 150.0]);
    assert_eq!(fold.train.values("var1(t)").unwrap(), vec![100.0, 110.0, 120.0, 130.0]);
}
