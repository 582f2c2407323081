use chrono::NaiveDate;
use footfall::ml::filtering::{remove_outliers, MadSide, OutlierFilter, DEFAULT_THRESHOLD};
use footfall::TimeSeriesFrame;
use polars::df;

fn frame(counts: &[f64]) -> TimeSeriesFrame {
    let start = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
    let dates = start.iter_days().take(counts.len()).collect();
    let rain: Vec<f64> = (0..counts.len()).map(|i| i as f64 / 10.0).collect();
    let df = df! {
        "count" => counts,
        "rain" => rain,
    }
    .unwrap();
    TimeSeriesFrame::new(dates, df).unwrap()
}

#[test]
fn test_spike_is_removed_with_its_row() {
    let counts = [10.0, 11.0, 12.0, 10.0, 11.0, 12.0, 10.0, 11.0, 500.0];
    let input = frame(&counts);

    let (filtered, report) = remove_outliers(&input, "count", DEFAULT_THRESHOLD).unwrap();

    assert_eq!(report.original_count, 9);
    assert_eq!(report.removed_count, 1);
    assert_eq!(report.retained_count, 8);
    assert_eq!(report.removed_dates, vec![input.dates()[8]]);
    assert!(report.degenerate_sides.is_empty());

    // Covariates travel with their day.
    assert_eq!(filtered.len(), 8);
    assert_eq!(filtered.values("count").unwrap(), counts[..8].to_vec());
    assert_eq!(filtered.values("rain").unwrap()[7], 0.7);
    assert_eq!(filtered.dates(), &input.dates()[..8]);
}

#[test]
fn test_scores_use_the_mad_of_their_side() {
    // Median 11; both side MADs are 0.5.
    let counts = [10.0, 11.0, 12.0, 10.0, 11.0, 12.0, 10.0, 11.0, 500.0];
    let scan = OutlierFilter::default().scan(&counts).unwrap();

    assert_eq!(scan.median, 11.0);
    assert_eq!(scan.left_mad, 0.5);
    assert_eq!(scan.right_mad, 0.5);
    let z_low = scan.scores[0].unwrap();
    assert!((z_low - 0.6745 * 1.0 / 0.5).abs() < 1e-12);
    assert_eq!(scan.flags, vec![false, false, false, false, false, false, false, false, true]);
}

#[test]
fn test_clean_series_is_untouched() {
    let counts: Vec<f64> = (0..30).map(|i| 100.0 + (i % 7) as f64).collect();
    let input = frame(&counts);

    let (filtered, report) = OutlierFilter::default().filter(&input, "count").unwrap();

    assert_eq!(report.removed_count, 0);
    assert_eq!(filtered.len(), input.len());
}

#[test]
fn test_higher_threshold_flags_no_more_days() {
    let counts = [50.0, 52.0, 49.0, 51.0, 48.0, 75.0, 50.0, 20.0, 51.0, 49.0];
    let strict = OutlierFilter::new(2.0).scan(&counts).unwrap();
    let lenient = OutlierFilter::new(10.0).scan(&counts).unwrap();

    assert!(lenient.outlier_count() <= strict.outlier_count());
    for (low, high) in strict.flags.iter().zip(&lenient.flags) {
        assert!(!high || *low);
    }
}

#[test]
fn test_constant_series_reports_both_sides() {
    let scan = OutlierFilter::default().scan(&[5.0; 12]).unwrap();

    assert_eq!(scan.outlier_count(), 0);
    assert_eq!(scan.degenerate_sides, vec![MadSide::Below, MadSide::Above]);
    assert!(scan.scores.iter().all(|z| *z == Some(0.0)));
}

#[test]
fn test_single_far_value_is_the_only_removal() {
    let input = frame(&[10.0, 11.0, 9.0, 10.0, 1000.0]);

    let (filtered, report) = remove_outliers(&input, "count", DEFAULT_THRESHOLD).unwrap();

    assert_eq!(report.removed_count, 1);
    assert_eq!(filtered.values("count").unwrap(), vec![10.0, 11.0, 9.0, 10.0]);
}
