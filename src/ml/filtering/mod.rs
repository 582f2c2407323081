mod outliers;

pub use outliers::{
    double_mad_outliers, remove_outliers, MadSide, OutlierFilter, OutlierReport, OutlierScan,
    DEFAULT_THRESHOLD,
};
