pub mod minmax;

pub use minmax::{expand_scale_columns, ColumnRange, MinMaxScaler};
