pub mod calendar;
pub mod reorder;
pub mod supervised;

pub use calendar::{add_calendar_dummies, add_holiday_flag};
pub use reorder::{arrange_target_last, move_columns, reordered_columns, Placement};
pub use supervised::{
    lag_name, lead_name, parse_column_name, series_to_supervised, variable_columns,
};
