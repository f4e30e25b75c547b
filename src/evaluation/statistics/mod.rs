mod report;
mod statistics_row;
mod statistics_table;

pub use report::TimepointReport;
pub use statistics_row::{PhaseTimings, StatisticsRow};
pub use statistics_table::{CurveFormat, StatisticsTable};
