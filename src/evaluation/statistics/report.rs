use crate::evaluation::StatisticsRow;
use std::fmt::{Display, Formatter, Result};

/// Progress message emitted after each completed timepoint.
#[derive(Debug, Clone)]
pub struct TimepointReport {
    pub row: StatisticsRow,
    pub train_size: usize,
    pub seconds: f64,
}

impl Display for TimepointReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "timepoint={}, f1={:.6}, log_loss={:.6}, train_size={}, t={:.3}s",
            self.row.timepoint,
            self.row.metric("f1"),
            self.row.metric("log_loss"),
            self.train_size,
            self.seconds
        )?;
        if let Some(al) = &self.row.active_learning {
            write!(f, ", queried={}, cost={:.3}", al.queried, al.cost)?;
        }
        Ok(())
    }
}
