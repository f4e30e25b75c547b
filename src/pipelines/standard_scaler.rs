use crate::core::Record;
use crate::error::{Error, Result};
use crate::pipelines::FeaturePipeline;
use crate::pipelines::feature_pipeline::numeric_rows;

/// Centers every column on its training mean and scales it to unit
/// variance. Constant columns are only centered.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&self, mut rows: Vec<Vec<f64>>) -> Result<Vec<Vec<f64>>> {
        for row in &mut rows {
            if row.len() != self.means.len() {
                return Err(Error::data(format!(
                    "expected {} features, got {}",
                    self.means.len(),
                    row.len()
                )));
            }
            for ((x, m), s) in row.iter_mut().zip(&self.means).zip(&self.scales) {
                *x = (*x - m) / s;
            }
        }
        Ok(rows)
    }
}

impl FeaturePipeline for StandardScaler {
    fn name(&self) -> &'static str {
        "standard_scaler"
    }

    fn fit_transform(&mut self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        let rows = numeric_rows(records)?;
        let width = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in &rows {
            if row.len() != width {
                return Err(Error::data("feature rows have different widths"));
            }
            for (m, x) in means.iter_mut().zip(row) {
                *m += x / n;
            }
        }
        let mut scales = vec![0.0; width];
        for row in &rows {
            for ((s, m), x) in scales.iter_mut().zip(&means).zip(row) {
                *s += (x - m).powi(2) / n;
            }
        }
        for s in &mut scales {
            *s = if *s > 0.0 { s.sqrt() } else { 1.0 };
        }

        self.means = means;
        self.scales = scales;
        self.fitted = true;
        self.apply(rows)
    }

    fn transform(&self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        if !self.fitted {
            return Err(Error::NotFitted("standard scaler"));
        }
        self.apply(numeric_rows(records)?)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
