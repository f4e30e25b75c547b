use std::f64::consts::PI;

/// Running mean and variance of one feature (Welford's update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaussianEstimator {
    count: f64,
    mean: f64,
    m2: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.count += 1.0;
        let delta = value - self.mean;
        self.mean += delta / self.count;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance; 0 before two observations.
    pub fn variance(&self) -> f64 {
        if self.count > 1.0 {
            self.m2 / self.count
        } else {
            0.0
        }
    }

    /// Log density at `value` with `smoothing` added to the variance.
    pub fn log_density(&self, value: f64, smoothing: f64) -> f64 {
        let var = self.variance() + smoothing;
        if var <= 0.0 {
            return if value == self.mean { 0.0 } else { f64::NEG_INFINITY };
        }
        let diff = value - self.mean;
        -0.5 * ((2.0 * PI * var).ln() + diff * diff / var)
    }
}
