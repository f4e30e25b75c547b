use crate::active_learning::measures::Measure;

/// Negated gap between the two most probable classes. More negative means
/// a larger gap, values near zero mean the top two classes are tied.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxMargin;

impl Measure for MaxMargin {
    fn name(&self) -> &'static str {
        "max_margin"
    }

    fn calculate(&self, probabilities: &[Vec<f64>]) -> Vec<f64> {
        probabilities
            .iter()
            .map(|row| {
                let mut first = f64::NEG_INFINITY;
                let mut second = f64::NEG_INFINITY;
                for &p in row {
                    if p > first {
                        second = first;
                        first = p;
                    } else if p > second {
                        second = p;
                    }
                }
                if !first.is_finite() {
                    return 0.0;
                }
                if !second.is_finite() {
                    second = 0.0;
                }
                -(first - second).abs()
            })
            .collect()
    }

    fn check(&self, score: f64, threshold: f64) -> bool {
        score < threshold
    }
}
