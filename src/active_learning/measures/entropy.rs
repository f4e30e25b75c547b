use crate::active_learning::measures::Measure;

/// Shannon entropy of each probability row, in base `n_classes` so that a
/// uniform row scores exactly 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Entropy;

impl Entropy {
    fn row_entropy(row: &[f64]) -> f64 {
        let k = row.len();
        if k < 2 {
            return 0.0;
        }
        let total: f64 = row.iter().filter(|p| p.is_finite() && **p > 0.0).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let nats: f64 = row
            .iter()
            .filter(|p| p.is_finite() && **p > 0.0)
            .map(|p| {
                let q = p / total;
                -q * q.ln()
            })
            .sum();
        nats / (k as f64).ln()
    }
}

impl Measure for Entropy {
    fn name(&self) -> &'static str {
        "entropy"
    }

    fn calculate(&self, probabilities: &[Vec<f64>]) -> Vec<f64> {
        probabilities.iter().map(|row| Self::row_entropy(row)).collect()
    }

    /// Higher entropy means more uncertain.
    fn check(&self, score: f64, threshold: f64) -> bool {
        self.max_value() - score < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_binary_row_has_max_entropy_and_is_queried() {
        let scores = Entropy.calculate(&[vec![0.5, 0.5]]);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!(Entropy.check(scores[0], 0.1));
    }

    #[test]
    fn base_follows_the_number_of_columns() {
        let scores = Entropy.calculate(&[vec![1.0 / 3.0; 3], vec![0.25; 4]]);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!((scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn certain_row_scores_zero_and_is_not_queried() {
        let scores = Entropy.calculate(&[vec![1.0, 0.0, 0.0]]);
        assert_eq!(scores[0], 0.0);
        assert!(!Entropy.check(scores[0], 0.5));
    }

    #[test]
    fn rows_are_normalised_before_scoring() {
        let a = Entropy.calculate(&[vec![2.0, 2.0]]);
        assert!((a[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_column_scores_zero() {
        assert_eq!(Entropy.calculate(&[vec![1.0]]), vec![0.0]);
    }
}
