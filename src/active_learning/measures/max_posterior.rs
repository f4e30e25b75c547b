use crate::active_learning::measures::Measure;

/// Least-confident score: the highest class probability of each row.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPosterior;

impl Measure for MaxPosterior {
    fn name(&self) -> &'static str {
        "max_posterior"
    }

    fn calculate(&self, probabilities: &[Vec<f64>]) -> Vec<f64> {
        probabilities
            .iter()
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    fn check(&self, score: f64, threshold: f64) -> bool {
        score < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_largest_probability() {
        let scores = MaxPosterior.calculate(&[vec![0.2, 0.7, 0.1], vec![0.5, 0.5]]);
        assert_eq!(scores, vec![0.7, 0.5]);
        assert!(MaxPosterior.check(0.5, 0.6));
        assert!(!MaxPosterior.check(0.7, 0.6));
    }
}
