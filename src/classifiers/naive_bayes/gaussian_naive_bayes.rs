use crate::classifiers::Classifier;
use crate::classifiers::naive_bayes::GaussianEstimator;
use crate::core::Label;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

/// Gaussian naive Bayes: class priors plus one normal estimator per
/// (class, feature).
///
/// `var_smoothing` is scaled by the largest feature variance of the fit
/// and added to every per-class variance.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    var_smoothing: f64,
    classes: Vec<Label>,
    log_priors: Vec<f64>,
    estimators: Vec<Vec<GaussianEstimator>>,
    epsilon: f64,
    n_features: usize,
}

impl Default for GaussianNaiveBayes {
    fn default() -> Self {
        Self::new(DEFAULT_VAR_SMOOTHING)
    }
}

impl GaussianNaiveBayes {
    pub fn new(var_smoothing: f64) -> Self {
        Self {
            var_smoothing,
            classes: Vec::new(),
            log_priors: Vec::new(),
            estimators: Vec::new(),
            epsilon: 0.0,
            n_features: 0,
        }
    }

    fn check_width(&self, features: &[Vec<f64>]) -> Result<()> {
        if let Some(row) = features.iter().find(|r| r.len() != self.n_features) {
            return Err(Error::data(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, row: &[f64]) -> Vec<f64> {
        self.log_priors
            .iter()
            .zip(&self.estimators)
            .map(|(prior, per_feature)| {
                prior
                    + per_feature
                        .iter()
                        .zip(row)
                        .map(|(e, &x)| e.log_density(x, self.epsilon))
                        .sum::<f64>()
            })
            .collect()
    }

    fn require_fitted(&self) -> Result<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(Error::NotFitted("gaussian naive bayes"))
        }
    }
}

impl Classifier for GaussianNaiveBayes {
    fn name(&self) -> &'static str {
        "gaussian_naive_bayes"
    }

    fn fit(&mut self, features: &[Vec<f64>], labels: &[Label]) -> Result<()> {
        if features.len() != labels.len() {
            return Err(Error::data(format!(
                "{} feature rows for {} labels",
                features.len(),
                labels.len()
            )));
        }
        if features.is_empty() {
            return Err(Error::data("cannot fit on an empty training set"));
        }
        let n_features = features[0].len();

        let mut per_class: BTreeMap<&str, (f64, Vec<GaussianEstimator>)> = BTreeMap::new();
        let mut overall = vec![GaussianEstimator::new(); n_features];
        for (row, label) in features.iter().zip(labels) {
            if row.len() != n_features {
                return Err(Error::data("feature rows have different widths"));
            }
            let (count, estimators) = per_class
                .entry(label.as_str())
                .or_insert_with(|| (0.0, vec![GaussianEstimator::new(); n_features]));
            *count += 1.0;
            for ((e, o), &x) in estimators.iter_mut().zip(overall.iter_mut()).zip(row) {
                e.add_observation(x);
                o.add_observation(x);
            }
        }

        let max_var = overall
            .iter()
            .map(GaussianEstimator::variance)
            .fold(0.0, f64::max);
        let total = features.len() as f64;

        self.epsilon = self.var_smoothing * max_var;
        self.n_features = n_features;
        self.classes = per_class.keys().map(|c| c.to_string()).collect();
        self.log_priors = per_class.values().map(|(c, _)| (c / total).ln()).collect();
        self.estimators = per_class.into_values().map(|(_, e)| e).collect();
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Label>> {
        self.require_fitted()?;
        self.check_width(features)?;
        Ok(features
            .iter()
            .map(|row| {
                let jll = self.joint_log_likelihood(row);
                let best = jll
                    .iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                        if v > bv { (i, v) } else { (bi, bv) }
                    })
                    .0;
                self.classes[best].clone()
            })
            .collect())
    }

    fn predict_probability(&self, features: &[Vec<f64>]) -> Result<Option<Vec<Vec<f64>>>> {
        self.require_fitted()?;
        self.check_width(features)?;
        Ok(Some(
            features
                .iter()
                .map(|row| {
                    let jll = self.joint_log_likelihood(row);
                    let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    if !max.is_finite() {
                        return vec![1.0 / jll.len() as f64; jll.len()];
                    }
                    let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
                    let sum: f64 = exp.iter().sum();
                    exp.into_iter().map(|v| v / sum).collect()
                })
                .collect(),
        ))
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }
}
