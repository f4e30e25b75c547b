use crate::classifiers::Classifier;
use crate::core::Label;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared view of how many times a [`ScriptedClassifier`] was fitted.
#[derive(Clone, Default)]
pub struct FitCounter(Arc<AtomicUsize>);

impl FitCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Predicts the majority label of its last fit. Probabilities are uniform
/// over the fitted classes unless disabled; a fit can be scripted to fail.
#[derive(Default)]
pub struct ScriptedClassifier {
    classes: Vec<Label>,
    majority: Option<Label>,
    with_probabilities: bool,
    fail_on_fit: Option<usize>,
    fits: FitCounter,
}

impl ScriptedClassifier {
    pub fn new() -> (Self, FitCounter) {
        let s = Self {
            with_probabilities: true,
            ..Self::default()
        };
        let handle = s.fits.clone();
        (s, handle)
    }

    pub fn without_probabilities(mut self) -> Self {
        self.with_probabilities = false;
        self
    }

    /// The `n`th call to `fit` (1-based) returns an error.
    pub fn failing_on_fit(mut self, n: usize) -> Self {
        self.fail_on_fit = Some(n);
        self
    }
}

impl Classifier for ScriptedClassifier {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn fit(&mut self, _features: &[Vec<f64>], labels: &[Label]) -> Result<()> {
        let n = self.fits.0.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_fit == Some(n) {
            return Err(Error::data("scripted fit failure"));
        }
        let mut counts: BTreeMap<&Label, usize> = BTreeMap::new();
        for l in labels {
            *counts.entry(l).or_default() += 1;
        }
        self.majority = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(l, _)| (*l).clone());
        self.classes = counts.keys().map(|l| (*l).clone()).collect();
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Label>> {
        let label = self.majority.clone().ok_or(Error::NotFitted("scripted"))?;
        Ok(vec![label; features.len()])
    }

    fn predict_probability(&self, features: &[Vec<f64>]) -> Result<Option<Vec<Vec<f64>>>> {
        if !self.is_fitted() {
            return Err(Error::NotFitted("scripted"));
        }
        if !self.with_probabilities {
            return Ok(None);
        }
        let k = self.classes.len();
        Ok(Some(vec![vec![1.0 / k as f64; k]; features.len()]))
    }

    fn supports_probability(&self) -> bool {
        self.with_probabilities
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn is_fitted(&self) -> bool {
        self.majority.is_some()
    }
}
