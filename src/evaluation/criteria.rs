use crate::core::Label;
use crate::evaluation::Measurement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LOG_LOSS_EPS: f64 = 1e-15;

/// Switchable metric suite applied to one set of predictions.
///
/// Tracks:
/// - `accuracy`;
/// - support-weighted `precision`, `recall` and `f1` over the union of true
///   and predicted labels;
/// - `log_loss` against the classifier's class order;
/// - per class `precision_class_{label}`, `recall_class_{label}`,
///   `f1_class_{label}` and `support_class_{label}`.
///
/// Ratios with an empty denominator are 0. `log_loss` is `NaN` when it is
/// undefined for the evaluated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationCriteria {
    pub accuracy: bool,
    pub precision: bool,
    pub recall: bool,
    pub f1: bool,
    pub log_loss: bool,
    pub class_wise: bool,
}

impl Default for EvaluationCriteria {
    fn default() -> Self {
        Self {
            accuracy: true,
            precision: true,
            recall: true,
            f1: true,
            log_loss: true,
            class_wise: true,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ClassCounts {
    true_positive: usize,
    predicted: usize,
    support: usize,
}

impl ClassCounts {
    fn precision(&self) -> f64 {
        ratio(self.true_positive, self.predicted)
    }

    fn recall(&self) -> f64 {
        ratio(self.true_positive, self.support)
    }

    fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }
}

#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl EvaluationCriteria {
    /// Computes the enabled metrics. `y_true` and `y_pred` must have the same
    /// length; `probabilities` columns follow `model_classes`.
    pub fn evaluate(
        &self,
        y_true: &[Label],
        y_pred: &[Label],
        probabilities: Option<&[Vec<f64>]>,
        model_classes: &[Label],
    ) -> Vec<Measurement> {
        let mut counts: BTreeMap<&str, ClassCounts> = BTreeMap::new();
        let mut correct = 0usize;
        for (t, p) in y_true.iter().zip(y_pred) {
            counts.entry(t.as_str()).or_default().support += 1;
            counts.entry(p.as_str()).or_default().predicted += 1;
            if t == p {
                correct += 1;
                counts.entry(t.as_str()).or_default().true_positive += 1;
            }
        }
        let total = y_true.len();

        let weighted = |metric: fn(&ClassCounts) -> f64| -> f64 {
            if total == 0 {
                return f64::NAN;
            }
            counts
                .values()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };

        let mut m = Vec::new();
        if self.accuracy {
            let acc = if total == 0 { f64::NAN } else { ratio(correct, total) };
            m.push(Measurement::new("accuracy", acc));
        }
        if self.precision {
            m.push(Measurement::new("precision", weighted(ClassCounts::precision)));
        }
        if self.recall {
            m.push(Measurement::new("recall", weighted(ClassCounts::recall)));
        }
        if self.f1 {
            m.push(Measurement::new("f1", weighted(ClassCounts::f1)));
        }
        if self.log_loss {
            let labels: Vec<&str> = counts.keys().copied().collect();
            let value = probabilities
                .map_or(f64::NAN, |proba| log_loss(y_true, proba, model_classes, &labels));
            m.push(Measurement::new("log_loss", value));
        }
        if self.class_wise {
            for (label, c) in &counts {
                m.push(Measurement::new(format!("precision_class_{label}"), c.precision()));
                m.push(Measurement::new(format!("recall_class_{label}"), c.recall()));
                m.push(Measurement::new(format!("f1_class_{label}"), c.f1()));
                m.push(Measurement::new(
                    format!("support_class_{label}"),
                    c.support as f64,
                ));
            }
        }
        m
    }
}

/// Mean negative log-likelihood of the true labels. `NaN` unless the
/// evaluated labels are exactly the classifier's classes and every row has
/// one column per class.
fn log_loss(y_true: &[Label], proba: &[Vec<f64>], classes: &[Label], labels: &[&str]) -> f64 {
    if y_true.is_empty() || proba.len() != y_true.len() {
        return f64::NAN;
    }
    if labels.len() != classes.len()
        || labels.iter().zip(classes).any(|(l, c)| *l != c.as_str())
    {
        return f64::NAN;
    }
    let mut sum = 0.0;
    for (label, row) in y_true.iter().zip(proba) {
        if row.len() != classes.len() {
            return f64::NAN;
        }
        let Some(idx) = classes.iter().position(|c| c == label) else {
            return f64::NAN;
        };
        let clipped: Vec<f64> = row
            .iter()
            .map(|p| p.clamp(LOG_LOSS_EPS, 1.0 - LOG_LOSS_EPS))
            .collect();
        let norm: f64 = clipped.iter().sum();
        sum -= (clipped[idx] / norm).ln();
    }
    sum / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<Label> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn get(m: &[Measurement], name: &str) -> f64 {
        m.iter()
            .find(|x| x.name == name)
            .map(|x| x.value)
            .unwrap_or_else(|| panic!("missing {name}"))
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9
    }

    #[test]
    fn weighted_scores_follow_true_support() {
        let y_true = labels(&["a", "a", "a", "b"]);
        let y_pred = labels(&["a", "a", "b", "b"]);
        let m = EvaluationCriteria::default().evaluate(&y_true, &y_pred, None, &[]);

        assert!(approx_eq(get(&m, "accuracy"), 0.75));
        // a: p=1 r=2/3, b: p=1/2 r=1
        assert!(approx_eq(get(&m, "precision"), (3.0 * 1.0 + 0.5) / 4.0));
        assert!(approx_eq(get(&m, "recall"), 0.75));
        let f1_a = 2.0 * (2.0 / 3.0) / (1.0 + 2.0 / 3.0);
        let f1_b = 2.0 * 0.5 / 1.5;
        assert!(approx_eq(get(&m, "f1"), (3.0 * f1_a + f1_b) / 4.0));
        assert_eq!(get(&m, "support_class_a"), 3.0);
        assert!(get(&m, "log_loss").is_nan());
    }

    #[test]
    fn log_loss_without_probabilities_keeps_its_column() {
        let y_true = labels(&["a", "b"]);
        let with = EvaluationCriteria::default().evaluate(
            &y_true,
            &y_true,
            Some(&[vec![0.9, 0.1], vec![0.2, 0.8]]),
            &labels(&["a", "b"]),
        );
        let without = EvaluationCriteria::default().evaluate(&y_true, &y_true, None, &[]);

        let names = |m: &[Measurement]| m.iter().map(|x| x.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&with), names(&without));
        assert!(get(&with, "log_loss").is_finite());
        assert!(get(&without, "log_loss").is_nan());
    }

    #[test]
    fn never_predicted_class_scores_zero_precision() {
        let y_true = labels(&["a", "b"]);
        let y_pred = labels(&["a", "a"]);
        let m = EvaluationCriteria::default().evaluate(&y_true, &y_pred, None, &[]);
        assert_eq!(get(&m, "precision_class_b"), 0.0);
        assert_eq!(get(&m, "f1_class_b"), 0.0);
        assert_eq!(get(&m, "recall_class_a"), 1.0);
    }

    #[test]
    fn log_loss_uses_model_class_order() {
        let y_true = labels(&["a", "b"]);
        let y_pred = labels(&["a", "b"]);
        let classes = labels(&["a", "b"]);
        let proba = vec![vec![0.8, 0.2], vec![0.4, 0.6]];
        let m = EvaluationCriteria::default().evaluate(&y_true, &y_pred, Some(&proba), &classes);
        let expected = -(0.8f64.ln() + 0.6f64.ln()) / 2.0;
        assert!(approx_eq(get(&m, "log_loss"), expected));
    }

    #[test]
    fn log_loss_is_nan_for_a_mismatched_label_set() {
        let y_true = labels(&["a", "a"]);
        let y_pred = labels(&["a", "a"]);
        let classes = labels(&["a", "b"]);
        let proba = vec![vec![0.9, 0.1], vec![0.7, 0.3]];
        let m = EvaluationCriteria::default().evaluate(&y_true, &y_pred, Some(&proba), &classes);
        assert!(get(&m, "log_loss").is_nan());
    }

    #[test]
    fn zero_probabilities_are_clipped() {
        let y_true = labels(&["a", "b"]);
        let classes = labels(&["a", "b"]);
        let proba = vec![vec![0.0, 1.0], vec![0.0, 1.0]];
        let m = EvaluationCriteria::default().evaluate(&y_true, &y_true, Some(&proba), &classes);
        let v = get(&m, "log_loss");
        assert!(v.is_finite() && v > 10.0);
    }

    #[test]
    fn disabled_criteria_are_omitted() {
        let criteria = EvaluationCriteria {
            accuracy: true,
            precision: false,
            recall: false,
            f1: true,
            log_loss: false,
            class_wise: false,
        };
        let y = labels(&["a"]);
        let m = criteria.evaluate(&y, &y, None, &[]);
        let names: Vec<&str> = m.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["accuracy", "f1"]);
    }
}
