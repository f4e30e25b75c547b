use crate::core::Label;
use crate::error::Result;

/// Batch classifier refitted from scratch on the window after every
/// timepoint.
pub trait Classifier {
    fn name(&self) -> &'static str;

    /// Replaces the model with one trained on `features`/`labels`.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Label]) -> Result<()>;

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Label>>;

    /// Class probabilities, one row per input and one column per entry of
    /// [`classes`](Classifier::classes). `None` when the model cannot
    /// produce them.
    fn predict_probability(&self, features: &[Vec<f64>]) -> Result<Option<Vec<Vec<f64>>>>;

    fn supports_probability(&self) -> bool;

    /// Classes seen by the last fit, sorted.
    fn classes(&self) -> &[Label];

    fn is_fitted(&self) -> bool;
}
