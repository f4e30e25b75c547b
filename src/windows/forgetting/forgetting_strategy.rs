use crate::core::Record;

/// Selective forgetting applied when a bounded window evicts its oldest
/// partition.
pub trait ForgettingStrategy {
    fn name(&self) -> &'static str;

    /// Picks records of `to_forget` that must survive the eviction, given
    /// what stays in the window (`remaining`). The result is bounded by
    /// `to_forget`.
    fn sample_data(&mut self, to_forget: &[Record], remaining: &[&Record]) -> Vec<Record>;
}
