use crate::evaluation::{EvaluationStrategy, HoldOut, Prequential};
use crate::storage::{FsStore, RunStore};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::EvaluationChoice;

/// Hold-out data is read through `store`, relative to its manifest.
pub fn build_evaluation(
    choice: &EvaluationChoice,
    store: &FsStore,
) -> Result<Box<dyn EvaluationStrategy>, BuildError> {
    match choice {
        EvaluationChoice::Prequential(p) => Ok(Box::new(Prequential::new(p.into()))),
        EvaluationChoice::HoldOut(p) => {
            let Some(reference) = p.path.to_str() else {
                return Err(BuildError::InvalidParameter(format!(
                    "hold-out path is not valid UTF-8: {}",
                    p.path.display()
                )));
            };
            let batch = store.load_batch(0, reference)?;
            let strategy = HoldOut::new(batch.into_records(), (&p.criteria).into())?;
            Ok(Box::new(strategy))
        }
    }
}
