use crate::storage::FsStore;
use crate::tasks::StreamEngine;
use crate::ui::types::build::{
    BuildError, build_active_learner, build_classifier, build_evaluation, build_pipeline,
    build_window,
};
use crate::ui::types::choices::RunConfig;
use tracing::info;

/// Assembles a ready-to-run engine whose results land in
/// `<manifest dir>/results/<strategy>/<availability>`.
pub fn build_engine(config: &RunConfig) -> Result<StreamEngine, BuildError> {
    let learner = config
        .active_learning
        .as_ref()
        .map(|al| build_active_learner(al, config.seed))
        .transpose()?;
    let availability = config
        .active_learning
        .as_ref()
        .and_then(|al| al.oracle.availability());

    let base = FsStore::new(&config.manifest, config.target_column.clone());
    let evaluation = build_evaluation(&config.evaluation, &base)?;
    let store = base.for_run(learner.as_ref().map(|l| l.name()), availability);
    info!(results = %store.run_dir().display(), "run configured");

    let parameters = serde_json::to_value(config)
        .map_err(|e| BuildError::InvalidParameter(format!("config is not serializable: {e}")))?;

    let mut engine = StreamEngine::new(
        Box::new(store),
        build_pipeline(&config.pipeline)?,
        build_classifier(&config.classifier)?,
        build_window(&config.window, config.seed)?,
        evaluation,
    )
    .with_parameters(parameters);
    if let Some(learner) = learner {
        engine = engine.with_active_learner(learner);
    }
    if let Some(t) = config.initial_timepoint {
        engine = engine.with_initial_timepoint(t);
    }
    Ok(engine)
}
