use crate::active_learning::ActiveLearningStrategy;
use crate::classifiers::Classifier;
use crate::core::{Label, Record};
use crate::error::{Error, Result};
use crate::evaluation::{EvaluationStrategy, StatisticsRow, StatisticsTable, TimepointReport};
use crate::pipelines::FeaturePipeline;
use crate::storage::{Checkpoint, RunStore};
use crate::streams::{Batch, Summary, Timepoint};
use crate::tasks::EngineState;
use crate::windows::Window;
use serde_json::Value;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info};

/// Resumable test-then-train loop over the batches of a run.
///
/// Every timepoint is evaluated, sampled and folded into the window, then
/// checkpointed, and only then is the model refitted. A crash during
/// training therefore loses nothing that was committed: on restart the
/// checkpoint is restored and the refit is simply redone.
pub struct StreamEngine {
    store: Box<dyn RunStore>,
    pipeline: Box<dyn FeaturePipeline>,
    classifier: Box<dyn Classifier>,
    window: Window,
    evaluation: Box<dyn EvaluationStrategy>,
    active_learner: Option<Box<dyn ActiveLearningStrategy>>,
    initial_timepoint: Option<Timepoint>,
    parameters: Option<Value>,

    state: EngineState,
    summary: Summary,
    statistics: StatisticsTable,
    classes: Vec<Label>,
    timepoint: Option<Timepoint>,

    start_time: Instant,
    progress_tx: Option<Sender<TimepointReport>>,
}

impl StreamEngine {
    pub fn new(
        store: Box<dyn RunStore>,
        pipeline: Box<dyn FeaturePipeline>,
        classifier: Box<dyn Classifier>,
        window: Window,
        evaluation: Box<dyn EvaluationStrategy>,
    ) -> Self {
        Self {
            store,
            pipeline,
            classifier,
            window,
            evaluation,
            active_learner: None,
            initial_timepoint: None,
            parameters: None,
            state: EngineState::Uninitialized,
            summary: Summary::default(),
            statistics: StatisticsTable::default(),
            classes: Vec::new(),
            timepoint: None,
            start_time: Instant::now(),
            progress_tx: None,
        }
    }

    /// Without an active learner every record of a batch is labelled.
    pub fn with_active_learner(mut self, learner: Box<dyn ActiveLearningStrategy>) -> Self {
        self.active_learner = Some(learner);
        self
    }

    /// Last timepoint of the initially labelled data. Defaults to the first
    /// timepoint of the manifest.
    pub fn with_initial_timepoint(mut self, timepoint: Timepoint) -> Self {
        self.initial_timepoint = Some(timepoint);
        self
    }

    /// Run parameters dumped once when a run starts fresh.
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_progress(mut self, tx: Sender<TimepointReport>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn statistics(&self) -> &StatisticsTable {
        &self.statistics
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Last committed timepoint.
    pub fn timepoint(&self) -> Option<Timepoint> {
        self.timepoint
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn active_learner(&self) -> Option<&dyn ActiveLearningStrategy> {
        self.active_learner.as_deref()
    }

    fn set_state(&mut self, state: EngineState) {
        debug!(from = %self.state, to = %state, "engine state");
        self.state = state;
    }

    /// Restores the last checkpoint when the store has one, otherwise loads
    /// the manifest and trains on the initially labelled data. Calling it
    /// again after success is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Ok(());
        }
        self.check_configuration()?;
        self.set_state(EngineState::Initializing);

        if self.store.checkpoint_exists()? {
            self.set_state(EngineState::Restoring);
            self.restore()?;
        } else {
            self.bootstrap()?;
        }

        let next = if self.summary.is_done() {
            EngineState::Done
        } else {
            EngineState::Ready
        };
        self.set_state(next);
        Ok(())
    }

    fn check_configuration(&self) -> Result<()> {
        if let Some(learner) = &self.active_learner
            && learner.requires_probabilities()
            && !self.classifier.supports_probability()
        {
            return Err(Error::config(format!(
                "{} needs class probabilities but {} does not provide them",
                learner.name(),
                self.classifier.name()
            )));
        }
        Ok(())
    }

    fn bootstrap(&mut self) -> Result<()> {
        let mut summary = Summary::from_manifest(self.store.load_manifest()?)?;
        let cutoff = match self.initial_timepoint {
            Some(t) => t,
            None => summary
                .first_timepoint()
                .ok_or_else(|| Error::config("the manifest is empty"))?,
        };
        if summary.row(cutoff).is_none() {
            return Err(Error::config(format!(
                "initial timepoint {cutoff} is not in the manifest"
            )));
        }

        let initial: Vec<(Timepoint, String)> = summary
            .up_to(cutoff)
            .map(|(t, row)| (t, row.filename.clone()))
            .collect();
        let mut records = Vec::new();
        for (t, filename) in &initial {
            records.extend(self.store.load_batch(*t, filename)?.into_records());
            summary.mark_processed(*t)?;
        }

        self.window.initialize();
        self.window.add(cutoff, records)?;
        self.classes = self.window.classes()?;
        if self.classes.is_empty() {
            return Err(Error::data("the initially labelled data is empty"));
        }
        self.summary = summary;
        self.statistics = StatisticsTable::default();
        self.timepoint = Some(cutoff);
        info!(
            cutoff,
            records = self.window.len(),
            classes = self.classes.len(),
            location = %self.store.location(),
            "initial data loaded"
        );

        if let Some(parameters) = &self.parameters {
            self.store.save_parameters(parameters)?;
        }
        self.persist()?;
        self.train()
    }

    fn restore(&mut self) -> Result<()> {
        let checkpoint = self.store.load_checkpoint()?;
        self.window.restore(checkpoint.window)?;
        self.summary = checkpoint.summary;
        self.statistics = checkpoint.statistics;
        self.classes = checkpoint.classes;
        self.timepoint = checkpoint.timepoint;
        if let Some(learner) = self.active_learner.as_mut() {
            learner
                .base_mut()
                .oracle_mut()
                .ledger_mut()
                .resume(checkpoint.labels_queried);
        }
        info!(
            timepoint = ?self.timepoint,
            records = self.window.len(),
            location = %self.store.location(),
            "checkpoint restored"
        );
        self.train()
    }

    /// Writes the ledger, statistics and window as they are now.
    pub fn persist(&mut self) -> Result<()> {
        let checkpoint = Checkpoint {
            timepoint: self.timepoint,
            classes: self.classes.clone(),
            labels_queried: self
                .active_learner
                .as_ref()
                .map_or(0, |l| l.oracle().ledger().total_queried()),
            summary: self.summary.clone(),
            statistics: self.statistics.clone(),
            window: self.window.snapshot()?,
        };
        self.store.save_checkpoint(&checkpoint)?;
        debug!(timepoint = ?self.timepoint, "checkpoint written");
        Ok(())
    }

    /// Processes every remaining timepoint in ascending order.
    pub fn run(&mut self) -> Result<()> {
        self.initialize()?;
        self.start_time = Instant::now();

        let mut processed = 0usize;
        while self.step()?.is_some() {
            processed += 1;
        }
        if processed > 0 {
            // picks up the training time of the last timepoint
            self.persist()?;
        }
        info!(
            processed,
            last = ?self.timepoint,
            seconds = self.start_time.elapsed().as_secs_f64(),
            "stream done"
        );
        Ok(())
    }

    /// Processes the next unprocessed timepoint, if any, and returns it.
    pub fn step(&mut self) -> Result<Option<Timepoint>> {
        if self.state == EngineState::Uninitialized {
            return Err(Error::Uninitialized("stream engine"));
        }
        let Some((timepoint, filename)) = self
            .summary
            .next_unprocessed()
            .map(|(t, row)| (t, row.filename.clone()))
        else {
            self.set_state(EngineState::Done);
            return Ok(None);
        };

        let batch = self.store.load_batch(timepoint, &filename)?;
        self.process(batch)?;
        Ok(Some(timepoint))
    }

    fn process(&mut self, batch: Batch) -> Result<()> {
        let timepoint = batch.timepoint();
        let mut row = StatisticsRow::new(timepoint);

        self.set_state(EngineState::Testing);
        let started = Instant::now();
        let measurements =
            self.evaluation
                .evaluate(&batch, self.pipeline.as_ref(), self.classifier.as_ref())?;
        row.time.test = Some(started.elapsed().as_secs_f64());
        row.record_measurements(measurements);

        self.set_state(EngineState::Sampling);
        let started = Instant::now();
        let labelled = self.sample(&batch, &mut row)?;
        row.time.sample = Some(started.elapsed().as_secs_f64());

        self.window.add(timepoint, labelled)?;
        row.window = self.window.stats(&self.classes)?;
        self.statistics.upsert(row);
        self.summary.mark_processed(timepoint)?;
        self.timepoint = Some(timepoint);
        self.persist()?;

        self.set_state(EngineState::Training);
        let started = Instant::now();
        self.train()?;
        let train_time = started.elapsed().as_secs_f64();
        if let Some(row) = self.statistics.get_mut(timepoint) {
            row.time.train = Some(train_time);
        }

        self.report(timepoint);
        self.set_state(EngineState::Ready);
        Ok(())
    }

    fn sample(&mut self, batch: &Batch, row: &mut StatisticsRow) -> Result<Vec<Record>> {
        let Some(learner) = self.active_learner.as_mut() else {
            return Ok(batch.records().to_vec());
        };

        let probabilities = if learner.requires_probabilities() {
            let features = self.pipeline.transform(batch.records())?;
            let proba = self
                .classifier
                .predict_probability(&features)?
                .ok_or_else(|| {
                    Error::config(format!(
                        "{} returned no class probabilities",
                        self.classifier.name()
                    ))
                })?;
            Some(proba)
        } else {
            None
        };

        let labelled = learner.select_and_label(batch, probabilities.as_deref())?;
        row.active_learning = Some(learner.stats(batch.timepoint()));
        Ok(labelled)
    }

    fn train(&mut self) -> Result<()> {
        let data: Vec<Record> = self.window.records()?.cloned().collect();
        let features = self.pipeline.fit_transform(&data)?;
        let labels: Vec<Label> = data.iter().map(|r| r.label.clone()).collect();
        self.classifier.fit(&features, &labels)?;
        debug!(
            train_size = data.len(),
            classifier = self.classifier.name(),
            "model refitted"
        );
        Ok(())
    }

    fn report(&self, timepoint: Timepoint) {
        let Some(row) = self.statistics.get(timepoint) else {
            return;
        };
        let train_size = self.window.len();
        info!(
            timepoint,
            f1 = row.metric("f1"),
            log_loss = row.metric("log_loss"),
            train_size,
            "timepoint committed"
        );
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(TimepointReport {
                row: row.clone(),
                train_size,
                seconds: self.start_time.elapsed().as_secs_f64(),
            });
        }
    }
}
