//! In-memory registry of generation runs
//!
//! Every run keeps its full progress history plus a broadcast channel for
//! live subscribers. Recording an event and subscribing both happen under the
//! same lock, so a subscriber sees each event exactly once: either in the
//! replayed history or on the channel.
//!
//! Running runs are never dropped. Once more than the configured number of
//! runs have finished, the ones that finished longest ago are evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::application::dto::{
    GenerationRunDto, GenerationRunSummaryDto, RunErrorDto, RunStateDto,
};
use crate::application::ports::outbound::{ProgressSink, ProgressSinkError};
use crate::application::services::{PipelineError, PresentationPipeline, PresentationResult};
use crate::domain::value_objects::{GenerationProgress, GenerationRunId, PresentationFormData};

const CHANNEL_CAPACITY: usize = 64;
const DEFAULT_MAX_FINISHED_RUNS: usize = 200;

struct RunRecord {
    company_name: String,
    state: RunStateDto,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<GenerationProgress>,
    result: Option<PresentationResult>,
    error: Option<RunErrorDto>,
    /// Dropped once the run finishes so live receivers see the channel close
    sender: Option<broadcast::Sender<GenerationProgress>>,
    /// Position in finishing order, set when the run completes or fails
    finished_seq: Option<u64>,
}

impl RunRecord {
    fn new(company_name: &str) -> Self {
        let now = Utc::now();
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            company_name: company_name.to_string(),
            state: RunStateDto::Running,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
            result: None,
            error: None,
            sender: Some(sender),
            finished_seq: None,
        }
    }

    fn last_progress(&self) -> u8 {
        self.events.last().map(|e| e.progress).unwrap_or(0)
    }

    fn to_dto(&self, run_id: GenerationRunId) -> GenerationRunDto {
        GenerationRunDto {
            run_id: run_id.to_string(),
            company_name: self.company_name.clone(),
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            events: self.events.clone(),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }

    fn to_summary(&self, run_id: GenerationRunId) -> GenerationRunSummaryDto {
        GenerationRunSummaryDto {
            run_id: run_id.to_string(),
            company_name: self.company_name.clone(),
            state: self.state,
            progress: self.last_progress(),
            created_at: self.created_at,
        }
    }
}

/// Replayed history plus the live feed, if the run is still going
pub struct RunSubscription {
    pub history: Vec<GenerationProgress>,
    pub live: Option<broadcast::Receiver<GenerationProgress>>,
}

pub struct GenerationRunRegistry {
    runs: Mutex<HashMap<GenerationRunId, RunRecord>>,
    max_finished: usize,
    finish_counter: AtomicU64,
}

impl Default for GenerationRunRegistry {
    fn default() -> Self {
        Self::with_finished_limit(DEFAULT_MAX_FINISHED_RUNS)
    }
}

impl GenerationRunRegistry {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finished_limit(max_finished: usize) -> Self {
        Self {
            runs: Mutex::new(HashMap::new()),
            max_finished,
            finish_counter: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GenerationRunId, RunRecord>> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new run in the running state
    pub fn start(&self, company_name: &str) -> GenerationRunId {
        let run_id = GenerationRunId::new();
        self.lock().insert(run_id, RunRecord::new(company_name));
        tracing::info!("Registered generation run {} for {}", run_id, company_name);
        run_id
    }

    /// Register a run and drive the pipeline for it on a background task
    pub fn spawn_run(
        self: &Arc<Self>,
        pipeline: Arc<PresentationPipeline>,
        form: PresentationFormData,
    ) -> GenerationRunId {
        let run_id = self.start(&form.company_name);
        let registry = Arc::clone(self);

        tokio::spawn(async move {
            let sink = registry.sink(run_id);
            match pipeline.generate_full_presentation(&form, &sink).await {
                Ok(result) => registry.complete(run_id, result),
                Err(err) => registry.fail(run_id, &err),
            }
        });

        run_id
    }

    /// Progress sink that records into this run
    pub fn sink(self: &Arc<Self>, run_id: GenerationRunId) -> RunProgressSink {
        RunProgressSink {
            registry: Arc::clone(self),
            run_id,
        }
    }

    fn record(
        &self,
        run_id: GenerationRunId,
        event: &GenerationProgress,
    ) -> Result<(), ProgressSinkError> {
        let mut runs = self.lock();
        let record = runs.get_mut(&run_id).ok_or(ProgressSinkError::Closed)?;

        record.events.push(event.clone());
        record.updated_at = Utc::now();
        if let Some(sender) = &record.sender {
            // No subscribers is fine
            let _ = sender.send(event.clone());
        }
        Ok(())
    }

    pub fn complete(&self, run_id: GenerationRunId, result: PresentationResult) {
        let mut runs = self.lock();
        if let Some(record) = runs.get_mut(&run_id) {
            record.state = RunStateDto::Completed;
            record.result = Some(result);
            record.updated_at = Utc::now();
            record.sender = None;
            record.finished_seq = Some(self.finish_counter.fetch_add(1, Ordering::Relaxed));
            tracing::info!("Generation run {} completed", run_id);
        }
        self.evict_finished(&mut runs);
    }

    pub fn fail(&self, run_id: GenerationRunId, err: &PipelineError) {
        let mut runs = self.lock();
        if let Some(record) = runs.get_mut(&run_id) {
            record.state = RunStateDto::Failed;
            record.error = Some(RunErrorDto::from(err));
            record.updated_at = Utc::now();
            record.sender = None;
            record.finished_seq = Some(self.finish_counter.fetch_add(1, Ordering::Relaxed));
            tracing::warn!("Generation run {} failed: {}", run_id, err);
        }
        self.evict_finished(&mut runs);
    }

    /// Drop the longest-finished runs beyond the limit
    fn evict_finished(&self, runs: &mut HashMap<GenerationRunId, RunRecord>) {
        let mut finished: Vec<(u64, GenerationRunId)> = runs
            .iter()
            .filter_map(|(run_id, record)| record.finished_seq.map(|seq| (seq, *run_id)))
            .collect();

        if finished.len() <= self.max_finished {
            return;
        }

        finished.sort_by_key(|(seq, _)| *seq);
        let excess = finished.len() - self.max_finished;
        for (_, run_id) in finished.into_iter().take(excess) {
            runs.remove(&run_id);
            tracing::debug!("Evicted finished generation run {}", run_id);
        }
    }

    pub fn get(&self, run_id: GenerationRunId) -> Option<GenerationRunDto> {
        self.lock().get(&run_id).map(|record| record.to_dto(run_id))
    }

    /// Newest first
    pub fn list(&self) -> Vec<GenerationRunSummaryDto> {
        let mut summaries: Vec<_> = self
            .lock()
            .iter()
            .map(|(run_id, record)| record.to_summary(*run_id))
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    pub fn subscribe(&self, run_id: GenerationRunId) -> Option<RunSubscription> {
        let runs = self.lock();
        let record = runs.get(&run_id)?;
        Some(RunSubscription {
            history: record.events.clone(),
            live: record.sender.as_ref().map(|sender| sender.subscribe()),
        })
    }
}

pub struct RunProgressSink {
    registry: Arc<GenerationRunRegistry>,
    run_id: GenerationRunId,
}

impl ProgressSink for RunProgressSink {
    fn emit(&self, event: &GenerationProgress) -> Result<(), ProgressSinkError> {
        tracing::debug!(
            "Run {} [{}] {}% {}",
            self.run_id,
            event.step,
            event.progress,
            event.message
        );
        self.registry.record(self.run_id, event)
    }
}
