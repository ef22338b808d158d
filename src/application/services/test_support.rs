//! Scripted port implementations shared by the service tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::outbound::{
    DeckBuildRequest, DeckBuilderPort, ProgressSink, ProgressSinkError, ProviderError,
    ResearchPort, ResearchQuery, ResearchResponse, SleeperPort, TextGenerationPort, TextRequest,
};
use crate::domain::entities::{GammaGeneration, GenerationStatus};
use crate::domain::value_objects::{GenerationProgress, ResearchResult};

pub fn http_error(status: u16) -> ProviderError {
    ProviderError::Status {
        status,
        body: format!("scripted HTTP {}", status),
    }
}

/// Text provider that replays canned answers in call order
#[derive(Default)]
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Well-formed answers for the three text stages of a full run
    pub fn well_formed() -> Self {
        Self::new(vec![
            Ok("```json\n{\"typography\": {\"headingFont\": \"Georgia\"}}\n```".to_string()),
            Ok(r#"{"competitors": [{"name": "Globex"}], "positioning": "Challenger", "marketShare": "12%"}"#.to_string()),
            Ok(r#"["Title Slide", "Executive Summary", "Appendix"]"#.to_string()),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerationPort for ScriptedLlm {
    async fn generate(&self, request: TextRequest) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Transport("script exhausted".to_string())))
    }
}

/// Research provider returning one fixed outcome
pub struct ScriptedResearch {
    outcome: Mutex<Option<Result<ResearchResponse, ProviderError>>>,
    pub queries: Mutex<Vec<ResearchQuery>>,
}

impl ScriptedResearch {
    pub fn succeeding() -> Self {
        Self::with(Ok(ResearchResponse {
            answer: Some("The industrial software market grows 12% a year.".to_string()),
            results: vec![ResearchResult {
                title: "Industrial software outlook".to_string(),
                url: "https://www.mckinsey.com/industrial-software".to_string(),
                content: "Market sized at $40B.".to_string(),
                score: 0.92,
            }],
        }))
    }

    pub fn failing(status: u16) -> Self {
        Self::with(Err(http_error(status)))
    }

    fn with(outcome: Result<ResearchResponse, ProviderError>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ResearchPort for ScriptedResearch {
    async fn search(&self, query: &ResearchQuery) -> Result<ResearchResponse, ProviderError> {
        self.queries.lock().unwrap().push(query.clone());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(ResearchResponse::default()))
    }
}

/// Deck builder replaying scripted poll results; reports `running` once exhausted
pub struct ScriptedDeckBuilder {
    submit_outcome: Mutex<Option<Result<GammaGeneration, ProviderError>>>,
    polls: Mutex<VecDeque<Result<GammaGeneration, ProviderError>>>,
    pub poll_count: AtomicU32,
    pub submitted: Mutex<Vec<DeckBuildRequest>>,
}

impl ScriptedDeckBuilder {
    pub fn new(polls: Vec<Result<GammaGeneration, ProviderError>>) -> Self {
        Self {
            submit_outcome: Mutex::new(Some(Ok(GammaGeneration::new(
                "gen-123",
                GenerationStatus::Pending,
            )))),
            polls: Mutex::new(polls.into()),
            poll_count: AtomicU32::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(statuses: &[GenerationStatus]) -> Self {
        Self::new(
            statuses
                .iter()
                .map(|status| Ok(snapshot(*status)))
                .collect(),
        )
    }

    /// Completes on the second poll
    pub fn completing() -> Self {
        Self::with_statuses(&[GenerationStatus::Running, GenerationStatus::Completed])
    }

    pub fn failing_submit(status: u16) -> Self {
        let builder = Self::new(vec![]);
        *builder.submit_outcome.lock().unwrap() = Some(Err(http_error(status)));
        builder
    }

    pub fn polls(&self) -> u32 {
        self.poll_count.load(Ordering::SeqCst)
    }
}

/// A status snapshot for the scripted job; completed snapshots carry a URL
pub fn snapshot(status: GenerationStatus) -> GammaGeneration {
    let generation = GammaGeneration::new("gen-123", status);
    if status == GenerationStatus::Completed {
        generation.with_url("https://gamma.app/docs/gen-123")
    } else {
        generation
    }
}

#[async_trait]
impl DeckBuilderPort for ScriptedDeckBuilder {
    async fn submit(&self, request: &DeckBuildRequest) -> Result<GammaGeneration, ProviderError> {
        self.submitted.lock().unwrap().push(request.clone());
        self.submit_outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(GammaGeneration::new("gen-123", GenerationStatus::Pending)))
    }

    async fn fetch_status(&self, _generation_id: &str) -> Result<GammaGeneration, ProviderError> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(snapshot(GenerationStatus::Running)))
    }
}

/// Records requested sleeps instead of sleeping
#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

#[async_trait]
impl SleeperPort for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Keeps every event it receives
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<GenerationProgress>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<GenerationProgress> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: &GenerationProgress) -> Result<(), ProgressSinkError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
