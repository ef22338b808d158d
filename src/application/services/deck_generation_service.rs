//! Deck Generation Service - submit a build job and wait for it
//!
//! Submission and completion are separate because the provider builds decks
//! asynchronously. Waiting is a bounded poll loop: the first status check
//! happens right away and later ones are `interval` apart, for at most
//! `max_attempts` checks.

use std::sync::Arc;
use std::time::Duration;

use super::llm::prompt_builder::build_deck_brief;
use super::PipelineError;
use crate::application::ports::outbound::{DeckBuildRequest, DeckBuilderPort, SleeperPort};
use crate::domain::entities::{GammaGeneration, GenerationStatus};
use crate::domain::value_objects::{PipelineSettings, PresentationFormData};

/// Called with every status snapshot the poll loop receives
pub type PollObserver<'a> = &'a (dyn Fn(&GammaGeneration) + Send + Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            max_attempts: 20,
        }
    }
}

impl From<&PipelineSettings> for PollOptions {
    fn from(settings: &PipelineSettings) -> Self {
        Self {
            interval: settings.poll_interval(),
            max_attempts: settings.max_poll_attempts,
        }
    }
}

pub struct DeckGenerationService {
    builder: Arc<dyn DeckBuilderPort>,
    sleeper: Arc<dyn SleeperPort>,
    options: PollOptions,
}

impl DeckGenerationService {
    pub fn new(
        builder: Arc<dyn DeckBuilderPort>,
        sleeper: Arc<dyn SleeperPort>,
        options: PollOptions,
    ) -> Self {
        Self {
            builder,
            sleeper,
            options,
        }
    }

    /// Submit the deck brief; returns the job handle in its initial state
    pub async fn submit(
        &self,
        form: &PresentationFormData,
    ) -> Result<GammaGeneration, PipelineError> {
        let request = DeckBuildRequest::new(build_deck_brief(form));

        let generation = self
            .builder
            .submit(&request)
            .await
            .map_err(PipelineError::DeckBuilder)?;

        tracing::info!(
            "Submitted deck generation {} (status: {})",
            generation.generation_id,
            generation.status
        );
        Ok(generation)
    }

    /// Poll until the job completes, fails or runs out of attempts
    pub async fn wait_for_generation(
        &self,
        generation_id: &str,
        on_poll: Option<PollObserver<'_>>,
    ) -> Result<GammaGeneration, PipelineError> {
        let PollOptions {
            interval,
            max_attempts,
        } = self.options;

        for attempt in 1..=max_attempts {
            let generation = self
                .builder
                .fetch_status(generation_id)
                .await
                .map_err(PipelineError::DeckBuilder)?;

            tracing::debug!(
                "Generation {} poll {}/{}: {}",
                generation_id,
                attempt,
                max_attempts,
                generation.status
            );

            if let Some(observer) = on_poll {
                observer(&generation);
            }

            match generation.status {
                GenerationStatus::Completed => return Ok(generation),
                status if status.is_failure() => {
                    tracing::error!("Generation {} reported {}", generation_id, status);
                    return Err(PipelineError::GenerationFailed {
                        generation_id: generation_id.to_string(),
                        status,
                    });
                }
                _ => {}
            }

            if attempt < max_attempts {
                self.sleeper.sleep(interval).await;
            }
        }

        Err(PipelineError::GenerationTimedOut {
            generation_id: generation_id.to_string(),
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::services::test_support::{
        http_error, RecordingSleeper, ScriptedDeckBuilder,
    };
    use crate::domain::value_objects::sample_form;

    fn service(
        builder: Arc<ScriptedDeckBuilder>,
        sleeper: Arc<RecordingSleeper>,
        max_attempts: u32,
    ) -> DeckGenerationService {
        DeckGenerationService::new(
            builder,
            sleeper,
            PollOptions {
                interval: Duration::from_millis(250),
                max_attempts,
            },
        )
    }

    #[tokio::test]
    async fn test_submit_sends_brief_with_format_options() {
        let builder = Arc::new(ScriptedDeckBuilder::completing());
        let service = service(builder.clone(), Arc::new(RecordingSleeper::default()), 20);

        let generation = service.submit(&sample_form()).await.unwrap();
        assert_eq!(generation.generation_id, "gen-123");

        let submitted = builder.submitted.lock().unwrap();
        assert_eq!(submitted[0].dimensions, "16x9");
        assert_eq!(submitted[0].text_amount, "extensive");
        assert_eq!(submitted[0].image_source, "aiGenerated");
        assert!(submitted[0].input_text.contains("Acme"));
    }

    #[tokio::test]
    async fn test_submit_failure_propagates() {
        let builder = Arc::new(ScriptedDeckBuilder::failing_submit(401));
        let service = service(builder, Arc::new(RecordingSleeper::default()), 20);

        let err = service.submit(&sample_form()).await.unwrap_err();
        assert!(matches!(err, PipelineError::DeckBuilder(_)));
    }

    #[tokio::test]
    async fn test_returns_on_third_poll_when_completed() {
        let builder = Arc::new(ScriptedDeckBuilder::with_statuses(&[
            GenerationStatus::Running,
            GenerationStatus::Running,
            GenerationStatus::Completed,
        ]));
        let sleeper = Arc::new(RecordingSleeper::default());
        let service = service(builder.clone(), sleeper.clone(), 20);

        let seen = Mutex::new(Vec::new());
        let observer = |generation: &GammaGeneration| seen.lock().unwrap().push(generation.status);

        let generation = service
            .wait_for_generation("gen-123", Some(&observer))
            .await
            .unwrap();

        assert_eq!(generation.status, GenerationStatus::Completed);
        assert_eq!(generation.gamma_url.as_deref(), Some("https://gamma.app/docs/gen-123"));
        assert_eq!(builder.polls(), 3);
        assert_eq!(sleeper.sleeps.lock().unwrap().len(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                GenerationStatus::Running,
                GenerationStatus::Running,
                GenerationStatus::Completed
            ]
        );
    }

    #[tokio::test]
    async fn test_times_out_after_max_attempts() {
        let builder = Arc::new(ScriptedDeckBuilder::with_statuses(&[]));
        let sleeper = Arc::new(RecordingSleeper::default());
        let service = service(builder.clone(), sleeper.clone(), 5);

        let err = service.wait_for_generation("gen-123", None).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::GenerationTimedOut { attempts: 5, .. }
        ));
        assert_eq!(builder.polls(), 5);
        let sleeps = sleeper.sleeps.lock().unwrap();
        assert_eq!(sleeps.len(), 4);
        assert!(sleeps.iter().all(|d| *d == Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn test_failed_status_stops_polling_immediately() {
        let builder = Arc::new(ScriptedDeckBuilder::with_statuses(&[
            GenerationStatus::Running,
            GenerationStatus::Failed,
            GenerationStatus::Completed,
        ]));
        let service = service(builder.clone(), Arc::new(RecordingSleeper::default()), 20);

        let err = service.wait_for_generation("gen-123", None).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::GenerationFailed {
                status: GenerationStatus::Failed,
                ..
            }
        ));
        assert_eq!(builder.polls(), 2);
    }

    #[tokio::test]
    async fn test_error_status_is_a_failure() {
        let builder = Arc::new(ScriptedDeckBuilder::with_statuses(&[GenerationStatus::Error]));
        let service = service(builder, Arc::new(RecordingSleeper::default()), 20);

        let err = service.wait_for_generation("gen-123", None).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::GenerationFailed {
                status: GenerationStatus::Error,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_poll_transport_failure_propagates() {
        let builder = Arc::new(ScriptedDeckBuilder::new(vec![Err(http_error(500))]));
        let service = service(builder, Arc::new(RecordingSleeper::default()), 20);

        let err = service.wait_for_generation("gen-123", None).await.unwrap_err();
        assert!(matches!(err, PipelineError::DeckBuilder(_)));
    }
}
