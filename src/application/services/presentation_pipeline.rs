//! Presentation Pipeline - runs every generation stage in order
//!
//! Stages run strictly one after another and each result feeds the later
//! stages that need it. A progress event is emitted right before and right
//! after each stage. The first error that escapes a stage ends the run: one
//! `error` event is emitted and the error is returned to the caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::competitive_intelligence_service::CompetitiveIntelligenceService;
use super::content_architecture_service::{ArchitectureInputs, ContentArchitectureService};
use super::deck_generation_service::{DeckGenerationService, PollOptions};
use super::financial_data_service::FinancialDataService;
use super::market_research_service::MarketResearchService;
use super::qa_validation_service::QaValidationService;
use super::style_profile_service::StyleProfileService;
use super::PipelineError;
use crate::application::ports::outbound::{
    DeckBuilderPort, ProgressSink, ResearchPort, SleeperPort, TextGenerationPort,
};
use crate::domain::entities::GammaGeneration;
use crate::domain::value_objects::{
    GenerationProgress, GenerationStep, PipelineSettings, PresentationFormData, QaValidation,
};

const GENERIC_FAILURE_MESSAGE: &str = "Presentation generation failed unexpectedly";

/// Output of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationResult {
    pub presentation_url: String,
    pub qa_validation: QaValidation,
}

/// External providers the pipeline talks to
#[derive(Clone)]
pub struct PipelinePorts {
    pub text: Arc<dyn TextGenerationPort>,
    pub research: Arc<dyn ResearchPort>,
    pub deck_builder: Arc<dyn DeckBuilderPort>,
    pub sleeper: Arc<dyn SleeperPort>,
}

pub struct PresentationPipeline {
    style_profile: StyleProfileService,
    market_research: MarketResearchService,
    competitive: CompetitiveIntelligenceService,
    financials: FinancialDataService,
    architecture: ContentArchitectureService,
    deck_generation: DeckGenerationService,
    qa: QaValidationService,
}

impl PresentationPipeline {
    pub fn new(ports: PipelinePorts, settings: &PipelineSettings) -> Self {
        let policies = settings.fallbacks;

        Self {
            style_profile: StyleProfileService::new(ports.text.clone(), policies.deck_dna_parse),
            market_research: MarketResearchService::new(
                ports.research,
                settings.research_max_results,
                policies.research_transport,
            ),
            competitive: CompetitiveIntelligenceService::new(
                ports.text.clone(),
                settings.research_prompt_budget_chars,
                policies.competitive_parse,
            ),
            financials: FinancialDataService::default(),
            architecture: ContentArchitectureService::new(ports.text, policies.architecture_parse),
            deck_generation: DeckGenerationService::new(
                ports.deck_builder,
                ports.sleeper,
                PollOptions::from(settings),
            ),
            qa: QaValidationService::randomized(settings.qa_pass_probability, settings.qa_verdict),
        }
    }

    /// Replace the QA checks (e.g. with deterministic ones)
    pub fn with_qa(mut self, qa: QaValidationService) -> Self {
        self.qa = qa;
        self
    }

    pub fn with_financials(mut self, financials: FinancialDataService) -> Self {
        self.financials = financials;
        self
    }

    /// Run the whole workflow for one request
    pub async fn generate_full_presentation(
        &self,
        form: &PresentationFormData,
        progress: &dyn ProgressSink,
    ) -> Result<PresentationResult, PipelineError> {
        let reporter = ProgressReporter::new(progress);

        tracing::info!("Starting presentation generation for {}", form.company_name);

        match self.run_stages(form, &reporter).await {
            Ok(result) => {
                tracing::info!(
                    "Presentation for {} ready at {}",
                    form.company_name,
                    result.presentation_url
                );
                Ok(result)
            }
            Err(err) => {
                tracing::error!("Presentation generation failed: {}", err);

                let message = match err.to_string() {
                    message if message.trim().is_empty() => GENERIC_FAILURE_MESSAGE.to_string(),
                    message => message,
                };

                if let Err(sink_err) = progress.emit(&GenerationProgress::error(reporter.last(), message)) {
                    tracing::warn!("Could not report generation failure: {}", sink_err);
                }

                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        form: &PresentationFormData,
        reporter: &ProgressReporter<'_>,
    ) -> Result<PresentationResult, PipelineError> {
        // Stage 1: style profile
        reporter.report(GenerationProgress::running(
            GenerationStep::DeckDna,
            10,
            "Extracting Deck DNA from reference materials...",
        ))?;
        let deck_dna = self.style_profile.extract_deck_dna(form).await?;
        reporter.report(GenerationProgress::completed(
            GenerationStep::DeckDna,
            20,
            "Deck DNA extracted",
        ))?;

        // Stage 2: market research
        reporter.report(GenerationProgress::running(
            GenerationStep::Research,
            25,
            "Conducting market research...",
        ))?;
        let research = self.market_research.conduct_research(form).await?;
        reporter.report(GenerationProgress::completed(
            GenerationStep::Research,
            35,
            format!("Market research complete ({} sources)", research.results.len()),
        ))?;

        // Stage 3: competitive intelligence
        reporter.report(GenerationProgress::running(
            GenerationStep::Competitive,
            40,
            "Analyzing competitive landscape...",
        ))?;
        let competitive = self.competitive.analyze_competitors(form, &research).await?;
        reporter.report(GenerationProgress::completed(
            GenerationStep::Competitive,
            50,
            format!(
                "Competitive analysis complete ({} competitors)",
                competitive.competitors.len()
            ),
        ))?;

        // Stage 4: financial data
        reporter.report(GenerationProgress::running(
            GenerationStep::Financial,
            55,
            "Processing financial data...",
        ))?;
        let financials = self.financials.process_financials(&form.financial_files);
        reporter.report(GenerationProgress::completed(
            GenerationStep::Financial,
            60,
            "Financial data processed",
        ))?;

        // Stage 5: content architecture
        reporter.report(GenerationProgress::running(
            GenerationStep::Architecture,
            65,
            "Designing content architecture...",
        ))?;
        let outline = self
            .architecture
            .create_content_architecture(ArchitectureInputs {
                form,
                deck_dna: &deck_dna,
                research: &research,
                competitive: &competitive,
                financials: &financials,
            })
            .await?;
        reporter.report(GenerationProgress::completed(
            GenerationStep::Architecture,
            70,
            format!("Content architecture ready ({} slides)", outline.len()),
        ))?;

        // Stage 6: deck generation
        reporter.report(GenerationProgress::running(
            GenerationStep::Gamma,
            75,
            "Submitting presentation to Gamma...",
        ))?;
        let submitted = self.deck_generation.submit(form).await?;
        reporter.report(GenerationProgress::running(
            GenerationStep::Gamma,
            80,
            "Gamma is building the presentation...",
        ))?;
        let log_poll = |generation: &GammaGeneration| {
            tracing::debug!(
                "Generation {} is {}",
                generation.generation_id,
                generation.status
            );
        };
        let generation = self
            .deck_generation
            .wait_for_generation(&submitted.generation_id, Some(&log_poll))
            .await?;
        let presentation_url = generation
            .gamma_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| PipelineError::MissingPresentationUrl(generation.generation_id.clone()))?;
        reporter.report(GenerationProgress::completed(
            GenerationStep::Gamma,
            90,
            "Presentation generated",
        ))?;

        // Stage 7: QA
        reporter.report(GenerationProgress::running(
            GenerationStep::Qa,
            95,
            "Running quality checks...",
        ))?;
        let qa_validation = self.qa.run_qa_validation(&generation);
        reporter.report(GenerationProgress::completed(
            GenerationStep::Qa,
            100,
            "Presentation generation complete",
        ))?;

        Ok(PresentationResult {
            presentation_url,
            qa_validation,
        })
    }
}

/// Forwards events to the caller's sink and remembers the last progress value
struct ProgressReporter<'a> {
    sink: &'a dyn ProgressSink,
    last: AtomicU8,
}

impl<'a> ProgressReporter<'a> {
    fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            last: AtomicU8::new(0),
        }
    }

    fn report(&self, event: GenerationProgress) -> Result<(), PipelineError> {
        self.last.store(event.progress, Ordering::Relaxed);
        self.sink.emit(&event)?;
        Ok(())
    }

    fn last(&self) -> u8 {
        self.last.load(Ordering::Relaxed)
    }
}
