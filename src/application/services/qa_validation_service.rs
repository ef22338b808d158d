//! QA Validation Service - quality report for a generated deck
//!
//! Each `QaCheck` judges one category. The report counts passes and
//! failures, lists one warning per failed check, and repeats failures of
//! critical categories under `critical_issues`. The verdict comes from
//! `QaVerdictPolicy`.

use chrono::Utc;
use rand::Rng;

use crate::domain::entities::GammaGeneration;
use crate::domain::value_objects::{
    qa_pass_probability_or_default, QaCategory, QaValidation, QaVerdictPolicy,
};

pub trait QaCheck: Send + Sync {
    fn category(&self) -> QaCategory;

    /// `true` when the deck passes this check
    fn evaluate(&self, deck: &GammaGeneration) -> bool;
}

/// Passes with a fixed probability.
///
/// Stands in until rule-based checks over slide content exist; the deck
/// builder only returns a URL today, so there is nothing to inspect.
pub struct RandomizedCheck {
    category: QaCategory,
    pass_probability: f64,
}

impl RandomizedCheck {
    pub fn new(category: QaCategory, pass_probability: f64) -> Self {
        Self {
            category,
            pass_probability: qa_pass_probability_or_default(pass_probability),
        }
    }
}

impl QaCheck for RandomizedCheck {
    fn category(&self) -> QaCategory {
        self.category
    }

    fn evaluate(&self, _deck: &GammaGeneration) -> bool {
        rand::thread_rng().gen_bool(self.pass_probability)
    }
}

pub struct QaValidationService {
    checks: Vec<Box<dyn QaCheck>>,
    policy: QaVerdictPolicy,
}

impl QaValidationService {
    pub fn new(checks: Vec<Box<dyn QaCheck>>, policy: QaVerdictPolicy) -> Self {
        Self { checks, policy }
    }

    /// One `RandomizedCheck` per category
    pub fn randomized(pass_probability: f64, policy: QaVerdictPolicy) -> Self {
        let checks = QaCategory::ALL
            .iter()
            .map(|category| {
                Box::new(RandomizedCheck::new(*category, pass_probability)) as Box<dyn QaCheck>
            })
            .collect();
        Self::new(checks, policy)
    }

    pub fn run_qa_validation(&self, deck: &GammaGeneration) -> QaValidation {
        let mut checks_passed = 0u32;
        let mut checks_failed = 0u32;
        let mut warnings = Vec::new();
        let mut critical_issues = Vec::new();

        for check in &self.checks {
            let category = check.category();
            if check.evaluate(deck) {
                checks_passed += 1;
                continue;
            }

            checks_failed += 1;
            warnings.push(format!("{} check flagged issues", category.display_name()));
            if category.is_critical() {
                critical_issues.push(format!(
                    "{} failed on a critical check",
                    category.display_name()
                ));
            }
        }

        let overall_status = self.policy.verdict(checks_failed);
        tracing::info!(
            "QA for generation {}: {:?} ({} passed, {} failed)",
            deck.generation_id,
            overall_status,
            checks_passed,
            checks_failed
        );

        QaValidation {
            timestamp: Utc::now(),
            overall_status,
            checks_passed,
            checks_failed,
            checks_total: checks_passed + checks_failed,
            critical_issues,
            warnings,
            presentation_url: deck.gamma_url.clone(),
        }
    }
}
