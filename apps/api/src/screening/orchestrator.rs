//! Screening orchestrator — runs one application through the fixed workflow.
//!
//! Flow: Start → categorize_experience → Categorized → assess_skillset → Assessed
//!       → route → Decided → decision node → End.
//!
//! Steps run strictly in sequence. Any failure aborts the run with no partial result.
//! The decision node always runs before the run ends.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::llm_client::{CompletionService, LlmError};
use crate::screening::classifier::ClassifierStep;
use crate::screening::router::{route, ClassificationMode};
use crate::screening::state::{CandidateState, ScreeningResult, StateError};
use crate::screening::template::TemplateError;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("application text is empty")]
    EmptyApplication,

    #[error(transparent)]
    Completion(#[from] LlmError),

    #[error("invalid screening state: {0}")]
    State(#[from] StateError),

    #[error("prompt template error: {0}")]
    Template(#[from] TemplateError),
}

/// Position of a run in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Categorized,
    Assessed,
    Decided,
    End,
}

impl Stage {
    fn after(step: ClassifierStep) -> Self {
        match step {
            ClassifierStep::CategorizeExperience => Self::Categorized,
            ClassifierStep::AssessSkillset => Self::Assessed,
        }
    }
}

/// Runs screening workflows against an injected completion service.
///
/// Holds no per-run state, so one `Screener` may serve any number of runs,
/// concurrently or not.
#[derive(Clone)]
pub struct Screener {
    completion: Arc<dyn CompletionService>,
    mode: ClassificationMode,
}

impl Screener {
    pub fn new(completion: Arc<dyn CompletionService>, mode: ClassificationMode) -> Self {
        Self { completion, mode }
    }

    pub fn mode(&self) -> ClassificationMode {
        self.mode
    }

    /// Screens a single application end to end.
    pub async fn screen(&self, application: &str) -> Result<ScreeningResult, ScreeningError> {
        if application.trim().is_empty() {
            return Err(ScreeningError::EmptyApplication);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("screening", %run_id, mode = ?self.mode);
        self.run(CandidateState::new(application))
            .instrument(span)
            .await
    }

    async fn run(&self, mut state: CandidateState) -> Result<ScreeningResult, ScreeningError> {
        let mut stage = Stage::Start;
        debug!(?stage, "screening run started");

        for step in ClassifierStep::SEQUENCE {
            let update = step.run(&state, self.completion.as_ref()).await?;
            state.apply(update);
            stage = Stage::after(step);
            debug!(?stage, step = step.name(), "classifier step applied");
        }

        let decision = route(&state, self.mode)?;
        stage = Stage::Decided;
        debug!(?stage, decision = decision.name(), "route selected");

        state.apply(decision.run());
        let result = state.into_result(decision)?;
        stage = Stage::End;
        debug!(?stage, "screening run finished");

        info!(
            experience_level = %result.experience_level,
            skill_match = %result.skill_match,
            decision = decision.name(),
            "Application screened"
        );
        Ok(result)
    }

    /// Screens applications one after another in input order, each with its own
    /// state. Stops at the first failure.
    pub async fn screen_batch(
        &self,
        applications: &[String],
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        let mut results = Vec::with_capacity(applications.len());
        for application in applications {
            results.push(self.screen(application).await?);
        }
        info!("Screened batch of {} applications", results.len());
        Ok(results)
    }
}
