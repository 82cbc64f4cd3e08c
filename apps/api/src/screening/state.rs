//! Candidate state carried through one screening run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::decision::DecisionNode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("`{field}` must be set before {stage}")]
    Missing {
        field: &'static str,
        stage: &'static str,
    },
}

/// Partial update produced by one workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateUpdate {
    ExperienceLevel(String),
    SkillMatch(String),
    Response(String),
}

/// Mutable record owned by the orchestrator for the duration of one run.
///
/// `application` is fixed at creation; the remaining fields are filled in
/// as the steps complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateState {
    application: String,
    experience_level: Option<String>,
    skill_match: Option<String>,
    response: Option<String>,
}

impl CandidateState {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            ..Self::default()
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn experience_level(&self) -> Option<&str> {
        self.experience_level.as_deref()
    }

    pub fn skill_match(&self) -> Option<&str> {
        self.skill_match.as_deref()
    }

    #[cfg(test)]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Merges a step's partial update into the state.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::ExperienceLevel(value) => self.experience_level = Some(value),
            StateUpdate::SkillMatch(value) => self.skill_match = Some(value),
            StateUpdate::Response(value) => self.response = Some(value),
        }
    }

    /// Both classifications, or a `StateError` naming the first one missing.
    pub fn classifications(&self, stage: &'static str) -> Result<(&str, &str), StateError> {
        let experience_level = self.experience_level().ok_or(StateError::Missing {
            field: "experience_level",
            stage,
        })?;
        let skill_match = self.skill_match().ok_or(StateError::Missing {
            field: "skill_match",
            stage,
        })?;
        Ok((experience_level, skill_match))
    }

    /// Consumes a fully populated state into the run's result.
    pub fn into_result(self, decision: DecisionNode) -> Result<ScreeningResult, StateError> {
        let missing = |field| StateError::Missing {
            field,
            stage: "completing the run",
        };
        Ok(ScreeningResult {
            experience_level: self.experience_level.ok_or_else(|| missing("experience_level"))?,
            skill_match: self.skill_match.ok_or_else(|| missing("skill_match"))?,
            response: self.response.ok_or_else(|| missing("response"))?,
            decision,
        })
    }
}

/// Outcome of one screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Raw completion text from the experience classifier.
    pub experience_level: String,
    /// Raw completion text from the skill assessment.
    pub skill_match: String,
    pub response: String,
    pub decision: DecisionNode,
}
