//! Router — picks the decision node from the two classifications.
//!
//! Precedence: skill match wins over senior experience, which wins over rejection.
//! In `Exact` mode the comparisons are case-sensitive string equality against the
//! raw completion text, so any decoration falls through to rejection.

use serde::{Deserialize, Serialize};

use crate::screening::classifier::{ExperienceLevel, SkillMatch};
use crate::screening::decision::DecisionNode;
use crate::screening::state::{CandidateState, StateError};

const MATCH_LABEL: &str = "Match";
const SENIOR_LABEL: &str = "Senior-level";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    #[default]
    Exact,
    Normalized,
}

impl ClassificationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "normalized" => Some(Self::Normalized),
            _ => None,
        }
    }
}

/// Routes a state whose classifications are both set.
pub fn route(state: &CandidateState, mode: ClassificationMode) -> Result<DecisionNode, StateError> {
    let (experience_level, skill_match) = state.classifications("routing")?;
    Ok(match mode {
        ClassificationMode::Exact => route_exact(experience_level, skill_match),
        ClassificationMode::Normalized => route_normalized(
            ExperienceLevel::parse(experience_level),
            SkillMatch::parse(skill_match),
        ),
    })
}

fn route_exact(experience_level: &str, skill_match: &str) -> DecisionNode {
    if skill_match == MATCH_LABEL {
        DecisionNode::ScheduleHrInterview
    } else if experience_level == SENIOR_LABEL {
        DecisionNode::EscalateToRecruiter
    } else {
        DecisionNode::RejectApplication
    }
}

fn route_normalized(experience_level: ExperienceLevel, skill_match: SkillMatch) -> DecisionNode {
    match (skill_match, experience_level) {
        (SkillMatch::Match, _) => DecisionNode::ScheduleHrInterview,
        (_, ExperienceLevel::SeniorLevel) => DecisionNode::EscalateToRecruiter,
        _ => DecisionNode::RejectApplication,
    }
}
