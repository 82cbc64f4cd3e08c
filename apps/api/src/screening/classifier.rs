//! Classifier steps — one completion call each, raw text stored as the classification.
//!
//! The optional normalization types at the bottom map that free text onto closed
//! label sets; they are only consulted when routing in `ClassificationMode::Normalized`.

use tracing::debug;

use crate::llm_client::CompletionService;
use crate::screening::orchestrator::ScreeningError;
use crate::screening::prompts::{
    APPLICATION_PLACEHOLDER, EXPERIENCE_PROMPT_TEMPLATE, SKILLSET_PROMPT_TEMPLATE,
};
use crate::screening::state::{CandidateState, StateUpdate};
use crate::screening::template::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierStep {
    CategorizeExperience,
    AssessSkillset,
}

impl ClassifierStep {
    /// Execution order within a run.
    pub const SEQUENCE: [ClassifierStep; 2] =
        [ClassifierStep::CategorizeExperience, ClassifierStep::AssessSkillset];

    pub fn name(self) -> &'static str {
        match self {
            Self::CategorizeExperience => "categorize_experience",
            Self::AssessSkillset => "assess_skillset",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Self::CategorizeExperience => EXPERIENCE_PROMPT_TEMPLATE,
            Self::AssessSkillset => SKILLSET_PROMPT_TEMPLATE,
        }
    }

    pub fn prompt(self, application: &str) -> Result<String, ScreeningError> {
        Ok(render(self.template(), APPLICATION_PLACEHOLDER, application)?)
    }

    /// Renders the step's prompt, calls the completion service once and wraps
    /// the returned text, untouched, as this step's state update.
    pub async fn run(
        self,
        state: &CandidateState,
        completion: &dyn CompletionService,
    ) -> Result<StateUpdate, ScreeningError> {
        let prompt = self.prompt(state.application())?;
        let text = completion.complete(&prompt).await?;
        debug!(step = self.name(), classification = %text, "classifier step completed");

        Ok(match self {
            Self::CategorizeExperience => StateUpdate::ExperienceLevel(text),
            Self::AssessSkillset => StateUpdate::SkillMatch(text),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    EntryLevel,
    MidLevel,
    SeniorLevel,
    Unknown,
}

impl ExperienceLevel {
    /// Maps the cleaned text onto a level label; anything else is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match clean(raw).replace(' ', "-").as_str() {
            "entry-level" => Self::EntryLevel,
            "mid-level" => Self::MidLevel,
            "senior-level" => Self::SeniorLevel,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillMatch {
    Match,
    NoMatch,
    Unknown,
}

impl SkillMatch {
    /// Maps the cleaned text onto "no match" or "match"; anything else is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match clean(raw).as_str() {
            "no match" => Self::NoMatch,
            "match" => Self::Match,
            _ => Self::Unknown,
        }
    }
}

/// Trims, strips surrounding quotes and punctuation, lowercases and collapses
/// inner whitespace to single spaces.
fn clean(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '\'' | '"' | '`' | '.' | '!' | '*'))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::screening::testing::ScriptedCompletion;

    #[test]
    fn test_prompts_embed_application_verbatim() {
        let app = "I have 1 year of experience in software engineering with expertise in JAVA";
        assert_eq!(
            ClassifierStep::CategorizeExperience.prompt(app).unwrap(),
            format!("Based on the following job application, categorize the candidate as 'Entry-level', 'Mid-level' or 'Senior-level': {app}")
        );
        assert_eq!(
            ClassifierStep::AssessSkillset.prompt(app).unwrap(),
            format!("Based on the job application, assess the candidate's skillset. Respond with either 'Match' or 'No Match': {app}")
        );
    }

    #[test]
    fn test_sequence_is_experience_then_skills() {
        assert_eq!(
            ClassifierStep::SEQUENCE.map(ClassifierStep::name),
            ["categorize_experience", "assess_skillset"]
        );
    }

    #[tokio::test]
    async fn test_run_stores_completion_untrimmed() {
        let completion = ScriptedCompletion::new(vec![Ok(" Senior-level\n".to_string())]);
        let state = CandidateState::new("10 years of JAVA");

        let update = ClassifierStep::CategorizeExperience
            .run(&state, &completion)
            .await
            .unwrap();

        assert_eq!(update, StateUpdate::ExperienceLevel(" Senior-level\n".to_string()));
        assert_eq!(completion.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_run_propagates_completion_error() {
        let completion = ScriptedCompletion::new(vec![Err(LlmError::Api {
            status: 401,
            message: "bad key".to_string(),
        })]);
        let state = CandidateState::new("app");

        let err = ClassifierStep::AssessSkillset
            .run(&state, &completion)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScreeningError::Completion(LlmError::Api { status: 401, .. })
        ));
    }

    #[test]
    fn test_experience_parse_exact_labels() {
        assert_eq!(ExperienceLevel::parse("Entry-level"), ExperienceLevel::EntryLevel);
        assert_eq!(ExperienceLevel::parse("Mid-level"), ExperienceLevel::MidLevel);
        assert_eq!(ExperienceLevel::parse("Senior-level"), ExperienceLevel::SeniorLevel);
    }

    #[test]
    fn test_experience_parse_tolerates_decoration() {
        assert_eq!(ExperienceLevel::parse("'Senior-level'."), ExperienceLevel::SeniorLevel);
        assert_eq!(ExperienceLevel::parse("senior level"), ExperienceLevel::SeniorLevel);
        assert_eq!(ExperienceLevel::parse(" ENTRY-LEVEL!\n"), ExperienceLevel::EntryLevel);
    }

    #[test]
    fn test_experience_parse_sentences_and_negations_are_unknown() {
        assert_eq!(
            ExperienceLevel::parse("The candidate is Mid-level."),
            ExperienceLevel::Unknown
        );
        assert_eq!(ExperienceLevel::parse("not senior-level"), ExperienceLevel::Unknown);
        assert_eq!(
            ExperienceLevel::parse("Not Senior-level, more like Mid-level"),
            ExperienceLevel::Unknown
        );
    }

    #[test]
    fn test_experience_parse_ambiguous_is_unknown() {
        assert_eq!(
            ExperienceLevel::parse("Between Mid-level and Senior-level"),
            ExperienceLevel::Unknown
        );
        assert_eq!(ExperienceLevel::parse("Intern"), ExperienceLevel::Unknown);
    }

    #[test]
    fn test_skill_parse() {
        assert_eq!(SkillMatch::parse("Match"), SkillMatch::Match);
        assert_eq!(SkillMatch::parse("match."), SkillMatch::Match);
        assert_eq!(SkillMatch::parse("No Match"), SkillMatch::NoMatch);
        assert_eq!(SkillMatch::parse("\"No match\""), SkillMatch::NoMatch);
        assert_eq!(SkillMatch::parse("No   Match\n"), SkillMatch::NoMatch);
        assert_eq!(SkillMatch::parse("Mismatch"), SkillMatch::Unknown);
        assert_eq!(SkillMatch::parse(""), SkillMatch::Unknown);
    }

    #[test]
    fn test_skill_parse_negated_phrasings_are_not_match() {
        for raw in [
            "Not a match",
            "The skills do not match.",
            "Doesn't match",
            "Match? No",
            "No, not a match",
        ] {
            assert_ne!(SkillMatch::parse(raw), SkillMatch::Match, "{raw:?}");
        }
    }
}
