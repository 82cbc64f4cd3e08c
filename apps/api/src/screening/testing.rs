//! Test doubles for the completion service.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{CompletionService, LlmError};

/// Replays scripted replies in order and records every prompt it receives.
/// Running out of replies yields `LlmError::EmptyContent`.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a run that classifies as `experience_level` then `skill_match`.
    pub fn classifying(experience_level: &str, skill_match: &str) -> Self {
        Self::new(vec![
            Ok(experience_level.to_string()),
            Ok(skill_match.to_string()),
        ])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Deterministic stub: answers from keywords in the prompt, like a well-behaved model.
pub struct KeywordCompletion;

#[async_trait]
impl CompletionService for KeywordCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let reply = if prompt.contains("categorize the candidate") {
            if prompt.contains("10 years") {
                "Senior-level"
            } else if prompt.contains("5 years") {
                "Mid-level"
            } else {
                "Entry-level"
            }
        } else if prompt.contains("JAVA") {
            "Match"
        } else {
            "No Match"
        };
        Ok(reply.to_string())
    }
}
