// Candidate screening workflow.
// Implements: experience classification, skill assessment, routing, decision, demo batch.
// All LLM calls go through the injected CompletionService — no provider calls here.

pub mod classifier;
pub mod decision;
pub mod demo;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod router;
pub mod state;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;
