// All LLM prompt constants for the Screening module.
// Wording is fixed: classification output is matched against these exact labels.

/// Placeholder both classifier templates carry.
pub const APPLICATION_PLACEHOLDER: &str = "{application}";

/// Experience classification prompt. Replace `{application}` before sending.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "Based on the following job application, categorize the candidate as 'Entry-level', 'Mid-level' or 'Senior-level': {application}";

/// Skill assessment prompt. Replace `{application}` before sending.
pub const SKILLSET_PROMPT_TEMPLATE: &str = "Based on the job application, assess the candidate's skillset. Respond with either 'Match' or 'No Match': {application}";
