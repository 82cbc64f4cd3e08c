//! Prompt rendering — fills a template's placeholder with a value.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template has no `{placeholder}` placeholder")]
    MissingPlaceholder { placeholder: String },
}

/// Substitutes every `placeholder` in `template` with `value`.
///
/// `value` is inserted verbatim in a single pass, so braces or placeholder-like
/// text inside it are never re-expanded.
pub fn render(template: &str, placeholder: &str, value: &str) -> Result<String, TemplateError> {
    if placeholder.is_empty() || !template.contains(placeholder) {
        return Err(TemplateError::MissingPlaceholder {
            placeholder: placeholder.to_string(),
        });
    }
    Ok(template.replace(placeholder, value))
}
