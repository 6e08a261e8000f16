//! Request validation (the gatekeeper) and the analysis context category.
//!
//! Either flow runs its checks here before any external call. A failing
//! check short-circuits with a user-visible message; the caller prints it
//! and returns to idle. There are no length limits, no content filtering,
//! and no rate limiting.

use std::fmt;

use thiserror::Error;

/// Context category for hosted chaos analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCategory {
    Political,
    Extremist,
    OrganizedCrime,
}

impl ContextCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Political => "Political",
            Self::Extremist => "Extremist",
            Self::OrganizedCrime => "Organized Crime",
        }
    }
}

impl fmt::Display for ContextCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected request. The message is shown to the user verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a message.")]
    EmptyText,
    #[error("Please select a context category.")]
    NoContext,
    #[error("Missing API credential. Set GROQ_API_KEY or add it to the secrets file.")]
    MissingCredential,
}

/// Reject text that is empty after whitespace trimming.
///
/// Returns the original (untrimmed) text on success; scoring and prompting
/// operate on what the user typed.
pub fn require_text(text: &str) -> Result<&str, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text)
}

/// Reject an unselected context category.
pub fn require_context(
    context: Option<ContextCategory>,
) -> Result<ContextCategory, ValidationError> {
    context.ok_or(ValidationError::NoContext)
}

/// Reject a missing or blank credential.
pub fn require_credential(credential: Option<&str>) -> Result<&str, ValidationError> {
    match credential {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert_eq!(require_text("   \n\t  "), Err(ValidationError::EmptyText));
        assert_eq!(require_text(""), Err(ValidationError::EmptyText));
    }

    #[test]
    fn text_is_returned_untrimmed() {
        assert_eq!(require_text("  hello  "), Ok("  hello  "));
    }

    #[test]
    fn unselected_context_is_rejected() {
        assert_eq!(require_context(None), Err(ValidationError::NoContext));
        assert_eq!(
            require_context(Some(ContextCategory::Political)),
            Ok(ContextCategory::Political)
        );
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        assert_eq!(
            require_credential(None),
            Err(ValidationError::MissingCredential)
        );
        assert_eq!(
            require_credential(Some("   ")),
            Err(ValidationError::MissingCredential)
        );
        assert_eq!(require_credential(Some("gsk_abc")), Ok("gsk_abc"));
    }

    #[test]
    fn context_display_names() {
        assert_eq!(ContextCategory::Political.as_str(), "Political");
        assert_eq!(ContextCategory::Extremist.as_str(), "Extremist");
        assert_eq!(ContextCategory::OrganizedCrime.as_str(), "Organized Crime");
    }
}
