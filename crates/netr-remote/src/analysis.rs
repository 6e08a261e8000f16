//! The hosted analysis flow: gatekeeper, prompt build, one backend call.
//!
//! Per invocation the flow moves Idle → Validating → {Rejected | Calling} →
//! {Rendered | Errored}. A non-2xx upstream status is recovered and rendered
//! as display content; transport failures and malformed payloads propagate.

use std::future::Future;

use thiserror::Error;

use netr_core::prompt::build_prompt;
use netr_core::request::{
    ContextCategory, ValidationError, require_context, require_credential, require_text,
};

use crate::client::{AnalysisClient, RemoteError};

/// Capability to run one prompt against the hosted model.
///
/// Seam for tests: the flow is generic over the backend so gatekeeper
/// behavior can be asserted with a counting mock.
pub trait AnalysisBackend {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, RemoteError>>;
}

impl AnalysisBackend for AnalysisClient {
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError> {
        AnalysisClient::complete(self, prompt).await
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input rejected before any HTTP call.
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    /// Transport failure or malformed payload. Upstream non-2xx statuses
    /// never reach here; they are rendered as display content instead.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Run one hosted analysis: validate, build the prompt, call the backend
/// once, and return the text block to display verbatim.
///
/// A non-2xx upstream status is returned as the fixed
/// `⚠️ Error: <status> - <body>` display string rather than an error, so
/// the form stays usable for the next attempt.
pub async fn run_analysis<B: AnalysisBackend>(
    text: &str,
    context: Option<ContextCategory>,
    credential: Option<&str>,
    backend: &B,
) -> Result<String, AnalysisError> {
    let text = require_text(text)?;
    let context = require_context(context)?;
    require_credential(credential)?;

    let prompt = build_prompt(text, context);
    match backend.complete(&prompt).await {
        Ok(content) => Ok(content),
        Err(RemoteError::Status { status, body }) => Ok(format!("⚠️ Error: {status} - {body}")),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Mock backend that counts calls and replays a scripted outcome.
    struct ScriptedBackend {
        calls: Cell<usize>,
        outcome: RefCell<Option<Result<String, RemoteError>>>,
    }

    impl ScriptedBackend {
        fn returning(outcome: Result<String, RemoteError>) -> Self {
            Self {
                calls: Cell::new(0),
                outcome: RefCell::new(Some(outcome)),
            }
        }
    }

    impl AnalysisBackend for ScriptedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, RemoteError> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.borrow_mut().take().expect("single call only")
        }
    }

    #[tokio::test]
    async fn whitespace_text_rejected_without_backend_call() {
        let backend = ScriptedBackend::returning(Ok("unused".into()));
        let err = run_analysis(
            "   \n ",
            Some(ContextCategory::Political),
            Some("gsk_abc"),
            &backend,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Rejected(ValidationError::EmptyText)
        ));
        assert_eq!(backend.calls.get(), 0, "gatekeeper must short-circuit");
    }

    #[tokio::test]
    async fn missing_context_rejected_without_backend_call() {
        let backend = ScriptedBackend::returning(Ok("unused".into()));
        let err = run_analysis("some text", None, Some("gsk_abc"), &backend)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Rejected(ValidationError::NoContext)
        ));
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn missing_credential_rejected_without_backend_call() {
        let backend = ScriptedBackend::returning(Ok("unused".into()));
        let err = run_analysis(
            "some text",
            Some(ContextCategory::Extremist),
            None,
            &backend,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Rejected(ValidationError::MissingCredential)
        ));
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn success_returns_content_verbatim() {
        let backend = ScriptedBackend::returning(Ok("Chaos Score: 72\n\nSuggestions...".into()));
        let content = run_analysis(
            "the storm is coming",
            Some(ContextCategory::Political),
            Some("gsk_abc"),
            &backend,
        )
        .await
        .unwrap();
        assert_eq!(content, "Chaos Score: 72\n\nSuggestions...");
        assert_eq!(backend.calls.get(), 1);
    }

    #[tokio::test]
    async fn status_failure_renders_as_display_string() {
        let backend = ScriptedBackend::returning(Err(RemoteError::Status {
            status: 429,
            body: "rate limited".into(),
        }));
        let content = run_analysis(
            "some text",
            Some(ContextCategory::OrganizedCrime),
            Some("gsk_abc"),
            &backend,
        )
        .await
        .unwrap();
        assert_eq!(content, "⚠️ Error: 429 - rate limited");
    }

    #[tokio::test]
    async fn malformed_payload_propagates() {
        let backend =
            ScriptedBackend::returning(Err(RemoteError::Malformed("no choices".into())));
        let err = run_analysis(
            "some text",
            Some(ContextCategory::Political),
            Some("gsk_abc"),
            &backend,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AnalysisError::Remote(RemoteError::Malformed(_))));
    }
}
