pub mod mock;
pub mod urban;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::consts::{
    CARD_TITLE, MISSING_TERM_SPEECH, UNREACHABLE_SPEECH, definition_speech, not_found_speech,
};
use crate::response::{SpeechletResponse, build_speechlet_response};

/// What the define API knows about a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Found { definition: String, example: String },
    NotFound,
}

/// Anything that stops a lookup from producing a [`Definition`].
/// Callers turn every variant into the same apology.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("invalid lookup endpoint: {0}")]
    Endpoint(String),
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lookup service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The one external collaborator: a word-definition service.
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    async fn define(&self, term: &str) -> Result<Definition, LookupError>;
}

/// Answer a define request. Never fails: missing terms, misses, and
/// service errors all become spoken responses that end the session.
pub async fn define_response(
    lookup: &dyn DefinitionLookup,
    term: Option<&str>,
) -> SpeechletResponse {
    let term = term.map(str::trim).filter(|t| !t.is_empty());
    info!(term = term.unwrap_or_default(), "search term");

    let speech = match term {
        None => MISSING_TERM_SPEECH.to_string(),
        Some(term) => match lookup.define(term).await {
            Ok(Definition::Found {
                definition,
                example,
            }) => definition_speech(term, &definition, &example),
            Ok(Definition::NotFound) => not_found_speech(term),
            Err(e) => {
                warn!(term, error = %e, "definition lookup failed");
                UNREACHABLE_SPEECH.to_string()
            }
        },
    };

    build_speechlet_response(CARD_TITLE, &speech, None, true)
}

#[cfg(test)]
mod tests {
    use super::mock::MockLookup;
    use super::*;

    #[tokio::test]
    async fn found_definition_is_spoken() {
        let lookup = MockLookup::found("D", "E");
        let speechlet = define_response(&lookup, Some("bar")).await;
        assert_eq!(
            speechlet.speech(),
            Some("bar. Definition: D. An example used in proper context is, E")
        );
        assert!(speechlet.should_end_session);
        assert_eq!(speechlet.reprompt_text(), None);
        assert_eq!(speechlet.card.title, CARD_TITLE);
    }

    #[tokio::test]
    async fn miss_apologizes_with_term() {
        let lookup = MockLookup::not_found();
        let speechlet = define_response(&lookup, Some("foo")).await;
        assert_eq!(
            speechlet.speech(),
            Some("Sorry, I could not find the definition of foo")
        );
        assert!(speechlet.should_end_session);
    }

    #[tokio::test]
    async fn missing_term_skips_lookup() {
        let lookup = MockLookup::found("D", "E");
        let speechlet = define_response(&lookup, None).await;
        assert_eq!(speechlet.speech(), Some(MISSING_TERM_SPEECH));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn blank_term_skips_lookup() {
        let lookup = MockLookup::found("D", "E");
        let speechlet = define_response(&lookup, Some("  ")).await;
        assert_eq!(speechlet.speech(), Some(MISSING_TERM_SPEECH));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn service_error_becomes_apology() {
        let lookup = MockLookup::unavailable();
        let speechlet = define_response(&lookup, Some("baz")).await;
        assert_eq!(speechlet.speech(), Some(UNREACHABLE_SPEECH));
        assert!(speechlet.should_end_session);
        assert_eq!(lookup.calls(), 1);
    }
}
