use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Definition, DefinitionLookup, LookupError};

/// What a [`MockLookup`] answers with on every call.
#[derive(Debug, Clone)]
enum Scripted {
    Answer(Definition),
    Unavailable,
}

/// A scripted lookup for tests. Answers every term the same way and
/// remembers which terms it was asked about.
pub struct MockLookup {
    scripted: Scripted,
    calls: AtomicUsize,
    terms: Mutex<Vec<String>>,
}

impl MockLookup {
    fn new(scripted: Scripted) -> Self {
        Self {
            scripted,
            calls: AtomicUsize::new(0),
            terms: Mutex::new(Vec::new()),
        }
    }

    pub fn found(definition: &str, example: &str) -> Self {
        Self::new(Scripted::Answer(Definition::Found {
            definition: definition.to_string(),
            example: example.to_string(),
        }))
    }

    pub fn not_found() -> Self {
        Self::new(Scripted::Answer(Definition::NotFound))
    }

    /// Fails every call as if the service were down.
    pub fn unavailable() -> Self {
        Self::new(Scripted::Unavailable)
    }

    /// Number of times `define` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Terms passed to `define`, in call order.
    pub fn terms(&self) -> Vec<String> {
        self.terms
            .lock()
            .map(|terms| terms.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DefinitionLookup for MockLookup {
    async fn define(&self, term: &str) -> Result<Definition, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut terms) = self.terms.lock() {
            terms.push(term.to_string());
        }
        match &self.scripted {
            Scripted::Answer(definition) => Ok(definition.clone()),
            Scripted::Unavailable => Err(LookupError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
        }
    }
}
