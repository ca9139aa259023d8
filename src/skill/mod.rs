pub mod dispatcher;

use async_trait::async_trait;

use crate::response::ResponseEnvelope;

/// Why an invocation produced no answer. The display string is what the
/// host reports back as the failure message.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("Exception: {0}")]
    MalformedEvent(#[from] serde_json::Error),
    #[error("Exception: IntentRequest is missing its intent")]
    MissingIntent,
    #[error("Exception: Invalid Application ID")]
    InvalidApplication,
}

/// The outermost boundary. The host hands over one raw event and gets back
/// a response, an empty success (`None`), or a failure.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(
        &self,
        event: serde_json::Value,
    ) -> Result<Option<ResponseEnvelope>, InvocationError>;
}
