use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::{Handler, InvocationError};
use crate::consts::{CANCEL_INTENT, HELP_INTENT, LOOKUP_INTENT, STOP_INTENT, TERM_SLOT};
use crate::event::{Event, Intent, RequestType};
use crate::lookup::{DefinitionLookup, define_response};
use crate::response::{
    ResponseEnvelope, SessionAttributes, SpeechletResponse, build_response, exit, help, welcome,
};

/// Routes one event to the matching response. Holds no per-request state,
/// so a single dispatcher can serve any number of invocations.
pub struct Dispatcher {
    lookup: Arc<dyn DefinitionLookup>,
    application_id: Option<String>,
}

impl Dispatcher {
    pub fn new(lookup: Arc<dyn DefinitionLookup>) -> Self {
        Self {
            lookup,
            application_id: None,
        }
    }

    /// Reject events whose application id is not `id`.
    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Dispatch an already-decoded event.
    pub async fn dispatch(
        &self,
        event: &Event,
    ) -> Result<Option<ResponseEnvelope>, InvocationError> {
        let session = &event.session;
        let request = &event.request;
        info!(
            application_id = %session.application.application_id,
            "event received"
        );

        if let Some(expected) = &self.application_id
            && *expected != session.application.application_id
        {
            return Err(InvocationError::InvalidApplication);
        }

        if session.is_new {
            info!(
                request_id = %request.request_id,
                session_id = %session.session_id,
                "session started"
            );
        }

        let speechlet = match request.kind {
            RequestType::LaunchRequest => {
                info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    "launch"
                );
                welcome()
            }
            RequestType::IntentRequest => {
                let intent = request
                    .intent
                    .as_ref()
                    .ok_or(InvocationError::MissingIntent)?;
                info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    intent = intent.name.as_deref().unwrap_or_default(),
                    "intent"
                );
                self.on_intent(intent).await
            }
            RequestType::SessionEndedRequest => {
                info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    "session ended"
                );
                return Ok(None);
            }
            RequestType::Unknown => {
                debug!(request_id = %request.request_id, "ignoring unknown request type");
                return Ok(None);
            }
        };

        Ok(Some(build_response(SessionAttributes::new(), speechlet)))
    }

    async fn on_intent(&self, intent: &Intent) -> SpeechletResponse {
        match intent.name.as_deref() {
            Some(LOOKUP_INTENT) => {
                define_response(self.lookup.as_ref(), intent.slot_value(TERM_SLOT)).await
            }
            Some(HELP_INTENT) => help(),
            Some(STOP_INTENT) | Some(CANCEL_INTENT) => exit(),
            _ => welcome(),
        }
    }
}

#[async_trait]
impl Handler for Dispatcher {
    async fn handle(
        &self,
        event: serde_json::Value,
    ) -> Result<Option<ResponseEnvelope>, InvocationError> {
        let event: Event = serde_json::from_value(event)?;
        self.dispatch(&event).await
    }
}
