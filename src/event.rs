//! Inbound request envelope.
//!
//! Only the fields the dispatcher reads are modelled; everything else the
//! host sends is ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::response::SessionAttributes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub session: Session,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "new", default)]
    pub is_new: bool,
    pub session_id: String,
    pub application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SessionAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

/// The three request types the skill answers. Anything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Value of a named slot. Missing slots and missing values are both `None`.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl Event {
    /// Build a lookup-intent event for `term`, as the host would send it.
    pub fn lookup_intent(term: &str) -> Self {
        let slot = Slot {
            name: Some(crate::consts::TERM_SLOT.to_string()),
            value: Some(term.to_string()),
        };
        Self {
            session: Session {
                is_new: true,
                session_id: "local-session".to_string(),
                application: Application {
                    application_id: "local-application".to_string(),
                },
                attributes: None,
            },
            request: Request {
                kind: RequestType::IntentRequest,
                request_id: "local-request".to_string(),
                intent: Some(Intent {
                    name: Some(crate::consts::LOOKUP_INTENT.to_string()),
                    slots: HashMap::from([(crate::consts::TERM_SLOT.to_string(), slot)]),
                }),
            },
        }
    }
}
