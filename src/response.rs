//! Outbound response envelope and the pure builders that fill it.

use serde::{Deserialize, Serialize};

use crate::consts::{
    CARD_TITLE, EXIT_SPEECH, HELP_REPROMPT, RESPONSE_VERSION, WELCOME_REPROMPT, WELCOME_SPEECH,
};

/// Opaque key-value state carried across turns. Always echoed back.
pub type SessionAttributes = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    /// `null` on the wire when there is nothing to say.
    pub text: Option<String>,
}

impl OutputSpeech {
    pub fn plain_text(text: Option<String>) -> Self {
        Self {
            kind: "PlainText".to_string(),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// What to say, what to show, and whether the conversation ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

impl SpeechletResponse {
    /// The spoken text, if any.
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.text.as_deref()
    }

    /// The reprompt text, if any.
    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.output_speech.text.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: SpeechletResponse,
}

/// Plain-text speech, a simple card mirroring it, and an optional reprompt.
pub fn build_speechlet_response(
    title: &str,
    speech: &str,
    reprompt: Option<&str>,
    should_end_session: bool,
) -> SpeechletResponse {
    SpeechletResponse {
        output_speech: OutputSpeech::plain_text(Some(speech.to_string())),
        card: Card {
            kind: "Simple".to_string(),
            title: title.to_string(),
            content: speech.to_string(),
        },
        reprompt: Reprompt {
            output_speech: OutputSpeech::plain_text(reprompt.map(str::to_string)),
        },
        should_end_session,
    }
}

/// Wrap a speechlet in the versioned envelope. Attributes pass through untouched.
pub fn build_response(
    session_attributes: SessionAttributes,
    speechlet: SpeechletResponse,
) -> ResponseEnvelope {
    ResponseEnvelope {
        version: RESPONSE_VERSION.to_string(),
        session_attributes,
        response: speechlet,
    }
}

pub fn welcome() -> SpeechletResponse {
    build_speechlet_response(CARD_TITLE, WELCOME_SPEECH, Some(WELCOME_REPROMPT), false)
}

/// Help repeats the welcome copy but asks a narrower follow-up.
pub fn help() -> SpeechletResponse {
    build_speechlet_response(CARD_TITLE, WELCOME_SPEECH, Some(HELP_REPROMPT), false)
}

pub fn exit() -> SpeechletResponse {
    build_speechlet_response(CARD_TITLE, EXIT_SPEECH, None, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn speechlet_mirrors_speech_into_card() {
        let speechlet = build_speechlet_response("T", "hello", Some("again?"), false);
        assert_eq!(speechlet.speech(), Some("hello"));
        assert_eq!(speechlet.card.title, "T");
        assert_eq!(speechlet.card.content, "hello");
        assert_eq!(speechlet.reprompt_text(), Some("again?"));
        assert!(!speechlet.should_end_session);
    }

    #[test]
    fn speechlet_serializes_to_wire_shape() {
        let speechlet = build_speechlet_response("T", "hello", None, true);
        let value = serde_json::to_value(&speechlet).unwrap();
        assert_eq!(
            value,
            json!({
                "outputSpeech": { "type": "PlainText", "text": "hello" },
                "card": { "type": "Simple", "title": "T", "content": "hello" },
                "reprompt": { "outputSpeech": { "type": "PlainText", "text": null } },
                "shouldEndSession": true
            })
        );
    }

    #[test]
    fn envelope_has_version_and_echoes_attributes() {
        let mut attrs = SessionAttributes::new();
        attrs.insert("lastTerm".to_string(), json!("yeet"));
        let envelope = build_response(attrs.clone(), welcome());

        assert_eq!(envelope.version, "1.0");
        assert_eq!(envelope.session_attributes, attrs);
        assert_eq!(envelope.response, welcome());
    }

    #[test]
    fn empty_attributes_serialize_as_object() {
        let envelope = build_response(SessionAttributes::new(), exit());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["sessionAttributes"], json!({}));
        assert_eq!(value["version"], json!("1.0"));
    }

    #[test]
    fn welcome_keeps_session_open() {
        let speechlet = welcome();
        assert_eq!(speechlet.speech(), Some(WELCOME_SPEECH));
        assert_eq!(speechlet.reprompt_text(), Some(WELCOME_REPROMPT));
        assert!(!speechlet.should_end_session);
    }

    #[test]
    fn help_shares_speech_but_not_reprompt() {
        let speechlet = help();
        assert_eq!(speechlet.speech(), welcome().speech());
        assert_eq!(speechlet.reprompt_text(), Some(HELP_REPROMPT));
        assert!(!speechlet.should_end_session);
    }

    #[test]
    fn exit_ends_session_without_reprompt() {
        let speechlet = exit();
        assert_eq!(speechlet.speech(), Some("See ya."));
        assert_eq!(speechlet.reprompt_text(), None);
        assert!(speechlet.should_end_session);
    }
}
