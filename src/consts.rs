//! Project-wide constants: skill copy, intent names, and lookup defaults.

use std::path::PathBuf;

/// Envelope version echoed on every response.
pub const RESPONSE_VERSION: &str = "1.0";

/// Default Urban Dictionary define endpoint when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://api.urbandictionary.com/v0/define";

pub const LOOKUP_INTENT: &str = "UDIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

/// Slot on the lookup intent that carries the word or phrase.
pub const TERM_SLOT: &str = "UDTerm";

pub const CARD_TITLE: &str = "Urban Dictionary Lookup";

pub const WELCOME_SPEECH: &str =
    "Welcome to Urban Dictionary Lookup, What would you like to define? For example, say define blank.";
pub const WELCOME_REPROMPT: &str = "Please say, Urban Dictionary define blank.";
pub const HELP_REPROMPT: &str = "Which word would you like a definition for?";
pub const EXIT_SPEECH: &str = "See ya.";

pub const MISSING_TERM_SPEECH: &str = "Please ask me to define a word or phrase.";
pub const UNREACHABLE_SPEECH: &str =
    "Cannot reach Urban Dictionary at this time. Please try again later.";

/// `result_type` the define API reports when nothing matched.
pub const NO_RESULTS: &str = "no_results";

/// Default config path: `~/.urban-lookup/config.json`.
/// `None` when the home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".urban-lookup").join("config.json"))
}

/// Spoken answer when the define API has no entry for `term`.
pub fn not_found_speech(term: &str) -> String {
    format!("Sorry, I could not find the definition of {term}")
}

/// Spoken answer for a found definition.
pub fn definition_speech(term: &str, definition: &str, example: &str) -> String {
    format!("{term}. Definition: {definition}. An example used in proper context is, {example}")
}
