use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{Definition, DefinitionLookup, LookupError};
use crate::consts::NO_RESULTS;

/// Looks terms up against the Urban Dictionary define API.
pub struct UrbanDictionary {
    client: reqwest::Client,
    endpoint: Url,
}

impl UrbanDictionary {
    /// `timeout` bounds the whole request; `None` leaves it to the client.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| LookupError::Endpoint(format!("{endpoint}: {e}")))?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// The request URL for `term`, with the term percent-encoded.
    pub fn url_for(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("term", term);
        url
    }
}

#[async_trait]
impl DefinitionLookup for UrbanDictionary {
    async fn define(&self, term: &str) -> Result<Definition, LookupError> {
        let url = self.url_for(term);
        debug!(%url, "requesting definition");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let mut body = Vec::new();
        let mut chunks = resp.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            body.extend_from_slice(&chunk?);
        }
        debug!(bytes = body.len(), "definition response received");

        parse_body(&body)
    }
}

#[derive(Deserialize)]
struct DefineBody {
    #[serde(default)]
    result_type: Option<String>,
    #[serde(default)]
    list: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

/// Interpret a define API body. A `no_results` marker or an empty list is a
/// miss; anything that is not JSON of the expected shape is an error.
pub fn parse_body(body: &[u8]) -> Result<Definition, LookupError> {
    let parsed: DefineBody = serde_json::from_slice(body)?;

    if parsed.result_type.as_deref() == Some(NO_RESULTS) {
        return Ok(Definition::NotFound);
    }

    Ok(match parsed.list.into_iter().next() {
        Some(entry) => Definition::Found {
            definition: entry.definition.unwrap_or_default(),
            example: entry.example.unwrap_or_default(),
        },
        None => Definition::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_first_entry() {
        let body = br#"{"result_type":"exact","list":[
            {"definition":"D","example":"E"},
            {"definition":"second","example":"ignored"}
        ]}"#;
        assert_eq!(
            parse_body(body).unwrap(),
            Definition::Found {
                definition: "D".to_string(),
                example: "E".to_string(),
            }
        );
    }

    #[test]
    fn parse_without_result_type() {
        let body = br#"{"list":[{"definition":"D","example":"E"}]}"#;
        assert!(matches!(parse_body(body).unwrap(), Definition::Found { .. }));
    }

    #[test]
    fn parse_no_results_marker() {
        let body = br#"{"result_type":"no_results","list":[]}"#;
        assert_eq!(parse_body(body).unwrap(), Definition::NotFound);
    }

    #[test]
    fn parse_no_results_wins_over_list() {
        let body = br#"{"result_type":"no_results","list":[{"definition":"D","example":"E"}]}"#;
        assert_eq!(parse_body(body).unwrap(), Definition::NotFound);
    }

    #[test]
    fn parse_empty_list_is_miss() {
        assert_eq!(parse_body(br#"{"list":[]}"#).unwrap(), Definition::NotFound);
        assert_eq!(parse_body(b"{}").unwrap(), Definition::NotFound);
    }

    #[test]
    fn parse_missing_example_is_empty() {
        let body = br#"{"list":[{"definition":"D","example":null}]}"#;
        assert_eq!(
            parse_body(body).unwrap(),
            Definition::Found {
                definition: "D".to_string(),
                example: String::new(),
            }
        );
    }

    #[test]
    fn parse_malformed_is_error() {
        let err = parse_body(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)));
    }

    #[test]
    fn url_encodes_term() {
        let lookup = UrbanDictionary::new("http://localhost/v0/define", None).unwrap();
        let url = lookup.url_for("on fleek & co");
        assert_eq!(
            url.as_str(),
            "http://localhost/v0/define?term=on+fleek+%26+co"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = UrbanDictionary::new("not a url", None).err().unwrap();
        assert!(matches!(err, LookupError::Endpoint(_)));
    }
}
