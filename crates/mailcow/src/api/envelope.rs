//! Outcome envelope codec
//!
//! Every mutating Mailcow endpoint answers with an array of per-item
//! outcomes, e.g. `[{"type": "success", "msg": ["alias_added", "x@d.com", "12"]}]`.
//! Requests are always single-item batches.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Outcome type of one envelope entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Success,
    Warning,
    #[serde(alias = "danger")]
    Error,
}

/// The `msg` of an entry: either a plain string or a list of tokens
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Tokens(Vec<serde_json::Value>),
}

impl Message {
    /// Message tokens as strings; a plain text message is a single token
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Message::Text(text) => vec![text.clone()],
            Message::Tokens(tokens) => tokens.iter().map(token_to_string).collect(),
        }
    }

    /// Message rendered for error reporting
    pub fn text(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Tokens(_) => self.tokens().join(", "),
        }
    }
}

fn token_to_string(token: &serde_json::Value) -> String {
    match token {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One entry of the envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Outcome {
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    #[serde(rename = "msg")]
    pub message: Message,
}

/// Result of classifying an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Ok,
    Rejected(String),
}

/// Decoded outcome envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(pub Vec<Outcome>);

impl Envelope {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.0
    }

    /// Ok only if every entry succeeded; otherwise the first non-success
    /// entry's message.
    pub fn classify(&self) -> Classification {
        match self.0.iter().find(|o| o.kind != OutcomeKind::Success) {
            Some(outcome) => Classification::Rejected(outcome.message.text()),
            None => Classification::Ok,
        }
    }

    /// [`Envelope::classify`] as a `Result`
    pub fn check(&self) -> Result<()> {
        match self.classify() {
            Classification::Ok => Ok(()),
            Classification::Rejected(message) => Err(Error::Rejected(message)),
        }
    }

    /// Token at `index` of the first success entry's message, if present
    pub fn success_token(&self, index: usize) -> Option<String> {
        self.0
            .iter()
            .find(|o| o.kind == OutcomeKind::Success)?
            .message
            .tokens()
            .into_iter()
            .nth(index)
    }
}

/// Serialize one item as a single-element batch
pub fn encode_batch<T: Serialize + ?Sized>(item: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(&[item]).map_err(|e| Error::Encode(e.to_string()))
}

/// Serialize a plain request body
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|e| Error::Encode(e.to_string()))
}

/// Decode an outcome envelope
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope> {
    serde_json::from_slice::<Vec<Outcome>>(bytes)
        .map(Envelope)
        .map_err(|e| Error::Decode(format!("malformed outcome envelope: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_batch_wraps_single_item() {
        let body = encode_batch("42").unwrap();
        assert_eq!(body, br#"["42"]"#);
    }

    #[test]
    fn test_success_token_skips_failed_entries() {
        let envelope = decode_envelope(
            br#"[
                {"type": "warning", "msg": ["quota_exceeded", "x@d.com", "99"]},
                {"type": "success", "msg": ["alias_added", "x@d.com", "12"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(envelope.success_token(2).as_deref(), Some("12"));

        let rejected = decode_envelope(br#"[{"type": "error", "msg": ["a", "b", "7"]}]"#).unwrap();
        assert_eq!(rejected.success_token(2), None);
    }

    #[test]
    fn test_encode_failure_is_encode_error() {
        use std::collections::BTreeMap;

        // JSON object keys must be strings
        let payload: BTreeMap<(i32, i32), i32> = BTreeMap::from([((1, 2), 3)]);
        assert!(matches!(encode(&payload), Err(Error::Encode(_))));
    }

    #[test]
    fn test_decode_text_and_token_messages() {
        let envelope = decode_envelope(
            br#"[
                {"type": "success", "log": ["mailbox", "add"],
                 "msg": ["alias_added", "x@d.com", "12"]},
                {"type": "danger", "msg": "access denied"}
            ]"#,
        )
        .unwrap();

        assert_eq!(envelope.outcomes().len(), 2);
        assert_eq!(envelope.outcomes()[0].kind, OutcomeKind::Success);
        assert_eq!(envelope.outcomes()[1].kind, OutcomeKind::Error);
        assert_eq!(envelope.success_token(2).as_deref(), Some("12"));
    }

    #[test]
    fn test_numeric_tokens_are_stringified() {
        let envelope =
            decode_envelope(br#"[{"type": "success", "msg": ["alias_added", "x@d.com", 12]}]"#)
                .unwrap();
        assert_eq!(envelope.success_token(2).as_deref(), Some("12"));
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_envelope(br#"{"type": "success", "msg": "ok"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        assert!(decode_envelope(br#"[{"msg": "ok"}]"#).is_err());
        assert!(decode_envelope(b"<html>").is_err());
    }

    #[test]
    fn test_classify_all_success() {
        let envelope = decode_envelope(
            br#"[{"type": "success", "msg": "a"}, {"type": "success", "msg": "b"}]"#,
        )
        .unwrap();
        assert_eq!(envelope.classify(), Classification::Ok);
        assert!(envelope.check().is_ok());
    }

    #[test]
    fn test_classify_returns_first_failure() {
        let envelope = decode_envelope(
            br#"[
                {"type": "success", "msg": "a"},
                {"type": "warning", "msg": "quota exceeded"},
                {"type": "error", "msg": "not found"}
            ]"#,
        )
        .unwrap();
        assert_eq!(envelope.classify(), Classification::Rejected("quota exceeded".into()));
        assert_eq!(envelope.check().unwrap_err(), Error::Rejected("quota exceeded".into()));
    }

    #[test]
    fn test_classify_error_entry() {
        let envelope = decode_envelope(br#"[{"type": "error", "msg": "not found"}]"#).unwrap();
        assert_eq!(envelope.classify(), Classification::Rejected("not found".into()));
    }

    #[test]
    fn test_rejected_token_message_is_joined() {
        let envelope =
            decode_envelope(br#"[{"type": "danger", "msg": ["alias_invalid", "x@d.com"]}]"#)
                .unwrap();
        assert_eq!(
            envelope.classify(),
            Classification::Rejected("alias_invalid, x@d.com".into())
        );
    }
}
