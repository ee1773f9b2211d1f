//! Wire Protocol
//!
//! The exact request/response bodies exchanged with the agent
//! backend. One POST per conversation turn:
//!
//! - start:  `{ "session_id": "NEW", "message": "NEW" }`
//! - submit: `{ "session_id": "<issued id>", "message": "<form as a
//!   JSON object string>" }`
//!
//! Responses carry `{ "session_id", "message" }` where `message` is a
//! node description or a bare string. The client adopts `session_id`
//! from every response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::UiPayload;

/// Sentinel for "no session yet": start and reset turns send this in
/// place of an issued id.
pub const NEW_SESSION: &str = "NEW";

/// Outgoing request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TalkRequest {
    pub session_id: String,
    pub message: String,
}

impl TalkRequest {
    /// The first request of a conversation
    pub fn start() -> Self {
        Self {
            session_id: NEW_SESSION.to_string(),
            message: NEW_SESSION.to_string(),
        }
    }

    /// A submission turn: drained form fields serialized as a JSON
    /// object string.
    pub fn submit(session_id: &str, fields: &BTreeMap<String, String>) -> Self {
        // Serializing a string map cannot fail
        let message = serde_json::to_string(fields).unwrap_or_else(|_| "{}".to_string());
        Self {
            session_id: session_id.to_string(),
            message,
        }
    }
}

/// Incoming response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TalkResponse {
    pub session_id: String,
    pub message: UiPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_request_wire_body() {
        let body = serde_json::to_string(&TalkRequest::start()).unwrap();
        assert_eq!(body, r#"{"session_id":"NEW","message":"NEW"}"#);
    }

    #[test]
    fn test_submit_request_wire_body() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "hello".to_string());
        let body = serde_json::to_string(&TalkRequest::submit("s1", &fields)).unwrap();
        assert_eq!(body, r#"{"session_id":"s1","message":"{\"name\":\"hello\"}"}"#);
    }

    #[test]
    fn test_submit_with_empty_form() {
        let request = TalkRequest::submit("s1", &BTreeMap::new());
        assert_eq!(request.message, "{}");
    }

    #[test]
    fn test_response_with_node_message() {
        let json = r#"{"session_id":"s1","message":{"type":"TextInput","props":{"onChangeText":"storeData"},"children":null}}"#;
        let response: TalkResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_id, "s1");
        match response.message {
            UiPayload::Node(ref node) => assert_eq!(node.kind, "TextInput"),
            ref other => panic!("expected node payload, got {other:?}"),
        }
    }

    #[test]
    fn test_response_with_string_message() {
        let response: TalkResponse =
            serde_json::from_str(r#"{"session_id":"s2","message":"plain text"}"#).unwrap();
        assert_eq!(response.message, UiPayload::Text("plain text".to_string()));
    }
}
