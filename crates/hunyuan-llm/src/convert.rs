//! Conversion between internal message types and the Hunyuan wire format

use crate::error::LlmError;
use crate::protocol::{HunyuanDelta, HunyuanMessage, HunyuanResponse};
use crate::types::{ChunkKind, Message, MessageChunk};

/// Prefix of server-sent event data lines
const SSE_DATA_PREFIX: &str = "data:";

/// Terminal sentinel some gateways append to event streams
const SSE_DONE: &str = "[DONE]";

// -- Outbound: internal types -> Hunyuan wire format --

impl TryFrom<&Message> for HunyuanMessage {
    type Error = LlmError;

    fn try_from(message: &Message) -> Result<Self, Self::Error> {
        let (role, content) = match message {
            Message::Human { content } => ("user", content),
            Message::Ai { content } => ("assistant", content),
            Message::System { .. } | Message::Function { .. } | Message::Chat { .. } => {
                return Err(LlmError::UnsupportedRole { kind: message.kind() });
            }
        };

        Ok(Self {
            role: role.to_owned(),
            content: content.clone(),
        })
    }
}

// -- Inbound: Hunyuan wire format -> internal types --

impl From<HunyuanMessage> for Message {
    fn from(message: HunyuanMessage) -> Self {
        match message.role.as_str() {
            "user" => Self::Human {
                content: message.content,
            },
            "assistant" => Self::Ai {
                content: message.content,
            },
            _ => Self::Chat {
                role: message.role,
                content: message.content,
            },
        }
    }
}

// -- Stream conversion --

/// Build a chunk of the requested kind from a streamed delta
///
/// The delta's own role is not consulted; the caller tracks which kind the
/// stream is producing.
pub fn delta_to_chunk(delta: &HunyuanDelta, kind: ChunkKind) -> MessageChunk {
    kind.chunk(delta.content.clone().unwrap_or_default())
}

/// Convert a complete response into one message per choice
pub fn response_to_messages(response: HunyuanResponse) -> Result<Vec<Message>, LlmError> {
    check_error(&response)?;

    Ok(response
        .choices
        .into_iter()
        .filter_map(|choice| choice.messages)
        .map(Into::into)
        .collect())
}

/// Decode one line of a streamed response body into a chunk
///
/// Returns `None` for lines that carry no content: blank keep-alives, the
/// `[DONE]` sentinel, and events without choices.
pub fn stream_line_to_chunk(line: &str, kind: ChunkKind) -> Result<Option<MessageChunk>, LlmError> {
    let data = line.trim();
    let data = data.strip_prefix(SSE_DATA_PREFIX).map_or(data, str::trim_start);

    if data.is_empty() || data == SSE_DONE {
        return Ok(None);
    }

    let response: HunyuanResponse = serde_json::from_str(data).map_err(|e| {
        tracing::debug!(error = %e, "unparseable hunyuan stream data");
        LlmError::InvalidResponse(format!("failed to parse stream data: {e}"))
    })?;

    check_error(&response)?;

    Ok(response
        .choices
        .first()
        .and_then(|choice| choice.delta.as_ref())
        .map(|delta| delta_to_chunk(delta, kind)))
}

/// Surface a non-zero error envelope as an upstream error
fn check_error(response: &HunyuanResponse) -> Result<(), LlmError> {
    match &response.error {
        Some(error) if error.code != 0 => {
            tracing::warn!(code = error.code, message = %error.message, "hunyuan returned error");
            Err(LlmError::Upstream {
                code: error.code,
                message: error.message.clone(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageKind;

    fn wire(role: &str, content: &str) -> HunyuanMessage {
        HunyuanMessage {
            role: role.to_owned(),
            content: content.to_owned(),
        }
    }

    #[test]
    fn human_message_to_wire() {
        let result = HunyuanMessage::try_from(&Message::human("foo")).unwrap();
        assert_eq!(result, wire("user", "foo"));
    }

    #[test]
    fn ai_message_to_wire() {
        let result = HunyuanMessage::try_from(&Message::ai("foo")).unwrap();
        assert_eq!(result, wire("assistant", "foo"));
    }

    #[test]
    fn system_message_is_rejected() {
        let err = HunyuanMessage::try_from(&Message::system("foo")).unwrap_err();
        assert!(matches!(
            err,
            LlmError::UnsupportedRole {
                kind: MessageKind::System
            }
        ));
        assert!(err.to_string().contains("system"));
    }

    #[test]
    fn function_message_is_rejected() {
        let err = HunyuanMessage::try_from(&Message::function("foo", "bar")).unwrap_err();
        assert!(err.to_string().contains("got unknown message type: function"));
    }

    #[test]
    fn chat_message_is_rejected_even_with_known_role() {
        let err = HunyuanMessage::try_from(&Message::chat("user", "foo")).unwrap_err();
        assert!(matches!(err, LlmError::UnsupportedRole { kind: MessageKind::Chat }));
    }

    #[test]
    fn wire_user_to_human() {
        assert_eq!(Message::from(wire("user", "foo")), Message::human("foo"));
    }

    #[test]
    fn wire_assistant_to_ai() {
        assert_eq!(Message::from(wire("assistant", "foo")), Message::ai("foo"));
    }

    #[test]
    fn wire_other_role_is_preserved() {
        assert_eq!(Message::from(wire("system", "foo")), Message::chat("system", "foo"));
    }

    #[test]
    fn human_and_ai_survive_round_trip() {
        for message in [Message::human("héllo\nworld"), Message::ai("")] {
            let encoded = HunyuanMessage::try_from(&message).unwrap();
            assert_eq!(Message::from(encoded), message);
        }
    }

    #[test]
    fn assistant_delta_to_ai_chunk() {
        let delta = HunyuanDelta {
            role: Some("assistant".to_owned()),
            content: Some("foo".to_owned()),
        };
        assert_eq!(delta_to_chunk(&delta, ChunkKind::Ai), ChunkKind::Ai.chunk("foo"));
    }

    #[test]
    fn user_delta_to_human_chunk() {
        let delta = HunyuanDelta {
            role: Some("user".to_owned()),
            content: Some("foo".to_owned()),
        };
        assert_eq!(delta_to_chunk(&delta, ChunkKind::Human), ChunkKind::Human.chunk("foo"));
    }

    #[test]
    fn delta_without_content_yields_empty_chunk() {
        let chunk = delta_to_chunk(&HunyuanDelta::default(), ChunkKind::Ai);
        assert_eq!(chunk.content(), "");
    }

    #[test]
    fn selector_wins_over_delta_role() {
        let delta = HunyuanDelta {
            role: Some("user".to_owned()),
            content: Some("foo".to_owned()),
        };
        assert_eq!(delta_to_chunk(&delta, ChunkKind::Ai).kind(), ChunkKind::Ai);
    }

    #[test]
    fn response_choices_become_messages() {
        let response: HunyuanResponse = serde_json::from_str(
            r#"{
                "id": "abc",
                "choices": [
                    {"finish_reason": "stop", "messages": {"role": "assistant", "content": "J'adore la programmation."}}
                ],
                "usage": {"prompt_tokens": 30, "completion_tokens": 8, "total_tokens": 38}
            }"#,
        )
        .unwrap();

        let messages = response_to_messages(response).unwrap();
        assert_eq!(messages, vec![Message::ai("J'adore la programmation.")]);
    }

    #[test]
    fn zero_error_code_is_success() {
        let response: HunyuanResponse = serde_json::from_str(
            r#"{"choices": [{"messages": {"role": "assistant", "content": "ok"}}], "error": {"code": 0, "message": ""}}"#,
        )
        .unwrap();

        assert_eq!(response_to_messages(response).unwrap(), vec![Message::ai("ok")]);
    }

    #[test]
    fn error_envelope_becomes_upstream_error() {
        let response: HunyuanResponse =
            serde_json::from_str(r#"{"error": {"code": 10005, "message": "signature verification failed"}}"#).unwrap();

        let err = response_to_messages(response).unwrap_err();
        assert!(matches!(err, LlmError::Upstream { code: 10005, .. }));
        assert!(err.to_string().contains("signature verification failed"));
    }

    #[test]
    fn stream_line_with_data_prefix() {
        let line = r#"data: {"choices":[{"delta":{"role":"assistant","content":"Bon"}}]}"#;
        let chunk = stream_line_to_chunk(line, ChunkKind::Ai).unwrap();
        assert_eq!(chunk, Some(ChunkKind::Ai.chunk("Bon")));
    }

    #[test]
    fn stream_line_without_prefix() {
        let line = r#"{"choices":[{"delta":{"content":"jour"}}]}"#;
        let chunk = stream_line_to_chunk(line, ChunkKind::Ai).unwrap();
        assert_eq!(chunk, Some(ChunkKind::Ai.chunk("jour")));
    }

    #[test]
    fn stream_lines_without_content_are_skipped() {
        assert_eq!(stream_line_to_chunk("", ChunkKind::Ai).unwrap(), None);
        assert_eq!(stream_line_to_chunk("   ", ChunkKind::Ai).unwrap(), None);
        assert_eq!(stream_line_to_chunk("data: [DONE]", ChunkKind::Ai).unwrap(), None);
        assert_eq!(stream_line_to_chunk(r#"data: {"choices":[]}"#, ChunkKind::Ai).unwrap(), None);
    }

    #[test]
    fn stream_line_with_invalid_json() {
        let err = stream_line_to_chunk("data: {not json", ChunkKind::Ai).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn stream_line_with_error_envelope() {
        let line = r#"data: {"error":{"code":10011,"message":"rate limited"}}"#;
        let err = stream_line_to_chunk(line, ChunkKind::Ai).unwrap_err();
        assert!(matches!(err, LlmError::Upstream { code: 10011, .. }));
    }

    #[test]
    fn streamed_fragments_accumulate() {
        let lines = [
            r#"data: {"choices":[{"delta":{"role":"assistant","content":"J'adore "}}]}"#,
            "",
            r#"data: {"choices":[{"delta":{"content":"la programmation."}}]}"#,
            r#"data: {"choices":[{"finish_reason":"stop","delta":{}}]}"#,
        ];

        let mut kind = ChunkKind::default();
        let mut message: Option<MessageChunk> = None;
        for line in lines {
            let Some(chunk) = stream_line_to_chunk(line, kind).unwrap() else {
                continue;
            };
            kind = chunk.kind();
            match &mut message {
                Some(existing) => existing.push_content(chunk.content()),
                None => message = Some(chunk),
            }
        }

        let message = Message::from(message.unwrap());
        assert_eq!(message, Message::ai("J'adore la programmation."));
    }
}
