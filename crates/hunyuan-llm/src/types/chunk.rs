use serde::{Deserialize, Serialize};

use super::message::Message;

/// Which chunk variant to build from a streamed delta
///
/// Streams start out as [`ChunkKind::Ai`]; callers keep using the kind of
/// the previous chunk for the rest of the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Human,
    #[default]
    Ai,
}

impl ChunkKind {
    /// Build a chunk of this kind
    pub fn chunk(self, content: impl Into<String>) -> MessageChunk {
        let content = content.into();
        match self {
            Self::Human => MessageChunk::Human { content },
            Self::Ai => MessageChunk::Ai { content },
        }
    }
}

/// Partial message received while streaming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageChunk {
    /// Fragment of a user message
    Human {
        /// Text received so far
        content: String,
    },
    /// Fragment of a model response
    Ai {
        /// Text received so far
        content: String,
    },
}

impl MessageChunk {
    pub const fn kind(&self) -> ChunkKind {
        match self {
            Self::Human { .. } => ChunkKind::Human,
            Self::Ai { .. } => ChunkKind::Ai,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Human { content } | Self::Ai { content } => content,
        }
    }

    /// Append the content of a later fragment
    pub fn push_content(&mut self, fragment: &str) {
        match self {
            Self::Human { content } | Self::Ai { content } => content.push_str(fragment),
        }
    }
}

impl From<MessageChunk> for Message {
    fn from(chunk: MessageChunk) -> Self {
        match chunk {
            MessageChunk::Human { content } => Self::Human { content },
            MessageChunk::Ai { content } => Self::Ai { content },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_ai() {
        assert_eq!(ChunkKind::default(), ChunkKind::Ai);
    }

    #[test]
    fn fragments_accumulate_into_a_message() {
        let mut chunk = ChunkKind::Ai.chunk("Bonjour");
        chunk.push_content(", ");
        chunk.push_content("le monde");

        assert_eq!(chunk.kind(), ChunkKind::Ai);
        assert_eq!(chunk.content(), "Bonjour, le monde");
        assert_eq!(Message::from(chunk), Message::ai("Bonjour, le monde"));
    }

    #[test]
    fn human_chunk_becomes_human_message() {
        let chunk = ChunkKind::Human.chunk("hi");
        assert_eq!(chunk.kind(), ChunkKind::Human);
        assert_eq!(Message::from(chunk), Message::human("hi"));
    }
}
