use std::fmt;

use serde::{Deserialize, Serialize};

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Message written by the user
    Human {
        /// Text content
        content: String,
    },
    /// Response produced by the model
    Ai {
        /// Text content
        content: String,
    },
    /// System instruction
    System {
        /// Text content
        content: String,
    },
    /// Output of a function invocation
    Function {
        /// Name of the function that produced the output
        name: String,
        /// Text content
        content: String,
    },
    /// Message with an arbitrary role label
    Chat {
        /// Role as given by the producer
        role: String,
        /// Text content
        content: String,
    },
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai {
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn chat(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Chat {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Text content of the message, whatever its variant
    pub fn content(&self) -> &str {
        match self {
            Self::Human { content }
            | Self::Ai { content }
            | Self::System { content }
            | Self::Function { content, .. }
            | Self::Chat { content, .. } => content,
        }
    }

    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Human { .. } => MessageKind::Human,
            Self::Ai { .. } => MessageKind::Ai,
            Self::System { .. } => MessageKind::System,
            Self::Function { .. } => MessageKind::Function,
            Self::Chat { .. } => MessageKind::Chat,
        }
    }
}

/// Variant tag of a [`Message`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Human,
    Ai,
    System,
    Function,
    Chat,
}

impl MessageKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Ai => "ai",
            Self::System => "system",
            Self::Function => "function",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
