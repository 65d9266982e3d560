//! Internal message types exchanged with the surrounding chat framework
//!
//! These are provider-agnostic; conversion to and from Hunyuan's wire
//! format lives in [`crate::convert`].

pub mod chunk;
pub mod message;

pub use chunk::{ChunkKind, MessageChunk};
pub use message::{Message, MessageKind};
