//! Outbound message capability.
//!
//! The game service never talks to a chat transport directly; it is handed a
//! [`Messenger`] and sends text to a conversation through it.

use crate::BotError;
use crate::store::lock;
use async_trait::async_trait;
use derive_new::new;
use parlor_core::ConversationId;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Delivers text to a conversation.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `content` to `conversation`.
    async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<(), BotError>;
}

/// Writes messages to stdout as `[conversation] content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    #[instrument(skip(self, content))]
    async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<(), BotError> {
        let mut out = tokio::io::stdout();
        for line in content.lines() {
            out.write_all(format!("[{}] {}\n", conversation, line).as_bytes()).await?;
        }
        out.flush().await?;
        Ok(())
    }
}

/// A message captured by [`MemoryMessenger`].
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SentMessage {
    /// Target conversation.
    pub conversation: ConversationId,
    /// Message text.
    pub content: String,
}

/// Keeps sent messages in memory instead of delivering them.
#[derive(Debug, Default)]
pub struct MemoryMessenger {
    sent: Mutex<Vec<SentMessage>>,
}

impl MemoryMessenger {
    /// Creates an empty messenger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    /// Drains and returns everything sent so far.
    pub fn take(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *lock(&self.sent))
    }

    /// Most recent message text for a conversation.
    pub fn last_for(&self, conversation: &ConversationId) -> Option<String> {
        lock(&self.sent)
            .iter()
            .rev()
            .find(|m| &m.conversation == conversation)
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl Messenger for MemoryMessenger {
    async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<(), BotError> {
        debug!(%conversation, "Recording message");
        lock(&self.sent).push(SentMessage::new(conversation.clone(), content.to_string()));
        Ok(())
    }
}
