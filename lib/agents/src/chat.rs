//! Interaction panel transcript.
//!
//! The interaction panel lets a user chat with one bound agent outside
//! of workflow execution. Delivery failures are recovered into the
//! transcript as error-role entries rather than propagated, so a single
//! failed message can never take the panel down.

use crate::error::MessengerError;
use crate::messaging::AgentMessenger;
use chrono::{DateTime, Utc};
use cobalt_loom_core::{AgentId, MessageId};
use rootcause::Report;
use serde::{Deserialize, Serialize};

/// The role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The user's own message.
    User,
    /// A reply from the agent.
    Agent,
    /// A delivery failure rendered inline.
    Error,
}

/// One entry in the interaction panel transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who produced this entry.
    pub role: ChatRole,
    /// Entry text.
    pub content: String,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a new transcript entry.
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user entry.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an agent entry.
    #[must_use]
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Agent, content)
    }

    /// Creates an error entry.
    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Error, content)
    }
}

/// The interaction panel's chat state for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPanel {
    /// The agent this panel talks to.
    pub agent_id: AgentId,
    /// Transcript entries in append order.
    messages: Vec<ChatMessage>,
}

impl ChatPanel {
    /// Creates an empty panel for an agent.
    #[must_use]
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            messages: Vec::new(),
        }
    }

    /// Returns the transcript in append order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the most recent entry, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Sends a message to the agent and appends both sides to the
    /// transcript.
    ///
    /// A messenger failure is appended as an error-role entry; this
    /// method itself never fails. Returns the appended reply entry.
    pub async fn send<M>(&mut self, messenger: &M, text: impl Into<String>) -> &ChatMessage
    where
        M: AgentMessenger + ?Sized,
    {
        let text = text.into();
        self.messages.push(ChatMessage::user(text.clone()));

        let entry = match messenger.send_message(self.agent_id, &text).await {
            Ok(reply) => ChatMessage::agent(reply.response),
            Err(report) => self.render_failure(report),
        };
        let index = self.messages.len();
        self.messages.push(entry);
        &self.messages[index]
    }

    fn render_failure(&self, report: Report<MessengerError>) -> ChatMessage {
        tracing::warn!(
            agent_id = %self.agent_id,
            error = %report,
            "agent message delivery failed"
        );
        ChatMessage::error(format!("Message could not be delivered: {report}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::AgentReply;
    use async_trait::async_trait;
    use cobalt_loom_core::Result;

    struct EchoMessenger;

    #[async_trait]
    impl AgentMessenger for EchoMessenger {
        async fn send_message(
            &self,
            _agent_id: AgentId,
            message: &str,
        ) -> Result<AgentReply, MessengerError> {
            Ok(AgentReply::new(format!("echo: {message}")))
        }
    }

    struct DownMessenger;

    #[async_trait]
    impl AgentMessenger for DownMessenger {
        async fn send_message(
            &self,
            agent_id: AgentId,
            _message: &str,
        ) -> Result<AgentReply, MessengerError> {
            Err(MessengerError::AgentUnavailable { agent_id }.into())
        }
    }

    #[tokio::test]
    async fn send_appends_user_then_agent_entries() {
        let mut panel = ChatPanel::new(AgentId::new());
        let reply = panel.send(&EchoMessenger, "status?").await;

        assert_eq!(reply.role, ChatRole::Agent);
        assert_eq!(reply.content, "echo: status?");
        assert_eq!(panel.messages().len(), 2);
        assert_eq!(panel.messages()[0].role, ChatRole::User);
        assert_eq!(panel.messages()[0].content, "status?");
    }

    #[tokio::test]
    async fn delivery_failure_becomes_error_entry() {
        let mut panel = ChatPanel::new(AgentId::new());
        let entry = panel.send(&DownMessenger, "hello?").await;

        assert_eq!(entry.role, ChatRole::Error);
        assert!(entry.content.contains("could not be delivered"));
        // The user's message is still in the transcript.
        assert_eq!(panel.messages()[0].role, ChatRole::User);
        assert_eq!(panel.messages().len(), 2);
    }

    #[tokio::test]
    async fn transcript_survives_repeated_failures() {
        let mut panel = ChatPanel::new(AgentId::new());
        panel.send(&DownMessenger, "one").await;
        panel.send(&DownMessenger, "two").await;
        panel.send(&EchoMessenger, "three").await;

        assert_eq!(panel.messages().len(), 6);
        assert_eq!(panel.last_message().expect("entry").role, ChatRole::Agent);
    }
}
