//! Agent messaging collaborator interface.
//!
//! Used by the interaction panel to talk to one bound agent at a time,
//! outside of any workflow execution.

use crate::error::MessengerError;
use async_trait::async_trait;
use cobalt_loom_core::{AgentId, Result};
use serde::{Deserialize, Serialize};

/// A single agent reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    /// The agent's response text.
    pub response: String,
}

impl AgentReply {
    /// Creates a reply.
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// A collaborator that delivers one message to one agent.
#[async_trait]
pub trait AgentMessenger: Send + Sync {
    /// Sends a message to the agent and returns its reply.
    async fn send_message(
        &self,
        agent_id: AgentId,
        message: &str,
    ) -> Result<AgentReply, MessengerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_serde_roundtrip() {
        let reply = AgentReply::new("on it");
        let json = serde_json::to_string(&reply).expect("serialize");
        let parsed: AgentReply = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(reply, parsed);
    }
}
