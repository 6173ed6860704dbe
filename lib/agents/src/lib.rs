//! Agent collaborator interfaces for the cobalt-loom platform.
//!
//! The canvas editor never talks to agent infrastructure directly; it
//! drives the narrow interfaces defined here:
//!
//! - **WorkflowExecutor**: binds agents to a workflow's nodes and runs it
//! - **AgentMessenger**: sends one message to one bound agent
//! - **ChatPanel**: the interaction panel's transcript, which absorbs
//!   messenger failures locally instead of propagating them
//!
//! Production implementations live behind network clients elsewhere;
//! everything in this crate is transport-agnostic.

pub mod chat;
pub mod error;
pub mod executor;
pub mod messaging;

pub use chat::{ChatMessage, ChatPanel, ChatRole};
pub use error::{ExecutorError, MessengerError};
pub use executor::{ExecutionReport, NodeActivation, WorkflowExecutor};
pub use messaging::{AgentMessenger, AgentReply};
