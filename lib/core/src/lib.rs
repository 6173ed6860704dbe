//! Core domain types and utilities for the cobalt-loom platform.
//!
//! This crate provides the foundational types shared by every other
//! cobalt-loom crate: strongly-typed entity identifiers and the error
//! handling `Result` alias.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AgentId, ConnectionId, MessageId, NodeId, ParseIdError, WorkflowId};
