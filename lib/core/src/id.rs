//! Strongly-typed ID types for domain entities.
//!
//! All IDs wrap a ULID, which gives uniqueness plus creation-time
//! ordering for free. Display output carries a per-type prefix
//! (`wf_`, `node_`, ...) so IDs are self-describing in logs and
//! rendered markup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The display prefix expected for this ID type.
    pub expected_prefix: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse {} (expected '{}_' prefix or raw ULID): {}",
            self.id_type, self.expected_prefix, self.reason
        )
    }
}

impl std::error::Error for ParseIdError {}

/// Generates a strongly-typed ID wrapper around ULID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Creates an ID from an existing ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }

            /// Returns the prefix used for display formatting.
            #[must_use]
            pub const fn prefix() -> &'static str {
                $prefix
            }

            /// Returns the creation time encoded in the ULID, if it is
            /// representable as a chrono timestamp.
            #[must_use]
            pub fn created_at(&self) -> Option<DateTime<Utc>> {
                DateTime::from_timestamp_millis(self.0.timestamp_ms() as i64)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let prefixed = concat!($prefix, "_");
                let ulid_str = s.strip_prefix(prefixed).unwrap_or(s);

                Ulid::from_str(ulid_str).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    expected_prefix: $prefix,
                    reason: e.to_string(),
                })
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }

        impl From<$name> for Ulid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a workflow.
    WorkflowId,
    "wf"
);

define_id!(
    /// Unique identifier for a node within a workflow.
    NodeId,
    "node"
);

define_id!(
    /// Unique identifier for a connection between two nodes.
    ConnectionId,
    "conn"
);

define_id!(
    /// Unique identifier for a bound agent.
    AgentId,
    "agent"
);

define_id!(
    /// Unique identifier for a chat transcript message.
    MessageId,
    "msg"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_id_display_format() {
        let id = WorkflowId::new();
        assert!(id.to_string().starts_with("wf_"));
    }

    #[test]
    fn node_id_display_format() {
        let id = NodeId::new();
        assert!(id.to_string().starts_with("node_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = ConnectionId::new();
        let parsed: ConnectionId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: AgentId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let result: Result<NodeId, _> = "definitely-not-a-ulid".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "NodeId");
        assert_eq!(err.expected_prefix, "node");
    }

    #[test]
    fn created_at_is_recent() {
        let id = WorkflowId::new();
        let created = id.created_at().expect("timestamp in range");
        let age = Utc::now() - created;
        assert!(age.num_seconds() < 60);
    }

    #[test]
    fn ids_are_hashable_and_distinct() {
        use std::collections::HashSet;

        let a = NodeId::new();
        let b = NodeId::new();

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(a);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = MessageId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let parsed: MessageId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
