//! Interactive canvas editor core for the cobalt-loom platform.
//!
//! This crate implements the editor-side interaction subsystem for
//! composing agent workflows on a canvas:
//!
//! - **Geometry**: cubic-Bezier connection paths from node positions
//! - **Placement**: deterministic anti-overlap positioning for dropped nodes
//! - **Handles**: connector anchors projected from node state on demand
//! - **Connection Manager**: the drag-to-connect state machine with live
//!   hit-testing and snapping
//! - **Canvas Controller**: the single write path into the workflow
//!   aggregate, covering node/connection CRUD, configuration updates,
//!   execution lifecycle, and keyboard shortcuts
//!
//! Everything here is rendering-agnostic: the host shell feeds pointer
//! and key events in and draws from the state it reads back out.

pub mod config;
pub mod connect;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod keyboard;
pub mod palette;
pub mod placement;

pub use config::{CanvasBounds, CanvasConfig};
pub use connect::{ConnectOutcome, ConnectionManager, DragConnection, DragState, StartOutcome};
pub use controller::CanvasController;
pub use error::CanvasError;
pub use handle::{Handle, HandleKind, HandleSide};
pub use keyboard::{EditorAction, Key, KeyInput, ShortcutContext};
pub use palette::{NodeDescriptor, NodePalette};
