//! Drag-to-connect state machine.
//!
//! Connecting two nodes is a drag interaction: press on an output
//! handle, move toward an input handle, release. The interaction state
//! is a tagged variant over `{Idle, Dragging}` with pure
//! `(state, event) -> state` transitions, so the machine can be unit
//! tested without any rendering layer.
//!
//! Snapping runs on every pointer move: the nearest input handle on a
//! different node within the snap radius becomes the snap target.
//! Releasing with a snap target hands the endpoints to a creation
//! callback; the callback (not the machine) owns graph validation, so
//! self-loops and duplicate pairs are rejected even if a stale handle
//! set slips through hit-testing.
//!
//! Hover tracking is a rendering hint only and is independent of the
//! machine's state.

use crate::geometry;
use crate::handle::{Handle, HandleKind};
use cobalt_loom_core::ConnectionId;
use cobalt_loom_graph::{GraphError, Position};

/// Ephemeral state of an in-progress connection drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragConnection {
    /// The output handle the drag started from.
    pub source_handle: Handle,
    /// Live pointer position.
    pub pointer: Position,
    /// The input handle the drag would connect to on release, if any.
    pub snap_target: Option<Handle>,
}

/// The connection drag state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging(DragConnection),
}

/// Result of attempting to start a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The drag started.
    Started,
    /// Drags only start from output handles.
    NotAnOutput,
    /// A drag was already in progress; it is left untouched.
    AlreadyDragging,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// A connection was created.
    Connected(ConnectionId),
    /// The drag had a snap target but the graph rejected the pair.
    Rejected(GraphError),
    /// The drag had no snap target; nothing was created.
    NoSnapTarget,
    /// No drag was in progress.
    NotDragging,
}

impl DragState {
    /// Returns true if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Returns the in-progress drag, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragConnection> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag),
        }
    }

    /// Idle -> Dragging.
    ///
    /// Only output handles may start a drag; an input handle leaves the
    /// machine idle. Starting while already dragging leaves the current
    /// drag untouched.
    #[must_use]
    pub fn start(self, source: Handle, pointer: Position) -> (Self, StartOutcome) {
        match self {
            Self::Dragging(drag) => (Self::Dragging(drag), StartOutcome::AlreadyDragging),
            Self::Idle => {
                if source.kind != HandleKind::Output {
                    return (Self::Idle, StartOutcome::NotAnOutput);
                }
                let drag = DragConnection {
                    source_handle: source,
                    pointer,
                    snap_target: None,
                };
                (Self::Dragging(drag), StartOutcome::Started)
            }
        }
    }

    /// Recomputes the pointer position and snap target while dragging.
    ///
    /// A no-op when idle. Runs on every pointer move, so the cost is one
    /// pass over `handles` and nothing else; calling it twice with the
    /// same inputs yields the same state.
    #[must_use]
    pub fn update(self, pointer: Position, handles: &[Handle], snap_radius: f64) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Dragging(mut drag) => {
                drag.pointer = pointer;
                drag.snap_target =
                    nearest_snap_target(&drag.source_handle, pointer, handles, snap_radius)
                        .cloned();
                Self::Dragging(drag)
            }
        }
    }

    /// Dragging -> Idle, yielding the endpoints when snapped.
    ///
    /// Always lands in Idle, whether or not a target was captured.
    #[must_use]
    pub fn complete(self) -> (Self, Option<(Handle, Handle)>) {
        match self {
            Self::Idle => (Self::Idle, None),
            Self::Dragging(drag) => {
                let endpoints = drag
                    .snap_target
                    .map(|target| (drag.source_handle, target));
                (Self::Idle, endpoints)
            }
        }
    }

    /// Dragging -> Idle, discarding all drag state.
    #[must_use]
    pub fn cancel(self) -> Self {
        Self::Idle
    }
}

/// Finds the nearest handle eligible as a snap target.
///
/// Eligible means: an input handle belonging to a different node than
/// the drag source, within `snap_radius` of the pointer. Exact distance
/// ties keep the earliest handle, so the result is deterministic for a
/// given handle order.
#[must_use]
pub fn nearest_snap_target<'a>(
    source: &Handle,
    pointer: Position,
    handles: &'a [Handle],
    snap_radius: f64,
) -> Option<&'a Handle> {
    let mut best: Option<(&Handle, f64)> = None;
    for handle in handles {
        if handle.node_id == source.node_id || handle.kind != HandleKind::Input {
            continue;
        }
        let distance = handle.position.distance_to(pointer);
        if distance > snap_radius {
            continue;
        }
        if best.is_none_or(|(_, nearest)| distance < nearest) {
            best = Some((handle, distance));
        }
    }
    best.map(|(handle, _)| handle)
}

/// Owns the drag state machine plus the hover rendering hint.
#[derive(Debug)]
pub struct ConnectionManager {
    state: DragState,
    hovered: Option<Handle>,
    snap_radius: f64,
}

impl ConnectionManager {
    /// Creates a manager with the given snap radius.
    #[must_use]
    pub fn new(snap_radius: f64) -> Self {
        Self {
            state: DragState::Idle,
            hovered: None,
            snap_radius,
        }
    }

    /// Returns the current machine state.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns true if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Returns the in-progress drag, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragConnection> {
        self.state.drag()
    }

    /// Starts a drag from a handle.
    pub fn start_connection(&mut self, source: Handle, pointer: Position) -> StartOutcome {
        let (state, outcome) = std::mem::take(&mut self.state).start(source, pointer);
        self.state = state;
        outcome
    }

    /// Feeds a pointer move into the drag.
    pub fn update_connection(&mut self, pointer: Position, handles: &[Handle]) {
        self.state = std::mem::take(&mut self.state).update(pointer, handles, self.snap_radius);
    }

    /// Releases the drag.
    ///
    /// When a snap target was captured, `create` receives the source and
    /// target handles and performs the actual graph mutation; its
    /// rejection (self-loop, duplicate pair) is surfaced in the outcome.
    /// The machine returns to Idle in every case.
    pub fn complete_connection<F>(&mut self, create: F) -> ConnectOutcome
    where
        F: FnOnce(&Handle, &Handle) -> Result<ConnectionId, GraphError>,
    {
        let was_dragging = self.state.is_dragging();
        let (state, endpoints) = std::mem::take(&mut self.state).complete();
        self.state = state;

        match endpoints {
            Some((source, target)) => match create(&source, &target) {
                Ok(connection_id) => ConnectOutcome::Connected(connection_id),
                Err(error) => ConnectOutcome::Rejected(error),
            },
            None if was_dragging => ConnectOutcome::NoSnapTarget,
            None => ConnectOutcome::NotDragging,
        }
    }

    /// Abandons the drag, discarding all drag state.
    pub fn cancel_connection(&mut self) {
        self.state = std::mem::take(&mut self.state).cancel();
    }

    /// Updates the hovered-handle rendering hint.
    ///
    /// Independent of the drag machine; valid in any state.
    pub fn set_hovered_handle(&mut self, handle: Option<Handle>) {
        self.hovered = handle;
    }

    /// Returns the hovered-handle rendering hint.
    #[must_use]
    pub fn hovered_handle(&self) -> Option<&Handle> {
        self.hovered.as_ref()
    }

    /// Returns the live preview path for the drag, if one is in
    /// progress: source anchor to snap target when snapped, otherwise
    /// source anchor to pointer.
    #[must_use]
    pub fn preview_path(&self) -> Option<String> {
        let drag = self.state.drag()?;
        let tail = drag
            .snap_target
            .as_ref()
            .map_or(drag.pointer, |target| target.position);
        Some(geometry::connection_path(drag.source_handle.position, tail))
    }
}
