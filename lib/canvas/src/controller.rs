//! Canvas editor controller.
//!
//! The controller owns the authoritative workflow aggregates and every
//! piece of editor-side interaction state: the selected workflow, the
//! drag-to-connect machine, and the panel visibility flags. All
//! mutation of a workflow passes through here; the rendering layer and
//! the geometry/placement helpers treat workflows as read-only input.
//!
//! Every handler is synchronous except `execute_workflow`, whose only
//! await is the call into the execution collaborator. At most one
//! execution per workflow is in flight at a time, guarded by the
//! active-status check before the transition.

use crate::config::{CanvasBounds, CanvasConfig};
use crate::connect::{ConnectOutcome, ConnectionManager, DragConnection, StartOutcome};
use crate::error::CanvasError;
use crate::geometry;
use crate::handle::{self, Handle, HandleSide};
use crate::keyboard::{self, EditorAction, KeyInput, ShortcutContext};
use crate::palette::NodePalette;
use crate::placement;
use cobalt_loom_agents::WorkflowExecutor;
use cobalt_loom_core::{ConnectionId, NodeId, WorkflowId};
use cobalt_loom_graph::{
    Connection, Node, NodeKind, Position, Topology, Workflow, WorkflowSummary,
};
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;

/// The canvas editor controller.
#[derive(Debug)]
pub struct CanvasController {
    config: CanvasConfig,
    bounds: CanvasBounds,
    palette: NodePalette,
    workflows: Vec<Workflow>,
    selected: Option<WorkflowId>,
    connection: ConnectionManager,
    configured_node: Option<NodeId>,
    interaction_panel_open: bool,
}

impl CanvasController {
    /// Creates a controller with default config, bounds, and palette.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default(), CanvasBounds::default())
    }

    /// Creates a controller with explicit canvas tuning.
    #[must_use]
    pub fn with_config(config: CanvasConfig, bounds: CanvasBounds) -> Self {
        Self {
            connection: ConnectionManager::new(config.snap_radius),
            config,
            bounds,
            palette: NodePalette::default(),
            workflows: Vec::new(),
            selected: None,
            configured_node: None,
            interaction_panel_open: false,
        }
    }

    /// Replaces the node palette.
    #[must_use]
    pub fn with_palette(mut self, palette: NodePalette) -> Self {
        self.palette = palette;
        self
    }

    /// Returns the canvas tuning parameters.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Returns the node palette.
    #[must_use]
    pub fn palette(&self) -> &NodePalette {
        &self.palette
    }

    // ---- workflow management ------------------------------------------

    /// Creates a new draft workflow and selects it.
    pub fn create_workflow(&mut self, name: impl Into<String>) -> WorkflowId {
        let workflow = Workflow::new(name);
        let workflow_id = workflow.id;
        self.workflows.push(workflow);
        self.selected = Some(workflow_id);
        self.reset_transient_state();
        tracing::info!(workflow_id = %workflow_id, "workflow created");
        workflow_id
    }

    /// Selects an existing workflow, discarding transient editor state.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowNotFound` if the workflow is not in the editor.
    pub fn select_workflow(&mut self, workflow_id: WorkflowId) -> Result<(), CanvasError> {
        if !self.workflows.iter().any(|w| w.id == workflow_id) {
            return Err(CanvasError::WorkflowNotFound { workflow_id });
        }
        self.selected = Some(workflow_id);
        self.reset_transient_state();
        Ok(())
    }

    /// Returns all workflows in creation order.
    #[must_use]
    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Returns listing summaries for all workflows.
    #[must_use]
    pub fn workflow_summaries(&self) -> Vec<WorkflowSummary> {
        self.workflows.iter().map(WorkflowSummary::from).collect()
    }

    /// Returns the selected workflow id, if any.
    #[must_use]
    pub fn selected_workflow_id(&self) -> Option<WorkflowId> {
        self.selected
    }

    /// Returns the selected workflow, if any.
    #[must_use]
    pub fn selected_workflow(&self) -> Option<&Workflow> {
        let selected = self.selected?;
        self.workflows.iter().find(|w| w.id == selected)
    }

    /// Returns the topology view of the selected workflow, if any.
    #[must_use]
    pub fn topology(&self) -> Option<Topology> {
        self.selected_workflow().map(Topology::of)
    }

    // ---- node and connection CRUD -------------------------------------

    /// Drops a node of the given kind onto the canvas.
    ///
    /// The palette resolves the kind to its descriptor, the placement
    /// search finds a free spot near the drop position, and the node is
    /// appended with an empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the palette has no
    /// descriptor for the kind.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        drop_position: Position,
    ) -> Result<NodeId, CanvasError> {
        let Self {
            config,
            bounds,
            palette,
            workflows,
            selected,
            ..
        } = self;
        let descriptor = palette
            .descriptor(kind)
            .ok_or(CanvasError::UnknownNodeKind { kind })?;
        let workflow = find_workflow_mut(workflows, *selected)?;

        let position = placement::place(drop_position, workflow.nodes(), bounds, config);
        let node = Node::new(kind, descriptor.label.clone(), position);
        let node_id = workflow.add_node(node)?;
        tracing::info!(
            workflow_id = %workflow.id,
            node_id = %node_id,
            kind = %kind,
            x = position.x,
            y = position.y,
            "node added"
        );
        Ok(node_id)
    }

    /// Removes a node and its attached connections.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the node is not
    /// present.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<Node, CanvasError> {
        let workflow = self.selected_workflow_mut()?;
        let workflow_id = workflow.id;
        let node = workflow
            .remove_node(node_id)
            .ok_or(CanvasError::NodeNotFound { node_id })?;

        if self.configured_node == Some(node_id) {
            self.configured_node = None;
        }
        tracing::info!(workflow_id = %workflow_id, node_id = %node_id, "node removed");
        Ok(node)
    }

    /// Moves a node and re-derives the cached paths of every connection
    /// touching it.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the node is not
    /// present.
    pub fn move_node(&mut self, node_id: NodeId, position: Position) -> Result<(), CanvasError> {
        let Self {
            config,
            workflows,
            selected,
            ..
        } = self;
        let workflow = find_workflow_mut(workflows, *selected)?;
        workflow.move_node(node_id, position)?;

        let stale: Vec<(ConnectionId, String)> = workflow
            .connections()
            .iter()
            .filter(|c| c.involves_node(node_id))
            .filter_map(|c| render_connection_path(workflow, c, config).map(|path| (c.id, path)))
            .collect();
        for (connection_id, path) in stale {
            workflow.set_connection_path(connection_id, path)?;
        }
        Ok(())
    }

    /// Removes a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the connection is
    /// not present.
    pub fn remove_connection(
        &mut self,
        connection_id: ConnectionId,
    ) -> Result<Connection, CanvasError> {
        let workflow = self.selected_workflow_mut()?;
        let workflow_id = workflow.id;
        let connection = workflow
            .remove_connection(connection_id)
            .ok_or(CanvasError::ConnectionNotFound { connection_id })?;
        tracing::info!(
            workflow_id = %workflow_id,
            connection_id = %connection_id,
            "connection removed"
        );
        Ok(connection)
    }

    /// Shallow-merges a patch into a node's config.
    ///
    /// Later keys overwrite; nested values are replaced wholesale, so
    /// callers composing partial updates must include previously set
    /// keys themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the node is not
    /// present.
    pub fn update_node_config(
        &mut self,
        node_id: NodeId,
        patch: HashMap<String, JsonValue>,
    ) -> Result<(), CanvasError> {
        let workflow = self.selected_workflow_mut()?;
        workflow.update_node_config(node_id, patch)?;
        Ok(())
    }

    // ---- panels --------------------------------------------------------

    /// Opens the configuration panel for a node.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the node is not
    /// present.
    pub fn select_node(&mut self, node_id: NodeId) -> Result<(), CanvasError> {
        let workflow = self
            .selected_workflow()
            .ok_or(CanvasError::NoWorkflowSelected)?;
        if workflow.node(node_id).is_none() {
            return Err(CanvasError::NodeNotFound { node_id });
        }
        self.configured_node = Some(node_id);
        Ok(())
    }

    /// Returns the node the configuration panel is showing, if open.
    #[must_use]
    pub fn configured_node(&self) -> Option<NodeId> {
        self.configured_node
    }

    /// Closes the configuration panel.
    pub fn close_config_panel(&mut self) {
        self.configured_node = None;
    }

    /// Opens the agent interaction panel.
    pub fn open_interaction_panel(&mut self) {
        self.interaction_panel_open = true;
    }

    /// Closes the agent interaction panel.
    pub fn close_interaction_panel(&mut self) {
        self.interaction_panel_open = false;
    }

    /// Returns true if the agent interaction panel is open.
    #[must_use]
    pub fn is_interaction_panel_open(&self) -> bool {
        self.interaction_panel_open
    }

    // ---- drag-to-connect ----------------------------------------------

    /// Projects every handle of the selected workflow.
    #[must_use]
    pub fn all_handles(&self) -> Vec<Handle> {
        self.selected_workflow()
            .map(|workflow| handle::workflow_handles(workflow, &self.config))
            .unwrap_or_default()
    }

    /// Starts a connection drag from a handle.
    pub fn start_connection(&mut self, source: Handle, pointer: Position) -> StartOutcome {
        self.connection.start_connection(source, pointer)
    }

    /// Feeds a pointer move into the drag, re-running hit-testing
    /// against the live handle set.
    pub fn update_connection(&mut self, pointer: Position) {
        let handles = self.all_handles();
        self.connection.update_connection(pointer, &handles);
    }

    /// Releases the drag, creating the connection when a snap target was
    /// captured. The graph rejects self-loops and duplicate ordered
    /// pairs; the outcome reports which, without mutating anything.
    pub fn complete_connection(&mut self) -> ConnectOutcome {
        let Self {
            workflows,
            selected,
            connection,
            ..
        } = self;
        let Ok(workflow) = find_workflow_mut(workflows, *selected) else {
            connection.cancel_connection();
            return ConnectOutcome::NotDragging;
        };

        let outcome = connection.complete_connection(|source, target| {
            let path = geometry::connection_path(source.position, target.position);
            workflow.connect(
                Connection::new(source.node_id, target.node_id)
                    .with_handles(source.id.clone(), target.id.clone())
                    .with_path(path),
            )
        });

        match &outcome {
            ConnectOutcome::Connected(connection_id) => {
                tracing::info!(
                    workflow_id = %workflow.id,
                    connection_id = %connection_id,
                    "connection created"
                );
            }
            ConnectOutcome::Rejected(error) => {
                tracing::debug!(workflow_id = %workflow.id, reason = %error, "connection rejected");
            }
            ConnectOutcome::NoSnapTarget | ConnectOutcome::NotDragging => {}
        }
        outcome
    }

    /// Abandons the in-progress drag.
    pub fn cancel_connection(&mut self) {
        self.connection.cancel_connection();
    }

    /// Returns true if a connection drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.connection.is_dragging()
    }

    /// Returns the in-progress drag, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragConnection> {
        self.connection.drag()
    }

    /// Returns the live preview path for the drag, if any.
    #[must_use]
    pub fn drag_preview_path(&self) -> Option<String> {
        self.connection.preview_path()
    }

    /// Updates the hovered-handle rendering hint.
    pub fn hover_handle(&mut self, handle: Option<Handle>) {
        self.connection.set_hovered_handle(handle);
    }

    /// Returns the hovered-handle rendering hint.
    #[must_use]
    pub fn hovered_handle(&self) -> Option<&Handle> {
        self.connection.hovered_handle()
    }

    // ---- execution lifecycle ------------------------------------------

    /// Executes the selected workflow through the collaborator.
    ///
    /// The workflow transitions to active before the collaborator call,
    /// which is what guarantees a single in-flight execution. On success
    /// each activation is merged into its node's config (`agentId`,
    /// `status`, `lastResponse`). Any non-success outcome pauses the
    /// workflow and surfaces the reason to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected, the workflow is
    /// empty or already executing, or the collaborator reports failure.
    pub async fn execute_workflow<E>(&mut self, executor: &E) -> Result<(), CanvasError>
    where
        E: WorkflowExecutor + ?Sized,
    {
        let workflow = self.selected_workflow_mut()?;
        let workflow_id = workflow.id;
        if !workflow.has_nodes() {
            return Err(CanvasError::EmptyWorkflow { workflow_id });
        }
        if workflow.status().is_active() {
            return Err(CanvasError::ExecutionInProgress { workflow_id });
        }
        workflow.activate()?;
        tracing::info!(
            workflow_id = %workflow_id,
            nodes = workflow.node_count(),
            entry_nodes = Topology::of(workflow).entry_nodes().len(),
            "workflow execution starting"
        );

        match executor.execute_coordinator_workflow(workflow).await {
            Ok(report) if report.success => {
                for activation in report.results {
                    let patch = HashMap::from([
                        ("agentId".to_string(), json!(activation.agent_id.to_string())),
                        ("status".to_string(), json!("running")),
                        ("lastResponse".to_string(), json!(activation.response)),
                    ]);
                    if workflow.update_node_config(activation.node_id, patch).is_err() {
                        tracing::warn!(
                            workflow_id = %workflow_id,
                            node_id = %activation.node_id,
                            "activation for unknown node ignored"
                        );
                    }
                }
                Ok(())
            }
            Ok(_) => {
                workflow.pause()?;
                let reason = "execution collaborator reported failure".to_string();
                tracing::warn!(workflow_id = %workflow_id, "workflow execution refused");
                Err(CanvasError::ExecutionFailed {
                    workflow_id,
                    reason,
                })
            }
            Err(report) => {
                workflow.pause()?;
                let reason = report.to_string();
                tracing::warn!(
                    workflow_id = %workflow_id,
                    error = %reason,
                    "workflow execution failed"
                );
                Err(CanvasError::ExecutionFailed {
                    workflow_id,
                    reason,
                })
            }
        }
    }

    /// Stops the running execution: the workflow pauses and every node's
    /// config is stamped `status: "stopped"`.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or no execution is in
    /// flight.
    pub fn stop_workflow(&mut self) -> Result<(), CanvasError> {
        let workflow = self.selected_workflow_mut()?;
        let workflow_id = workflow.id;
        workflow.pause()?;

        let node_ids: Vec<NodeId> = workflow.nodes().iter().map(|n| n.id).collect();
        for node_id in node_ids {
            workflow.update_node_config(
                node_id,
                HashMap::from([("status".to_string(), json!("stopped"))]),
            )?;
        }
        tracing::info!(workflow_id = %workflow_id, "workflow stopped");
        Ok(())
    }

    // ---- keyboard ------------------------------------------------------

    /// Handles a key press.
    ///
    /// Synchronous actions (cancelling a drag, closing panels, stopping
    /// an execution, creating a workflow) are applied immediately.
    /// `StartExecution` is returned unapplied: the host must drive
    /// `execute_workflow` with its executor collaborator.
    pub fn handle_key(&mut self, input: KeyInput) -> Option<EditorAction> {
        let action = keyboard::resolve(input, self.shortcut_context())?;
        match action {
            EditorAction::CancelConnection => self.cancel_connection(),
            EditorAction::CloseConfigPanel => self.close_config_panel(),
            EditorAction::CloseInteractionPanel => self.close_interaction_panel(),
            EditorAction::NewWorkflow => {
                self.create_workflow("New Workflow");
            }
            EditorAction::StopExecution => {
                if let Err(error) = self.stop_workflow() {
                    tracing::warn!(error = %error, "stop shortcut failed");
                }
            }
            EditorAction::StartExecution => {}
        }
        Some(action)
    }

    fn shortcut_context(&self) -> ShortcutContext {
        let workflow = self.selected_workflow();
        ShortcutContext {
            workflow_selected: workflow.is_some(),
            has_nodes: workflow.is_some_and(Workflow::has_nodes),
            dragging: self.connection.is_dragging(),
            config_panel_open: self.configured_node.is_some(),
            interaction_panel_open: self.interaction_panel_open,
            executing: workflow.is_some_and(|w| w.status().is_active()),
        }
    }

    // ---- internals -----------------------------------------------------

    fn selected_workflow_mut(&mut self) -> Result<&mut Workflow, CanvasError> {
        find_workflow_mut(&mut self.workflows, self.selected)
    }

    fn reset_transient_state(&mut self) {
        self.connection.cancel_connection();
        self.configured_node = None;
        self.interaction_panel_open = false;
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

fn find_workflow_mut(
    workflows: &mut [Workflow],
    selected: Option<WorkflowId>,
) -> Result<&mut Workflow, CanvasError> {
    let workflow_id = selected.ok_or(CanvasError::NoWorkflowSelected)?;
    workflows
        .iter_mut()
        .find(|w| w.id == workflow_id)
        .ok_or(CanvasError::WorkflowNotFound { workflow_id })
}

/// Re-derives the render path of a connection from its endpoint nodes.
///
/// Falls back to the right/left anchors when a handle id no longer
/// resolves (the handle naming scheme changed, or data came from an
/// older persistence format).
fn render_connection_path(
    workflow: &Workflow,
    connection: &Connection,
    config: &CanvasConfig,
) -> Option<String> {
    let source = workflow.node(connection.source_id)?;
    let target = workflow.node(connection.target_id)?;
    let source_anchor = anchor_position(
        source,
        connection.source_handle.as_deref(),
        HandleSide::Right,
        config,
    );
    let target_anchor = anchor_position(
        target,
        connection.target_handle.as_deref(),
        HandleSide::Left,
        config,
    );
    Some(geometry::connection_path(source_anchor, target_anchor))
}

fn anchor_position(
    node: &Node,
    handle_id: Option<&str>,
    fallback: HandleSide,
    config: &CanvasConfig,
) -> Position {
    let handles = handle::node_handles(node, config);
    handle_id
        .and_then(|id| handles.iter().find(|h| h.id == id))
        .map_or_else(
            || handle::handle_on_side(node, fallback, config).position,
            |h| h.position,
        )
}
