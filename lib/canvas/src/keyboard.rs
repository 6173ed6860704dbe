//! Keyboard shortcut resolution.
//!
//! Shortcuts are resolved purely: a key event plus a snapshot of editor
//! state maps to at most one action. Plain-key shortcuts are suppressed
//! whenever a reserved modifier (ctrl, meta, alt) is held so the editor
//! never hijacks browser or OS chords; the one exception is the global
//! new-workflow chord on the platform modifier.

use serde::{Deserialize, Serialize};

/// A key relevant to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Space,
    /// A printable character key.
    Char(char),
}

/// A key press with modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// The pressed key.
    pub key: Key,
    /// Control held.
    pub ctrl: bool,
    /// Command/Windows key held.
    pub meta: bool,
    /// Alt/Option held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
}

impl KeyInput {
    /// Creates an unmodified key press.
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        }
    }

    /// Adds the control modifier.
    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Adds the meta (command) modifier.
    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Adds the alt modifier.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// True when the platform chord modifier (ctrl or meta) is held.
    #[must_use]
    pub fn platform_modifier(&self) -> bool {
        self.ctrl || self.meta
    }

    /// True when any reserved modifier is held.
    #[must_use]
    pub fn reserved_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// Snapshot of the editor state a shortcut decision depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortcutContext {
    /// A workflow is selected in the editor.
    pub workflow_selected: bool,
    /// The selected workflow has at least one node.
    pub has_nodes: bool,
    /// A connection drag is in progress.
    pub dragging: bool,
    /// The node configuration panel is open.
    pub config_panel_open: bool,
    /// The agent interaction panel is open.
    pub interaction_panel_open: bool,
    /// An execution is in flight.
    pub executing: bool,
}

/// An editor action produced by a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Abandon the in-progress connection drag.
    CancelConnection,
    /// Close the node configuration panel.
    CloseConfigPanel,
    /// Close the agent interaction panel.
    CloseInteractionPanel,
    /// Start executing the selected workflow.
    StartExecution,
    /// Stop the running execution.
    StopExecution,
    /// Create and select a new workflow.
    NewWorkflow,
}

/// Resolves a key press against the editor state.
#[must_use]
pub fn resolve(input: KeyInput, context: ShortcutContext) -> Option<EditorAction> {
    // Global chord: works with or without a selected workflow.
    if input.platform_modifier() && !input.alt && input.key == Key::Char('n') {
        return Some(EditorAction::NewWorkflow);
    }

    if input.reserved_modifier() || !context.workflow_selected {
        return None;
    }

    match input.key {
        Key::Escape => {
            // Most transient state first.
            if context.dragging {
                Some(EditorAction::CancelConnection)
            } else if context.config_panel_open {
                Some(EditorAction::CloseConfigPanel)
            } else if context.interaction_panel_open {
                Some(EditorAction::CloseInteractionPanel)
            } else {
                None
            }
        }
        Key::Space => {
            if !context.has_nodes {
                None
            } else if context.executing {
                Some(EditorAction::StopExecution)
            } else {
                Some(EditorAction::StartExecution)
            }
        }
        Key::Char('n') => Some(EditorAction::NewWorkflow),
        Key::Char(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected() -> ShortcutContext {
        ShortcutContext {
            workflow_selected: true,
            ..ShortcutContext::default()
        }
    }

    #[test]
    fn escape_prefers_cancelling_a_drag() {
        let context = ShortcutContext {
            dragging: true,
            config_panel_open: true,
            interaction_panel_open: true,
            ..selected()
        };
        assert_eq!(
            resolve(KeyInput::plain(Key::Escape), context),
            Some(EditorAction::CancelConnection)
        );
    }

    #[test]
    fn escape_closes_config_panel_before_interaction_panel() {
        let context = ShortcutContext {
            config_panel_open: true,
            interaction_panel_open: true,
            ..selected()
        };
        assert_eq!(
            resolve(KeyInput::plain(Key::Escape), context),
            Some(EditorAction::CloseConfigPanel)
        );

        let context = ShortcutContext {
            interaction_panel_open: true,
            ..selected()
        };
        assert_eq!(
            resolve(KeyInput::plain(Key::Escape), context),
            Some(EditorAction::CloseInteractionPanel)
        );
    }

    #[test]
    fn escape_with_nothing_open_does_nothing() {
        assert_eq!(resolve(KeyInput::plain(Key::Escape), selected()), None);
    }

    #[test]
    fn space_toggles_execution_when_nodes_exist() {
        let idle = ShortcutContext {
            has_nodes: true,
            ..selected()
        };
        assert_eq!(
            resolve(KeyInput::plain(Key::Space), idle),
            Some(EditorAction::StartExecution)
        );

        let running = ShortcutContext {
            has_nodes: true,
            executing: true,
            ..selected()
        };
        assert_eq!(
            resolve(KeyInput::plain(Key::Space), running),
            Some(EditorAction::StopExecution)
        );
    }

    #[test]
    fn space_on_empty_workflow_does_nothing() {
        assert_eq!(resolve(KeyInput::plain(Key::Space), selected()), None);
    }

    #[test]
    fn plain_n_requires_selection() {
        assert_eq!(
            resolve(KeyInput::plain(Key::Char('n')), selected()),
            Some(EditorAction::NewWorkflow)
        );
        assert_eq!(
            resolve(KeyInput::plain(Key::Char('n')), ShortcutContext::default()),
            None
        );
    }

    #[test]
    fn platform_chord_creates_workflow_without_selection() {
        assert_eq!(
            resolve(
                KeyInput::plain(Key::Char('n')).with_ctrl(),
                ShortcutContext::default()
            ),
            Some(EditorAction::NewWorkflow)
        );
        assert_eq!(
            resolve(
                KeyInput::plain(Key::Char('n')).with_meta(),
                ShortcutContext::default()
            ),
            Some(EditorAction::NewWorkflow)
        );
    }

    #[test]
    fn reserved_modifiers_suppress_plain_shortcuts() {
        let context = ShortcutContext {
            has_nodes: true,
            ..selected()
        };
        assert_eq!(resolve(KeyInput::plain(Key::Space).with_ctrl(), context), None);
        assert_eq!(resolve(KeyInput::plain(Key::Escape).with_alt(), context), None);
        // ctrl+alt+n is not the plain chord either.
        assert_eq!(
            resolve(KeyInput::plain(Key::Char('n')).with_ctrl().with_alt(), context),
            None
        );
    }
}
