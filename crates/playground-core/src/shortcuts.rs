//! Keyboard shortcut definitions and their canvas effects.

use crate::canvas::Canvas;
use crate::element::ElementId;
use crate::layout::Section;
use crate::view::UiState;

/// A command a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    Save,
    Export,
    AddSection,
    Delete,
    Escape,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Duplicate,
    Undo,
    Redo,
}

/// What applying a shortcut did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    /// The canvas or UI state changed.
    Applied,
    /// A new element was created (and selected).
    Created(ElementId),
    /// The caller should present the export dialog.
    ExportRequested,
    /// Nothing to do (no selection, empty history, no storage).
    Ignored,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check if a key press triggers this shortcut.
    ///
    /// Letter keys compare case-insensitively. Cmd counts as Ctrl.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }

    /// Map a key press to its action, if any shortcut is bound to it.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutAction> {
        ShortcutRegistry::all()
            .iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.action)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("S", true, false, ShortcutAction::Save, "Save design"),
    Shortcut::new("E", true, false, ShortcutAction::Export, "Export code"),
    Shortcut::new("A", true, false, ShortcutAction::AddSection, "Add section"),
    Shortcut::new("D", true, false, ShortcutAction::Duplicate, "Duplicate selected element"),
    Shortcut::new("Z", true, false, ShortcutAction::Undo, "Undo"),
    Shortcut::new("Z", true, true, ShortcutAction::Redo, "Redo"),
    Shortcut::new("Y", true, false, ShortcutAction::Redo, "Redo"),
    Shortcut::new("=", true, false, ShortcutAction::ZoomIn, "Zoom in"),
    Shortcut::new("+", true, false, ShortcutAction::ZoomIn, "Zoom in"),
    Shortcut::new("-", true, false, ShortcutAction::ZoomOut, "Zoom out"),
    Shortcut::new("0", true, false, ShortcutAction::ResetZoom, "Reset zoom"),
    Shortcut::new("Delete", false, false, ShortcutAction::Delete, "Delete selected element"),
    Shortcut::new("Backspace", false, false, ShortcutAction::Delete, "Delete selected element"),
    Shortcut::new("Escape", false, false, ShortcutAction::Escape, "Deselect and close dialogs"),
];

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Shortcuts bound to an action.
    pub fn for_action(action: ShortcutAction) -> impl Iterator<Item = &'static Shortcut> {
        SHORTCUTS.iter().filter(move |s| s.action == action)
    }
}

impl Canvas {
    /// Apply a shortcut's effect to the canvas and UI state.
    pub fn apply_shortcut(&mut self, action: ShortcutAction, ui: &mut UiState) -> ShortcutOutcome {
        log::debug!("Applying shortcut {:?}", action);
        match action {
            ShortcutAction::Save => {
                if self.storage().is_none() {
                    log::debug!("Save ignored, no storage attached");
                    return ShortcutOutcome::Ignored;
                }
                match self.save() {
                    Ok(()) => ShortcutOutcome::Applied,
                    Err(e) => {
                        log::error!("Failed to save canvas: {}", e);
                        ShortcutOutcome::Ignored
                    }
                }
            }
            ShortcutAction::Export => {
                ui.show_export_modal = true;
                ShortcutOutcome::ExportRequested
            }
            ShortcutAction::AddSection => {
                let section = self.add_section(Section::with_columns(1));
                self.select_element(Some(&section.id));
                ShortcutOutcome::Created(section.id)
            }
            ShortcutAction::Delete => {
                let selected = self.selected_id().map(str::to_owned);
                applied_if(selected.is_some_and(|id| self.remove_element(&id)))
            }
            ShortcutAction::Duplicate => {
                let Some(id) = self.selected_id().map(str::to_owned) else {
                    return ShortcutOutcome::Ignored;
                };
                match self.duplicate_element(&id) {
                    Some(copy) => {
                        self.select_element(Some(&copy.id));
                        ShortcutOutcome::Created(copy.id)
                    }
                    None => ShortcutOutcome::Ignored,
                }
            }
            ShortcutAction::Escape => {
                let had_state = self.selected_id().is_some() || ui.show_export_modal;
                self.select_element(None);
                ui.show_export_modal = false;
                if had_state {
                    ShortcutOutcome::Applied
                } else {
                    ShortcutOutcome::Ignored
                }
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                ShortcutOutcome::Applied
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                ShortcutOutcome::Applied
            }
            ShortcutAction::ResetZoom => {
                self.reset_zoom();
                ShortcutOutcome::Applied
            }
            ShortcutAction::Undo => applied_if(self.undo()),
            ShortcutAction::Redo => applied_if(self.redo()),
        }
    }
}

fn applied_if(changed: bool) -> ShortcutOutcome {
    if changed {
        ShortcutOutcome::Applied
    } else {
        ShortcutOutcome::Ignored
    }
}
