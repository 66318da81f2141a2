//! Design Playground Core Library
//!
//! Platform-agnostic data structures and logic for the design playground:
//! the element tree, undo/redo history, style normalization and persistence.

pub mod canvas;
pub mod element;
pub mod history;
pub mod layout;
pub mod shortcuts;
pub mod storage;
pub mod style;
pub mod view;

pub use canvas::{Canvas, CanvasConfig, CanvasDocument, CanvasError, PersistMode};
pub use element::{Element, ElementData, ElementId, ElementKind, ElementPatch, ElementProperties};
pub use history::{DocumentSnapshot, EditAction, History, HistoryEntry};
pub use layout::{Column, LayoutError, Section};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutOutcome, ShortcutRegistry};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use style::{StyleMap, StyleValue};
pub use view::{Theme, UiState, ViewSettings};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
