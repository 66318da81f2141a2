//! Canvas document and state management.

use crate::element::{self, DEFAULT_POSITION, Element, ElementData, ElementId, ElementKind, ElementPatch};
use crate::history::{DEFAULT_HISTORY_CAPACITY, DocumentSnapshot, EditAction, History};
use crate::layout::{LayoutError, Section, sections_from_tree};
use crate::storage::{CANVAS_STORAGE_KEY, Storage, StorageError};
use crate::style::{StyleMap, style_map};
use crate::view::ViewSettings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Offset applied to duplicated elements.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Canvas errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("No storage attached to the canvas")]
    NoStorage,
    #[error("Duplicate element id '{0}'")]
    DuplicateId(ElementId),
}

/// When the canvas writes to its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Save after every mutation.
    #[default]
    Immediate,
    /// Mark the canvas dirty and save on [`Canvas::flush`].
    Deferred,
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Maximum number of history entries (including the baseline).
    pub history_capacity: usize,
    /// Storage key the document is saved under.
    pub storage_key: String,
    pub persist_mode: PersistMode,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: Vec2,
    /// Position for new elements that don't specify one.
    pub default_position: Point,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            storage_key: CANVAS_STORAGE_KEY.to_string(),
            persist_mode: PersistMode::default(),
            duplicate_offset: DUPLICATE_OFFSET,
            default_position: DEFAULT_POSITION,
        }
    }
}

fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_name() -> String {
    "Untitled".to_string()
}

/// A canvas document: the element tree plus view settings. This is what
/// gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    /// Unique document identifier.
    #[serde(default = "new_document_id")]
    pub id: String,
    /// Document name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Top-level elements in render order.
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub view_settings: ViewSettings,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: new_document_id(),
            name: default_name(),
            elements: Vec::new(),
            view_settings: ViewSettings::default(),
        }
    }

    /// Create a document holding the given elements.
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::new()
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    ///
    /// Accepts a full document or a bare array of elements. Every element id
    /// in the tree must be unique.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let document = if value.is_array() {
            Self::with_elements(serde_json::from_value(value)?)
        } else {
            serde_json::from_value(value)?
        };
        document.validate()?;
        Ok(document)
    }

    /// Check that no element id appears twice in the tree.
    pub fn validate(&self) -> Result<(), CanvasError> {
        match element::find_duplicate_id(&self.elements) {
            Some(id) => Err(CanvasError::DuplicateId(id.to_string())),
            None => Ok(()),
        }
    }
}

/// Runtime canvas state: the document, selection, history and persistence.
pub struct Canvas {
    document: CanvasDocument,
    /// Weak reference to the selected element.
    selected: Option<ElementId>,
    history: History,
    storage: Option<Arc<dyn Storage>>,
    config: CanvasConfig,
    /// Unsaved changes (deferred persistence only).
    dirty: bool,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("document", &self.document)
            .field("selected", &self.selected)
            .field("history_len", &self.history.len())
            .field("history_cursor", &self.history.cursor())
            .field("has_storage", &self.storage.is_some())
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create an empty canvas with the given configuration.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self::with_document(CanvasDocument::new(), config)
    }

    /// Create a canvas with an existing document.
    ///
    /// The document becomes the baseline history entry.
    pub fn with_document(document: CanvasDocument, config: CanvasConfig) -> Self {
        let mut canvas = Self {
            document,
            selected: None,
            history: History::with_capacity(config.history_capacity),
            storage: None,
            config,
            dirty: false,
        };
        let baseline = canvas.snapshot();
        canvas.history.record(EditAction::Initialize, baseline);
        canvas
    }

    /// Load the canvas from storage.
    ///
    /// Missing or corrupt data yields an empty document; the problem is
    /// logged, never returned.
    pub fn load(storage: Arc<dyn Storage>, config: CanvasConfig) -> Self {
        let key = config.storage_key.clone();
        let document = match storage.load(&key) {
            Ok(json) => match CanvasDocument::from_json(&json) {
                Ok(document) => {
                    log::info!(
                        "Loaded canvas '{}' with {} elements from '{}'",
                        document.name,
                        document.elements.len(),
                        key
                    );
                    document
                }
                Err(e) => {
                    log::warn!("Discarding corrupt canvas data under '{}': {}", key, e);
                    CanvasDocument::new()
                }
            },
            Err(StorageError::NotFound(_)) => {
                log::warn!("No saved canvas under '{}', starting empty", key);
                CanvasDocument::new()
            }
            Err(e) => {
                log::warn!("Failed to load canvas from '{}': {}", key, e);
                CanvasDocument::new()
            }
        };

        let mut canvas = Self::with_document(document, config);
        canvas.storage = Some(storage);
        canvas
    }

    /// Attach a storage backend. Nothing is loaded or saved until the next
    /// mutation or [`Canvas::save`].
    pub fn set_storage(&mut self, storage: Arc<dyn Storage>) {
        self.storage = Some(storage);
    }

    pub fn storage(&self) -> Option<&Arc<dyn Storage>> {
        self.storage.as_ref()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ========== QUERIES ==========

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Top-level elements, read-only (for rendering and export).
    pub fn elements(&self) -> &[Element] {
        &self.document.elements
    }

    /// Get an element anywhere in the tree.
    pub fn element(&self, id: &str) -> Option<&Element> {
        element::find(&self.document.elements, id)
    }

    /// The selected element, if it still exists.
    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.element(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn view(&self) -> &ViewSettings {
        &self.document.view_settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of top-level elements.
    pub fn total_elements(&self) -> usize {
        self.document.elements.len()
    }

    /// Number of top-level sections.
    pub fn total_sections(&self) -> usize {
        self.document
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Section)
            .count()
    }

    /// Number of elements in the whole tree.
    pub fn len(&self) -> usize {
        element::count(&self.document.elements)
    }

    pub fn is_empty(&self) -> bool {
        self.document.elements.is_empty()
    }

    /// Read the tree as a section/column/widget layout.
    pub fn sections(&self) -> Result<Vec<Section>, LayoutError> {
        sections_from_tree(&self.document.elements)
    }

    // ========== MUTATIONS ==========

    /// Add an element built from `data` under `parent` (root when `None`).
    ///
    /// A missing or non-container parent puts the element at the root.
    pub fn add_element(&mut self, parent: Option<&str>, data: ElementData) -> Element {
        let element = Element::from_data(data, self.config.default_position);
        let added = element.clone();

        let orphan = match parent {
            None => Some(element),
            Some(parent_id) => match element::find_mut(&mut self.document.elements, parent_id) {
                Some(container) if container.kind.is_container() => {
                    container.children.push(element);
                    None
                }
                Some(other) => {
                    log::warn!(
                        "Element '{}' is a {} and cannot hold children, adding to root",
                        parent_id,
                        other.kind.as_str()
                    );
                    Some(element)
                }
                None => {
                    log::warn!("Parent '{}' not found, adding to root", parent_id);
                    Some(element)
                }
            },
        };
        if let Some(element) = orphan {
            self.document.elements.push(element);
        }

        self.commit(EditAction::AddElement);
        added
    }

    /// Add a layout section at the root.
    pub fn add_section(&mut self, section: Section) -> Element {
        let element = section.into_element();
        self.document.elements.push(element.clone());
        self.commit(EditAction::AddElement);
        element
    }

    /// Apply a partial update to an element.
    /// Returns false if no element has this id.
    pub fn update_element(&mut self, id: &str, patch: ElementPatch) -> bool {
        let Some(element) = element::find_mut(&mut self.document.elements, id) else {
            log::debug!("Update ignored, element '{}' not found", id);
            return false;
        };
        element.apply_patch(patch);
        self.commit(EditAction::UpdateElement);
        true
    }

    /// Merge style keys into an element.
    pub fn update_element_style(&mut self, id: &str, style: StyleMap) -> bool {
        self.update_element(id, ElementPatch::default().with_style(style))
    }

    /// Remove an element and its subtree.
    /// Clears the selection if it pointed into the removed subtree.
    pub fn remove_element(&mut self, id: &str) -> bool {
        let Some(removed) = element::remove(&mut self.document.elements, id) else {
            log::debug!("Remove ignored, element '{}' not found", id);
            return false;
        };
        if self.selected.as_deref().is_some_and(|sel| removed.contains(sel)) {
            self.selected = None;
        }
        self.commit(EditAction::RemoveElement);
        true
    }

    /// Duplicate an element as its next sibling, offset by the configured
    /// delta. The copy and its descendants get fresh ids.
    pub fn duplicate_element(&mut self, id: &str) -> Option<Element> {
        let mut copy = self.element(id)?.clone();
        copy.regenerate_ids();
        copy.translate(self.config.duplicate_offset);
        let duplicate = copy.clone();

        if let Err(copy) = element::insert_after(&mut self.document.elements, id, copy) {
            // The original was found above, so this only guards the tree shape.
            self.document.elements.push(copy);
        }

        self.commit(EditAction::DuplicateElement);
        Some(duplicate)
    }

    /// Set the selection. Selecting an unknown id clears it and returns false.
    pub fn select_element(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.element(id).is_some() => {
                self.selected = Some(id.to_string());
                true
            }
            Some(id) => {
                log::debug!("Cannot select unknown element '{}'", id);
                self.selected = None;
                false
            }
        }
    }

    /// Remove every element and clear the selection.
    pub fn clear_canvas(&mut self) {
        self.document.elements.clear();
        self.selected = None;
        self.commit(EditAction::ClearCanvas);
    }

    /// Insert the welcome section with a title, subtitle and call to action.
    pub fn add_sample_layout(&mut self) -> Element {
        let title = ElementData::new(ElementKind::Text)
            .with_text("Welcome to Design Playground 🎨")
            .with_style(style_map(&[
                ("fontSize", "32px"),
                ("fontWeight", "bold"),
                ("color", "white"),
                ("textAlign", "center"),
                ("marginBottom", "20px"),
            ]))
            .with_position(Point::new(50.0, 50.0));

        let subtitle = ElementData::new(ElementKind::Text)
            .with_text("Drag elements from the sidebar to start building your amazing UI!")
            .with_style(style_map(&[
                ("fontSize", "18px"),
                ("color", "rgba(255,255,255,0.9)"),
                ("textAlign", "center"),
                ("lineHeight", "1.6"),
            ]))
            .with_position(Point::new(50.0, 120.0));

        let cta = ElementData::new(ElementKind::Button)
            .with_text("Get Started")
            .with_style(style_map(&[
                ("padding", "15px 30px"),
                ("background", "white"),
                ("color", "#667eea"),
                ("border", "none"),
                ("borderRadius", "50px"),
                ("fontSize", "16px"),
                ("fontWeight", "bold"),
                ("cursor", "pointer"),
                ("margin", "20px auto"),
                ("display", "block"),
            ]))
            .with_position(Point::new(200.0, 200.0));

        let section = ElementData::new(ElementKind::Section)
            .with_style(style_map(&[
                ("padding", "40px"),
                ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
                ("borderRadius", "20px"),
                ("marginBottom", "20px"),
            ]))
            .with_children(vec![title, subtitle, cta]);

        let element = Element::from_data(section, self.config.default_position);
        self.document.elements.push(element.clone());
        self.commit(EditAction::AddSampleLayout);
        element
    }

    /// Replace the tree with elements parsed from JSON (a document or a bare
    /// element array). On failure the canvas is left unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<usize, CanvasError> {
        let imported = match CanvasDocument::from_json(json) {
            Ok(document) => document.elements,
            Err(e) => {
                log::warn!("Rejected design import: {}", e);
                return Err(e);
            }
        };

        let count = element::count(&imported);
        self.document.elements = imported;
        self.selected = None;
        self.commit(EditAction::Import);
        log::info!("Imported {} elements", count);
        Ok(count)
    }

    /// Serialize the current document to JSON.
    pub fn export_json(&self) -> Result<String, CanvasError> {
        Ok(self.document.to_json()?)
    }

    // ========== HISTORY ==========

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            elements: self.document.elements.clone(),
            selected: self.selected.clone(),
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.document.elements = snapshot.elements;
        self.selected = snapshot.selected;
        self.persist();
    }

    fn commit(&mut self, action: EditAction) {
        let snapshot = self.snapshot();
        self.history.record(action, snapshot);
        self.persist();
    }

    // ========== VIEW ==========

    /// Change view settings. Persisted, but not recorded in history.
    pub fn update_view(&mut self, update: impl FnOnce(&mut ViewSettings)) {
        update(&mut self.document.view_settings);
        self.persist();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.update_view(|view| view.set_zoom(zoom));
    }

    pub fn zoom_in(&mut self) {
        self.update_view(ViewSettings::zoom_in);
    }

    pub fn zoom_out(&mut self) {
        self.update_view(ViewSettings::zoom_out);
    }

    pub fn reset_zoom(&mut self) {
        self.update_view(ViewSettings::reset_zoom);
    }

    pub fn toggle_grid(&mut self) {
        self.update_view(ViewSettings::toggle_grid);
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.update_view(|view| view.set_show_grid(show));
    }

    // ========== PERSISTENCE ==========

    /// Check if there are unsaved changes (deferred mode).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the document now.
    pub fn save(&mut self) -> Result<(), CanvasError> {
        let storage = self.storage.as_ref().ok_or(CanvasError::NoStorage)?;
        let json = self.document.to_json()?;
        storage.save(&self.config.storage_key, &json)?;
        self.dirty = false;
        log::debug!("Saved canvas under '{}'", self.config.storage_key);
        Ok(())
    }

    /// Save if there are unsaved changes.
    /// Returns true if a save was performed.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save canvas: {}", e);
                false
            }
        }
    }

    fn persist(&mut self) {
        if self.storage.is_none() {
            return;
        }
        match self.config.persist_mode {
            PersistMode::Immediate => {
                if let Err(e) = self.save() {
                    log::error!("Failed to save canvas: {}", e);
                }
            }
            PersistMode::Deferred => self.dirty = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageResult};
    use crate::style::StyleValue;

    /// Storage that fails every call.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn save(&self, _key: &str, _contents: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk full".into()))
        }
        fn load(&self, _key: &str) -> StorageResult<String> {
            Err(StorageError::Io("unreadable".into()))
        }
        fn delete(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io("read-only".into()))
        }
        fn list(&self) -> StorageResult<Vec<String>> {
            Ok(vec![])
        }
        fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }
    }

    fn button(text: &str) -> ElementData {
        ElementData::new(ElementKind::Button).with_text(text)
    }

    #[test]
    fn test_canvas_creation() {
        let canvas = Canvas::new();
        assert!(canvas.is_empty());
        assert_eq!(canvas.history().len(), 1);
        assert!(!canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_add_element() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));

        assert_eq!(canvas.total_elements(), 1);
        assert_eq!(canvas.element(&added.id), Some(&added));
        assert_eq!(added.text, "Go");
        assert_eq!(added.position, DEFAULT_POSITION);
    }

    #[test]
    fn test_add_element_to_parent() {
        let mut canvas = Canvas::new();
        let section = canvas.add_element(None, ElementData::new(ElementKind::Section));
        let child = canvas.add_element(Some(&section.id), button("Inside"));

        assert_eq!(canvas.total_elements(), 1);
        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.elements()[0].children[0].id, child.id);
    }

    #[test]
    fn test_add_element_to_non_container_goes_to_root() {
        let mut canvas = Canvas::new();
        let first = canvas.add_element(None, button("First"));
        canvas.add_element(Some(&first.id), button("Second"));
        canvas.add_element(Some("missing"), button("Third"));

        assert_eq!(canvas.total_elements(), 3);
        assert!(canvas.elements()[0].children.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut canvas = Canvas::new();
        let a = canvas.add_element(None, button("a"));
        let b = canvas.add_element(None, button("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_element() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));

        assert!(canvas.update_element(&added.id, ElementPatch::default().with_text("Stop")));
        assert_eq!(canvas.element(&added.id).unwrap().text, "Stop");
        assert_eq!(canvas.history().len(), 3);

        assert!(!canvas.update_element("missing", ElementPatch::default().with_text("x")));
        assert_eq!(canvas.history().len(), 3);
    }

    #[test]
    fn test_update_element_style() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        canvas.update_element_style(&added.id, style_map(&[("color", "#000000")]));

        let style = &canvas.element(&added.id).unwrap().style;
        assert_eq!(style["color"], StyleValue::from("#000000"));
        assert_eq!(style["borderRadius"], StyleValue::from("6px"));
    }

    #[test]
    fn test_remove_element() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));

        assert!(canvas.remove_element(&added.id));
        assert!(canvas.is_empty());
        assert!(!canvas.remove_element(&added.id));
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.add_element(None, button("a"));
        let b = canvas.add_element(None, button("b"));

        canvas.select_element(Some(&a.id));
        canvas.remove_element(&b.id);
        assert_eq!(canvas.selected_id(), Some(a.id.as_str()));

        canvas.remove_element(&a.id);
        assert_eq!(canvas.selected_id(), None);
    }

    #[test]
    fn test_remove_parent_clears_nested_selection() {
        let mut canvas = Canvas::new();
        let section = canvas.add_element(None, ElementData::new(ElementKind::Section));
        let child = canvas.add_element(Some(&section.id), button("Inside"));

        canvas.select_element(Some(&child.id));
        canvas.remove_element(&section.id);
        assert!(canvas.selected().is_none());
    }

    #[test]
    fn test_canvas_selection() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        let history_len = canvas.history().len();

        assert!(canvas.select_element(Some(&added.id)));
        assert_eq!(canvas.selected().map(|e| e.id.as_str()), Some(added.id.as_str()));
        // Selection is view state only.
        assert_eq!(canvas.history().len(), history_len);

        assert!(!canvas.select_element(Some("missing")));
        assert!(canvas.selected().is_none());

        canvas.select_element(Some(&added.id));
        assert!(canvas.select_element(None));
        assert!(canvas.selected().is_none());
    }

    #[test]
    fn test_duplicate_element() {
        let mut canvas = Canvas::new();
        let first = canvas.add_element(None, button("Go").with_position(Point::new(10.0, 15.0)));
        let last = canvas.add_element(None, button("Last"));

        let copy = canvas.duplicate_element(&first.id).unwrap();
        assert_ne!(copy.id, first.id);
        assert_eq!(copy.kind, first.kind);
        assert_eq!(copy.text, first.text);
        assert_eq!(copy.style, first.style);
        assert_eq!(copy.position, Point::new(30.0, 35.0));

        let ids: Vec<_> = canvas.elements().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![first.id.clone(), copy.id.clone(), last.id]);

        assert!(canvas.duplicate_element("missing").is_none());
    }

    #[test]
    fn test_duplicate_nested_gets_fresh_child_ids() {
        let mut canvas = Canvas::new();
        let section = canvas.add_element(None, ElementData::new(ElementKind::Section));
        let child = canvas.add_element(Some(&section.id), button("Inside"));

        let copy = canvas.duplicate_element(&section.id).unwrap();
        assert_eq!(copy.children.len(), 1);
        assert_ne!(copy.children[0].id, child.id);
        assert_eq!(canvas.len(), 4);
    }

    #[test]
    fn test_clear_canvas() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        canvas.select_element(Some(&added.id));

        canvas.clear_canvas();
        assert!(canvas.is_empty());
        assert!(canvas.selected_id().is_none());

        assert!(canvas.undo());
        assert_eq!(canvas.total_elements(), 1);
        assert_eq!(canvas.elements()[0].id, added.id);
    }

    #[test]
    fn test_sample_layout() {
        let mut canvas = Canvas::new();
        let section = canvas.add_sample_layout();

        assert_eq!(canvas.total_elements(), 1);
        assert_eq!(canvas.total_sections(), 1);
        assert_eq!(section.children.len(), 3);
        assert_eq!(section.children[2].text, "Get Started");
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_undo_add_element() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));

        assert!(canvas.can_undo());
        assert!(canvas.undo());
        assert!(canvas.is_empty());
        assert!(canvas.can_redo());

        assert!(canvas.redo());
        assert_eq!(canvas.total_elements(), 1);
        assert_eq!(canvas.elements()[0].id, added.id);
    }

    #[test]
    fn test_undo_remove_element() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        canvas.remove_element(&added.id);

        assert!(canvas.undo());
        assert_eq!(canvas.element(&added.id), Some(&added));
    }

    #[test]
    fn test_undo_clears_redo() {
        let mut canvas = Canvas::new();
        canvas.add_element(None, button("a"));
        assert!(canvas.undo());
        assert!(canvas.can_redo());

        canvas.add_element(None, button("b"));
        assert!(!canvas.can_redo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut canvas = Canvas::new();
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_restored_state_is_independent_of_history() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        canvas.add_element(None, button("Other"));
        canvas.undo();

        // Mutate the live tree without recording.
        canvas.document.elements[0].text = "Tampered".into();
        canvas.redo();
        canvas.undo();
        assert_eq!(canvas.element(&added.id).unwrap().text, "Go");
    }

    #[test]
    fn test_import_json() {
        let mut canvas = Canvas::new();
        let count = canvas
            .import_json(r#"[{"id":"a","type":"section","children":[{"id":"b","type":"text","text":"Hi"}]}]"#)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(canvas.element("b").unwrap().text, "Hi");
        assert!(canvas.undo());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_import_invalid_json_leaves_state() {
        let mut canvas = Canvas::new();
        canvas.add_element(None, button("Go"));
        let before = canvas.elements().to_vec();
        let history_len = canvas.history().len();

        assert!(canvas.import_json("{not json").is_err());
        assert!(canvas.import_json(r#"[{"type":"text"}]"#).is_err());
        assert_eq!(canvas.elements(), before.as_slice());
        assert_eq!(canvas.history().len(), history_len);
    }

    #[test]
    fn test_import_duplicate_ids_rejected() {
        let mut canvas = Canvas::new();
        let added = canvas.add_element(None, button("Go"));
        canvas.select_element(Some(&added.id));
        let before = canvas.elements().to_vec();
        let history_len = canvas.history().len();

        let result = canvas.import_json(r#"[{"id":"a","text":"one"},{"id":"a","text":"two"}]"#);
        assert!(matches!(result, Err(CanvasError::DuplicateId(ref id)) if id == "a"));

        let nested = r#"[{"id":"s","type":"section","children":[{"id":"s","type":"text"}]}]"#;
        assert!(matches!(canvas.import_json(nested), Err(CanvasError::DuplicateId(_))));

        assert_eq!(canvas.elements(), before.as_slice());
        assert_eq!(canvas.history().len(), history_len);
        assert_eq!(canvas.selected_id(), Some(added.id.as_str()));
    }

    #[test]
    fn test_load_duplicate_ids_yields_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(CANVAS_STORAGE_KEY, r#"{"elements":[{"id":"x","type":"text"},{"id":"x","type":"button"}]}"#)
            .unwrap();

        let canvas = Canvas::load(storage, CanvasConfig::default());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut canvas = Canvas::new();
        canvas.add_sample_layout();
        canvas.toggle_grid();

        let json = canvas.export_json().unwrap();
        let document = CanvasDocument::from_json(&json).unwrap();
        assert_eq!(&document, canvas.document());
    }

    #[test]
    fn test_persists_after_mutation() {
        let storage = Arc::new(MemoryStorage::new());
        let mut canvas = Canvas::load(storage.clone(), CanvasConfig::default());
        let added = canvas.add_element(None, button("Saved"));

        let reloaded = Canvas::load(storage, CanvasConfig::default());
        assert_eq!(reloaded.element(&added.id).map(|e| e.text.as_str()), Some("Saved"));
        assert!(!reloaded.can_undo());
    }

    #[test]
    fn test_view_settings_persist_without_history() {
        let storage = Arc::new(MemoryStorage::new());
        let mut canvas = Canvas::load(storage.clone(), CanvasConfig::default());
        canvas.zoom_in();
        canvas.toggle_grid();
        assert_eq!(canvas.history().len(), 1);

        let reloaded = Canvas::load(storage, CanvasConfig::default());
        assert!(reloaded.view().show_grid);
        assert_eq!(reloaded.view().zoom, 1.1);
    }

    #[test]
    fn test_load_corrupt_data_yields_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(CANVAS_STORAGE_KEY, "{{{ definitely not json").unwrap();

        let canvas = Canvas::load(storage, CanvasConfig::default());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_load_bare_element_array() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(CANVAS_STORAGE_KEY, r#"[{"id":"el-1","type":"button","text":"Legacy"}]"#)
            .unwrap();

        let canvas = Canvas::load(storage, CanvasConfig::default());
        assert_eq!(canvas.element("el-1").unwrap().text, "Legacy");
    }

    #[test]
    fn test_failed_save_does_not_block_mutation() {
        let mut canvas = Canvas::load(Arc::new(BrokenStorage), CanvasConfig::default());
        let added = canvas.add_element(None, button("Go"));

        assert!(canvas.element(&added.id).is_some());
        assert!(canvas.save().is_err());
    }

    #[test]
    fn test_deferred_persistence() {
        let storage = Arc::new(MemoryStorage::new());
        let config = CanvasConfig {
            persist_mode: PersistMode::Deferred,
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::load(storage.clone(), config);
        assert!(!canvas.is_dirty());

        canvas.add_element(None, button("Go"));
        assert!(canvas.is_dirty());
        assert!(!storage.exists(CANVAS_STORAGE_KEY).unwrap());

        assert!(canvas.flush());
        assert!(!canvas.is_dirty());
        assert!(storage.exists(CANVAS_STORAGE_KEY).unwrap());
        assert!(!canvas.flush());
    }

    #[test]
    fn test_save_without_storage() {
        let mut canvas = Canvas::new();
        assert!(matches!(canvas.save(), Err(CanvasError::NoStorage)));
    }

    #[test]
    fn test_custom_config() {
        let config = CanvasConfig {
            history_capacity: 3,
            duplicate_offset: Vec2::new(5.0, -5.0),
            default_position: Point::new(0.0, 0.0),
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::with_config(config);
        let added = canvas.add_element(None, button("Go"));
        assert_eq!(added.position, Point::new(0.0, 0.0));

        let copy = canvas.duplicate_element(&added.id).unwrap();
        assert_eq!(copy.position, Point::new(5.0, -5.0));

        canvas.add_element(None, button("More"));
        assert_eq!(canvas.history().len(), 3);
    }

    #[test]
    fn test_sections_view() {
        let mut canvas = Canvas::new();
        let mut section = Section::with_columns(2);
        section.columns[0]
            .push_widget(Element::new(ElementKind::Button))
            .unwrap();
        canvas.add_section(section);

        let sections = canvas.sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].widget_count(), 1);

        canvas.add_element(None, button("Loose"));
        assert!(canvas.sections().is_err());
    }
}
