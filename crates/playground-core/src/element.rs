//! Design elements and the typed fields used to create and patch them.

use crate::style::{StyleMap, StyleValue, style_map};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = String;

/// Position new elements get when the caller supplies none.
pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);

/// Generate a fresh element id.
pub fn generate_id() -> ElementId {
    format!("el-{}", Uuid::new_v4().simple())
}

/// The kind of a design element.
///
/// Unrecognized type strings decode to [`ElementKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Button,
    Heading,
    Paragraph,
    Image,
    Input,
    Textarea,
    Select,
    Card,
    Divider,
    Link,
    Icon,
    Container,
    Section,
    Column,
    /// Fallback for unknown or missing types.
    #[default]
    #[serde(rename = "element", other)]
    Generic,
}

impl ElementKind {
    /// Whether elements of this kind can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, ElementKind::Container | ElementKind::Section | ElementKind::Column)
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Button => "Button",
            ElementKind::Heading => "Heading",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::Image => "Image",
            ElementKind::Input => "Input",
            ElementKind::Textarea => "Textarea",
            ElementKind::Select => "Select",
            ElementKind::Card => "Card",
            ElementKind::Divider => "Divider",
            ElementKind::Link => "Link",
            ElementKind::Icon => "Icon",
            ElementKind::Container => "Container",
            ElementKind::Section => "Section",
            ElementKind::Column => "Column",
            ElementKind::Generic => "Element",
        }
    }

    /// Type tag as written in saved designs and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Image => "image",
            ElementKind::Input => "input",
            ElementKind::Textarea => "textarea",
            ElementKind::Select => "select",
            ElementKind::Card => "card",
            ElementKind::Divider => "divider",
            ElementKind::Link => "link",
            ElementKind::Icon => "icon",
            ElementKind::Container => "container",
            ElementKind::Section => "section",
            ElementKind::Column => "column",
            ElementKind::Generic => "element",
        }
    }

    /// Default text for new elements of this kind.
    pub fn default_text(&self) -> &'static str {
        match self {
            ElementKind::Text => "Sample text",
            ElementKind::Button => "Click me",
            ElementKind::Heading => "Heading",
            _ => "",
        }
    }

    /// Default style for new elements of this kind.
    pub fn default_style(&self) -> StyleMap {
        match self {
            ElementKind::Text => style_map(&[
                ("padding", "12px"),
                ("color", "#333333"),
                ("fontSize", "16px"),
                ("backgroundColor", "transparent"),
            ]),
            ElementKind::Button => style_map(&[
                ("padding", "12px 24px"),
                ("backgroundColor", "#007bff"),
                ("color", "#ffffff"),
                ("border", "none"),
                ("borderRadius", "6px"),
                ("fontSize", "14px"),
            ]),
            ElementKind::Heading => style_map(&[
                ("padding", "16px 12px"),
                ("fontSize", "24px"),
                ("fontWeight", "bold"),
                ("color", "#2c3e50"),
            ]),
            _ => StyleMap::new(),
        }
    }

    /// Get all element kinds offered by the editor.
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Text,
            ElementKind::Button,
            ElementKind::Heading,
            ElementKind::Paragraph,
            ElementKind::Image,
            ElementKind::Input,
            ElementKind::Textarea,
            ElementKind::Select,
            ElementKind::Card,
            ElementKind::Divider,
            ElementKind::Link,
            ElementKind::Icon,
            ElementKind::Container,
            ElementKind::Section,
            ElementKind::Column,
        ]
    }
}

/// Kind-specific attributes (image source, link target, form hints).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Input type (`text`, `email`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Options of a select element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ElementProperties {
    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn default_position() -> Point {
    DEFAULT_POSITION
}

fn default_visible() -> bool {
    true
}

/// A single visual node of the design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "ElementProperties::is_empty")]
    pub properties: ElementProperties,
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default = "default_position")]
    pub position: Point,
    /// Child elements (container kinds only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Element {
    /// Create a new element of the given kind with its defaults.
    pub fn new(kind: ElementKind) -> Self {
        Self::from_data(ElementData::new(kind), DEFAULT_POSITION)
    }

    /// Build an element from caller-supplied fields over the kind defaults.
    ///
    /// Children in `data` become elements with fresh ids. Children given to a
    /// non-container kind are dropped.
    pub fn from_data(data: ElementData, default_position: Point) -> Self {
        let ElementData {
            kind,
            text,
            properties,
            style,
            position,
            children,
            locked,
            visible,
        } = data;

        let kind = kind.unwrap_or_default();
        let mut merged_style = kind.default_style();
        if let Some(style) = style {
            merge_style_into(&mut merged_style, style);
        }

        let children = match children {
            Some(children) if kind.is_container() => children
                .into_iter()
                .map(|child| Element::from_data(child, default_position))
                .collect(),
            Some(children) if !children.is_empty() => {
                log::warn!(
                    "Dropping {} children passed to non-container '{}'",
                    children.len(),
                    kind.as_str()
                );
                Vec::new()
            }
            _ => Vec::new(),
        };

        Self {
            id: generate_id(),
            kind,
            text: text.unwrap_or_else(|| kind.default_text().to_string()),
            properties: properties.unwrap_or_default(),
            style: merged_style,
            position: position.unwrap_or(default_position),
            children,
            locked: locked.unwrap_or(false),
            visible: visible.unwrap_or(true),
        }
    }

    /// Apply a partial update. The style merges per top-level key.
    pub fn apply_patch(&mut self, patch: ElementPatch) {
        let ElementPatch {
            text,
            properties,
            style,
            position,
            locked,
            visible,
        } = patch;

        if let Some(text) = text {
            self.text = text;
        }
        if let Some(properties) = properties {
            self.properties = properties;
        }
        if let Some(style) = style {
            self.merge_style(style);
        }
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(locked) = locked {
            self.locked = locked;
        }
        if let Some(visible) = visible {
            self.visible = visible;
        }
    }

    /// Shallow-merge style keys. A null value removes the key.
    pub fn merge_style(&mut self, style: StyleMap) {
        merge_style_into(&mut self.style, style);
    }

    /// Check whether this element is, or contains, the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|child| child.contains(id))
    }

    /// Assign fresh ids to this element and all descendants.
    pub fn regenerate_ids(&mut self) {
        self.id = generate_id();
        for child in &mut self.children {
            child.regenerate_ids();
        }
    }

    /// Move the element by an offset.
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + count(&self.children)
    }

    /// Text to show for this element, falling back to its display name.
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            self.kind.display_name()
        } else {
            &self.text
        }
    }
}

fn merge_style_into(target: &mut StyleMap, style: StyleMap) {
    for (key, value) in style {
        if matches!(value, StyleValue::Null) {
            target.shift_remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}

/// Fields a caller may supply when adding an element.
///
/// Anything unset falls back to the defaults of the element kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementData {
    #[serde(rename = "type", default)]
    pub kind: Option<ElementKind>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub properties: Option<ElementProperties>,
    #[serde(default)]
    pub style: Option<StyleMap>,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub children: Option<Vec<ElementData>>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl ElementData {
    /// Start from the given kind.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_children(mut self, children: Vec<ElementData>) -> Self {
        self.children = Some(children);
        self
    }
}

/// A partial update to an existing element.
///
/// Structure (id, kind, children) is not patchable; use the canvas
/// add/remove operations for that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub properties: Option<ElementProperties>,
    #[serde(default)]
    pub style: Option<StyleMap>,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl ElementPatch {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

// ========== TREE HELPERS ==========

/// Depth-first search for an element by id.
pub fn find<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    elements.iter().find_map(|element| {
        if element.id == id {
            Some(element)
        } else {
            find(&element.children, id)
        }
    })
}

/// Depth-first search for a mutable element by id.
pub fn find_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    elements.iter_mut().find_map(|element| {
        if element.id == id {
            Some(element)
        } else {
            find_mut(&mut element.children, id)
        }
    })
}

/// Remove an element (with its subtree) from wherever it sits in the tree.
pub fn remove(elements: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(index) = elements.iter().position(|e| e.id == id) {
        return Some(elements.remove(index));
    }
    elements
        .iter_mut()
        .find_map(|element| remove(&mut element.children, id))
}

/// Insert `element` right after the sibling with the given id.
///
/// Hands the element back if the sibling does not exist.
pub fn insert_after(elements: &mut Vec<Element>, id: &str, element: Element) -> Result<(), Element> {
    if let Some(index) = elements.iter().position(|e| e.id == id) {
        elements.insert(index + 1, element);
        return Ok(());
    }

    let mut pending = element;
    for parent in elements.iter_mut() {
        match insert_after(&mut parent.children, id, pending) {
            Ok(()) => return Ok(()),
            Err(back) => pending = back,
        }
    }
    Err(pending)
}

/// Total number of nodes in a forest.
pub fn count(elements: &[Element]) -> usize {
    elements.iter().map(Element::node_count).sum()
}

/// First id that appears more than once in the tree, in depth-first order.
pub fn find_duplicate_id(elements: &[Element]) -> Option<&str> {
    fn walk<'a>(elements: &'a [Element], seen: &mut HashSet<&'a str>) -> Option<&'a str> {
        for element in elements {
            if !seen.insert(element.id.as_str()) {
                return Some(&element.id);
            }
            if let Some(id) = walk(&element.children, seen) {
                return Some(id);
            }
        }
        None
    }

    walk(elements, &mut HashSet::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Element> {
        let mut section = Element::new(ElementKind::Section);
        section.id = "section".into();
        let mut button = Element::new(ElementKind::Button);
        button.id = "button".into();
        let mut text = Element::new(ElementKind::Text);
        text.id = "text".into();
        section.children = vec![button, text];

        let mut heading = Element::new(ElementKind::Heading);
        heading.id = "heading".into();
        vec![section, heading]
    }

    #[test]
    fn test_kind_defaults() {
        let button = Element::new(ElementKind::Button);
        assert_eq!(button.text, "Click me");
        assert_eq!(button.style["backgroundColor"], StyleValue::from("#007bff"));
        assert_eq!(button.position, DEFAULT_POSITION);
        assert!(button.visible);
        assert!(!button.locked);

        let image = Element::new(ElementKind::Image);
        assert!(image.text.is_empty());
        assert!(image.style.is_empty());
    }

    #[test]
    fn test_data_overrides_defaults() {
        let data = ElementData::new(ElementKind::Text)
            .with_text("Hello")
            .with_style(crate::style::style_map(&[("color", "#ff0000"), ("margin", "4px")]))
            .with_position(Point::new(5.0, 6.0));
        let element = Element::from_data(data, DEFAULT_POSITION);

        assert_eq!(element.text, "Hello");
        assert_eq!(element.position, Point::new(5.0, 6.0));
        assert_eq!(element.style["color"], StyleValue::from("#ff0000"));
        assert_eq!(element.style["padding"], StyleValue::from("12px"));
        assert_eq!(element.style["margin"], StyleValue::from("4px"));
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let data: ElementData = serde_json::from_str(r#"{"type":"hologram","text":"?"}"#).unwrap();
        assert_eq!(data.kind, Some(ElementKind::Generic));

        let element = Element::from_data(data, DEFAULT_POSITION);
        assert_eq!(element.kind, ElementKind::Generic);
        assert_eq!(element.label(), "?");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<ElementData, _> = serde_json::from_str(r#"{"type":"text","glow":true}"#);
        assert!(result.is_err());

        let result: Result<ElementPatch, _> = serde_json::from_str(r#"{"id":"other"}"#);
        assert!(result.is_err());
        let result: Result<ElementPatch, _> = serde_json::from_str(r#"{"type":"button"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_container_drops_children() {
        let data = ElementData::new(ElementKind::Button)
            .with_children(vec![ElementData::new(ElementKind::Text)]);
        let element = Element::from_data(data, DEFAULT_POSITION);
        assert!(element.children.is_empty());
    }

    #[test]
    fn test_patch_merges_style_shallowly() {
        let mut element = Element::new(ElementKind::Text);
        let mut nested = StyleMap::new();
        nested.insert("color".into(), "red".into());
        element.style.insert("hover".into(), StyleValue::Nested(nested));

        let mut replacement = StyleMap::new();
        replacement.insert("background".into(), "blue".into());
        let mut patch_style = crate::style::style_map(&[("color", "#000000")]);
        patch_style.insert("hover".into(), StyleValue::Nested(replacement.clone()));
        patch_style.insert("padding".into(), StyleValue::Null);

        element.apply_patch(ElementPatch::default().with_style(patch_style).with_text("Changed"));

        assert_eq!(element.text, "Changed");
        assert_eq!(element.style["color"], StyleValue::from("#000000"));
        assert_eq!(element.style["hover"], StyleValue::Nested(replacement));
        assert!(!element.style.contains_key("padding"));
        assert_eq!(element.style["fontSize"], StyleValue::from("16px"));
    }

    #[test]
    fn test_find_nested() {
        let mut elements = tree();
        assert_eq!(find(&elements, "text").map(|e| e.kind), Some(ElementKind::Text));
        assert!(find(&elements, "missing").is_none());

        find_mut(&mut elements, "button").unwrap().text = "Go".into();
        assert_eq!(find(&elements, "button").unwrap().text, "Go");
    }

    #[test]
    fn test_remove_nested() {
        let mut elements = tree();
        let removed = remove(&mut elements, "button").unwrap();
        assert_eq!(removed.id, "button");
        assert_eq!(count(&elements), 3);
        assert!(remove(&mut elements, "button").is_none());
    }

    #[test]
    fn test_insert_after() {
        let mut elements = tree();
        let mut copy = Element::new(ElementKind::Button);
        copy.id = "copy".into();
        insert_after(&mut elements, "button", copy).unwrap();

        let ids: Vec<_> = elements[0].children.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["button", "copy", "text"]);

        let orphan = Element::new(ElementKind::Text);
        assert!(insert_after(&mut elements, "missing", orphan).is_err());
    }

    #[test]
    fn test_find_duplicate_id() {
        let mut elements = tree();
        assert_eq!(find_duplicate_id(&elements), None);

        let mut clash = Element::new(ElementKind::Text);
        clash.id = "button".into();
        elements[1].children.push(clash);
        assert_eq!(find_duplicate_id(&elements), Some("button"));
        assert_eq!(find_duplicate_id(&[]), None);
    }

    #[test]
    fn test_regenerate_ids() {
        let mut section = tree().remove(0);
        let old: Vec<_> = section.children.iter().map(|c| c.id.clone()).collect();
        section.regenerate_ids();
        assert_ne!(section.id, "section");
        for (child, old_id) in section.children.iter().zip(old) {
            assert_ne!(child.id, old_id);
        }
    }

    #[test]
    fn test_json_shape() {
        let mut element = Element::new(ElementKind::Button);
        element.id = "el-1".into();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["position"]["x"], 100.0);
        assert!(json.get("children").is_none());

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn test_minimal_json_gets_defaults() {
        let element: Element = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert_eq!(element.kind, ElementKind::Generic);
        assert!(element.visible);
        assert_eq!(element.position, DEFAULT_POSITION);
    }
}
