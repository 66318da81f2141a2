//! Section / column / widget layout.
//!
//! A stricter view of the element tree for page-builder style designs:
//! sections hold columns, columns hold leaf widgets. Ownership by value
//! means a widget sits in exactly one column and a column in exactly one
//! section.

use crate::element::{DEFAULT_POSITION, Element, ElementId, ElementKind, ElementProperties, generate_id};
use crate::style::StyleMap;
use kurbo::Point;
use thiserror::Error;

/// Errors when reading an element tree as a section layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Top-level element '{id}' is a {kind}, expected a section")]
    NotASection { id: ElementId, kind: &'static str },
    #[error("Element '{id}' in section '{section}' is a {kind}, expected a column")]
    NotAColumn {
        section: ElementId,
        id: ElementId,
        kind: &'static str,
    },
    #[error("Widget '{id}' in column '{column}' is a container")]
    NestedContainer { column: ElementId, id: ElementId },
}

/// A column of leaf widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ElementId,
    pub style: StyleMap,
    pub widgets: Vec<Element>,
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Column {
    /// Create an empty column.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            style: StyleMap::new(),
            widgets: Vec::new(),
        }
    }

    /// Append a widget. Containers are rejected.
    pub fn push_widget(&mut self, widget: Element) -> Result<(), LayoutError> {
        if widget.kind.is_container() {
            return Err(LayoutError::NestedContainer {
                column: self.id.clone(),
                id: widget.id,
            });
        }
        self.widgets.push(widget);
        Ok(())
    }

    /// Convert to a `column` element holding the widgets.
    pub fn into_element(self) -> Element {
        Element {
            id: self.id,
            kind: ElementKind::Column,
            text: String::new(),
            properties: ElementProperties::default(),
            style: self.style,
            position: DEFAULT_POSITION,
            children: self.widgets,
            locked: false,
            visible: true,
        }
    }

    fn try_from_element(section: &str, element: &Element) -> Result<Self, LayoutError> {
        if element.kind != ElementKind::Column {
            return Err(LayoutError::NotAColumn {
                section: section.to_string(),
                id: element.id.clone(),
                kind: element.kind.as_str(),
            });
        }

        let mut column = Column {
            id: element.id.clone(),
            style: element.style.clone(),
            widgets: Vec::with_capacity(element.children.len()),
        };
        for widget in &element.children {
            column.push_widget(widget.clone())?;
        }
        Ok(column)
    }
}

/// A page section made of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: ElementId,
    pub style: StyleMap,
    pub position: Point,
    pub columns: Vec<Column>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    /// Create an empty section.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            style: StyleMap::new(),
            position: DEFAULT_POSITION,
            columns: Vec::new(),
        }
    }

    /// Create a section with `count` empty columns.
    pub fn with_columns(count: usize) -> Self {
        let mut section = Self::new();
        section.columns = (0..count).map(|_| Column::new()).collect();
        section
    }

    /// Append an empty column and return it.
    pub fn add_column(&mut self) -> &mut Column {
        self.columns.push(Column::new());
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Total widgets across all columns.
    pub fn widget_count(&self) -> usize {
        self.columns.iter().map(|c| c.widgets.len()).sum()
    }

    /// Find a widget by id, with the index of the column holding it.
    pub fn find_widget(&self, id: &str) -> Option<(usize, &Element)> {
        self.columns.iter().enumerate().find_map(|(index, column)| {
            column
                .widgets
                .iter()
                .find(|w| w.id == id)
                .map(|widget| (index, widget))
        })
    }

    /// Convert to a `section` element with `column` children.
    pub fn into_element(self) -> Element {
        Element {
            id: self.id,
            kind: ElementKind::Section,
            text: String::new(),
            properties: ElementProperties::default(),
            style: self.style,
            position: self.position,
            children: self.columns.into_iter().map(Column::into_element).collect(),
            locked: false,
            visible: true,
        }
    }

    /// Read a `section` element as a layout section.
    pub fn try_from_element(element: &Element) -> Result<Self, LayoutError> {
        if element.kind != ElementKind::Section {
            return Err(LayoutError::NotASection {
                id: element.id.clone(),
                kind: element.kind.as_str(),
            });
        }

        let columns = element
            .children
            .iter()
            .map(|child| Column::try_from_element(&element.id, child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Section {
            id: element.id.clone(),
            style: element.style.clone(),
            position: element.position,
            columns,
        })
    }
}

/// Read a whole element tree as sections.
pub fn sections_from_tree(elements: &[Element]) -> Result<Vec<Section>, LayoutError> {
    elements.iter().map(Section::try_from_element).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_section() -> Section {
        let mut section = Section::with_columns(2);
        section.columns[0].push_widget(Element::new(ElementKind::Heading)).unwrap();
        section.columns[1].push_widget(Element::new(ElementKind::Button)).unwrap();
        section.columns[1].push_widget(Element::new(ElementKind::Text)).unwrap();
        section
    }

    #[test]
    fn test_widget_count_and_find() {
        let section = two_column_section();
        assert_eq!(section.widget_count(), 3);

        let button_id = section.columns[1].widgets[0].id.clone();
        let (column, widget) = section.find_widget(&button_id).unwrap();
        assert_eq!(column, 1);
        assert_eq!(widget.kind, ElementKind::Button);
        assert!(section.find_widget("missing").is_none());
    }

    #[test]
    fn test_element_conversion_round_trip() {
        let section = two_column_section();
        let element = section.clone().into_element();
        assert_eq!(element.kind, ElementKind::Section);
        assert_eq!(element.children.len(), 2);
        assert!(element.children.iter().all(|c| c.kind == ElementKind::Column));

        let back = Section::try_from_element(&element).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_column_rejects_containers() {
        let mut column = Column::new();
        let result = column.push_widget(Element::new(ElementKind::Container));
        assert!(matches!(result, Err(LayoutError::NestedContainer { .. })));
        assert!(column.widgets.is_empty());
    }

    #[test]
    fn test_widget_directly_in_section_rejected() {
        let mut element = Section::new().into_element();
        element.children.push(Element::new(ElementKind::Button));

        let result = Section::try_from_element(&element);
        assert!(matches!(result, Err(LayoutError::NotAColumn { kind: "button", .. })));
    }

    #[test]
    fn test_tree_requires_sections() {
        let tree = vec![two_column_section().into_element(), Element::new(ElementKind::Text)];
        let result = sections_from_tree(&tree);
        assert!(matches!(result, Err(LayoutError::NotASection { kind: "text", .. })));

        let tree = vec![two_column_section().into_element()];
        assert_eq!(sections_from_tree(&tree).unwrap().len(), 1);
    }
}
