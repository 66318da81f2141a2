//! Design JSON export.

use playground_core::Element;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct JsonOptions {
    pub include_metadata: bool,
    pub pretty_print: bool,
    /// Export timestamp recorded in the metadata. Left out when `None`, so
    /// the same design always produces the same output.
    pub exported_at: Option<String>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            include_metadata: true,
            pretty_print: true,
            exported_at: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<&'a str>,
    generator: &'static str,
    element_count: usize,
}

#[derive(Serialize)]
struct ExportData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata<'a>>,
    elements: &'a [Element],
}

pub fn generate(elements: &[Element], options: &JsonOptions) -> Result<String, serde_json::Error> {
    let data = ExportData {
        metadata: options.include_metadata.then(|| Metadata {
            version: "1.0",
            exported_at: options.exported_at.as_deref(),
            generator: "Design Playground",
            element_count: elements.len(),
        }),
        elements,
    };

    if options.pretty_print {
        serde_json::to_string_pretty(&data)
    } else {
        serde_json::to_string(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::ElementKind;
    use serde_json::Value;

    #[test]
    fn test_metadata() {
        let elements = vec![Element::new(ElementKind::Text), Element::new(ElementKind::Button)];
        let options = JsonOptions {
            exported_at: Some("2026-01-01T00:00:00Z".into()),
            ..JsonOptions::default()
        };
        let value: Value = serde_json::from_str(&generate(&elements, &options).unwrap()).unwrap();

        assert_eq!(value["metadata"]["version"], "1.0");
        assert_eq!(value["metadata"]["exportedAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["metadata"]["elementCount"], 2);
        assert_eq!(value["elements"][1]["type"], "button");
    }

    #[test]
    fn test_deterministic_without_timestamp() {
        let elements = vec![Element::new(ElementKind::Heading)];
        let first = generate(&elements, &JsonOptions::default()).unwrap();
        let second = generate(&elements, &JsonOptions::default()).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains("exportedAt"));
    }

    #[test]
    fn test_compact_without_metadata() {
        let options = JsonOptions {
            include_metadata: false,
            pretty_print: false,
            exported_at: None,
        };
        assert_eq!(generate(&[], &options).unwrap(), r#"{"elements":[]}"#);
    }

    #[test]
    fn test_output_loads_as_elements() {
        let elements = vec![Element::new(ElementKind::Card)];
        let json = generate(&elements, &JsonOptions::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let back: Vec<Element> = serde_json::from_value(value["elements"].clone()).unwrap();
        assert_eq!(back, elements);
    }
}
