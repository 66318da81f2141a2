//! Tailwind CSS page export.
//!
//! Style properties map onto a small set of utility classes. Values without
//! a mapping fall back to a middle size or gray.

use crate::markup::escape_html;
use playground_core::style::camel_case;
use playground_core::{Element, ElementKind, StyleMap, StyleValue};

const SIZE_SCALE: &[(&str, &str)] = &[
    ("8px", "2"),
    ("12px", "3"),
    ("16px", "4"),
    ("20px", "5"),
    ("24px", "6"),
];

const COLOR_SCALE: &[(&str, &str)] = &[
    ("#007bff", "blue-500"),
    ("#28a745", "green-500"),
    ("#dc3545", "red-500"),
    ("#ffc107", "yellow-500"),
    ("#6c757d", "gray-500"),
];

const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "thin"),
    ("200", "extralight"),
    ("300", "light"),
    ("400", "normal"),
    ("500", "medium"),
    ("600", "semibold"),
    ("700", "bold"),
    ("800", "extrabold"),
    ("900", "black"),
];

const INDENT: &str = "        ";

fn lookup(table: &[(&str, &'static str)], value: &str, fallback: &'static str) -> &'static str {
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(value))
        .map_or(fallback, |&(_, class)| class)
}

fn value_text(value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Text(s) if !s.is_empty() => Some(s.trim().to_string()),
        StyleValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map a style onto utility classes, in style order.
pub fn utility_classes(style: &StyleMap) -> String {
    style
        .iter()
        .filter_map(|(key, value)| {
            let value = value_text(value)?;
            let class = match camel_case(key).as_str() {
                "padding" => format!("p-{}", lookup(SIZE_SCALE, &value, "4")),
                "margin" => format!("m-{}", lookup(SIZE_SCALE, &value, "4")),
                "backgroundColor" => format!("bg-{}", lookup(COLOR_SCALE, &value, "gray-500")),
                "color" => format!("text-{}", lookup(COLOR_SCALE, &value, "gray-500")),
                "fontSize" => format!("text-{}", lookup(SIZE_SCALE, &value, "4")),
                "fontWeight" => format!("font-{}", weight_name(&value)),
                _ => return None,
            };
            Some(class)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword weights (`bold`, `light`) pass through; numbers use the named scale.
fn weight_name(value: &str) -> String {
    if value.chars().all(|c| c.is_ascii_digit()) {
        lookup(FONT_WEIGHTS, value, "normal").to_string()
    } else {
        value.to_ascii_lowercase()
    }
}

fn render(elements: &[Element], indent: &str) -> String {
    if elements.is_empty() {
        return format!("{indent}<!-- No elements to display -->");
    }

    elements
        .iter()
        .map(|element| {
            let classes = utility_classes(&element.style);
            let text = |fallback: &str| {
                escape_html(if element.text.is_empty() { fallback } else { element.text.as_str() })
            };
            match element.kind {
                ElementKind::Text => format!("{indent}<div class=\"{classes}\">{}</div>", text("Text")),
                ElementKind::Button => format!(
                    "{indent}<button class=\"{classes} bg-blue-500 hover:bg-blue-600 text-white font-medium py-2 px-4 rounded\">{}</button>",
                    text("Button")
                ),
                ElementKind::Card => format!(
                    "{indent}<div class=\"{classes} bg-white rounded-lg shadow-md p-6\">{}</div>",
                    text("Card Content")
                ),
                kind if kind.is_container() && !element.children.is_empty() => format!(
                    "{indent}<div class=\"{classes}\">\n{}\n{indent}</div>",
                    render(&element.children, &format!("{indent}  "))
                ),
                _ => format!("{indent}<div class=\"{classes}\">{}</div>", text("Element")),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a page styled with the Tailwind CDN build.
pub fn generate(elements: &[Element]) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    <title>Tailwind Design</title>\n    <script src=\"https://cdn.tailwindcss.com\"></script>\n</head>\n<body class=\"bg-gray-50 min-h-screen p-8\">\n    <div class=\"max-w-6xl mx-auto bg-white rounded-lg shadow-sm p-6\">\n{}\n    </div>\n</body>\n</html>",
        render(elements, INDENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::style::style_map;

    #[test]
    fn test_utility_classes() {
        let style = style_map(&[
            ("padding", "12px"),
            ("margin", "13px"),
            ("background-color", "#007BFF"),
            ("color", "purple"),
            ("fontSize", "24px"),
            ("border", "none"),
        ]);
        assert_eq!(utility_classes(&style), "p-3 m-4 bg-blue-500 text-gray-500 text-6");
    }

    #[test]
    fn test_font_weights() {
        assert_eq!(utility_classes(&style_map(&[("fontWeight", "bold")])), "font-bold");
        assert_eq!(utility_classes(&style_map(&[("fontWeight", "600")])), "font-semibold");
        let mut style = StyleMap::new();
        style.insert("fontWeight".into(), StyleValue::from(300_i64));
        assert_eq!(utility_classes(&style), "font-light");
    }

    #[test]
    fn test_page() {
        let mut button = Element::new(ElementKind::Button);
        button.text = "Buy".into();
        let page = generate(&[button]);

        assert!(page.contains("<script src=\"https://cdn.tailwindcss.com\"></script>"));
        assert!(page.contains(
            "        <button class=\"p-4 bg-blue-500 text-gray-500 text-4 bg-blue-500 hover:bg-blue-600 text-white font-medium py-2 px-4 rounded\">Buy</button>"
        ));
    }

    #[test]
    fn test_nested_and_empty() {
        let mut section = Element::new(ElementKind::Section);
        let mut text = Element::new(ElementKind::Text);
        text.style.clear();
        section.children.push(text);

        let page = generate(&[section]);
        assert!(page.contains("          <div class=\"\">Sample text</div>"));
        assert!(generate(&[]).contains("<!-- No elements to display -->"));
    }
}
