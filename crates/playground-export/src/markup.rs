//! Element markup shared by the HTML, React and Vue generators.

use playground_core::style::{class_name, to_css_string, to_script_style_map};
use playground_core::{Element, ElementKind, StyleMap};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Collapse whitespace runs and remove whitespace between tags.
pub fn minify_html(html: &str) -> String {
    html.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("> <", "><")
}

/// Template dialect of the generated markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Html,
    Jsx,
    Vue,
}

impl Dialect {
    fn class_attr(self) -> &'static str {
        match self {
            Dialect::Jsx => "className",
            Dialect::Html | Dialect::Vue => "class",
        }
    }

    pub(crate) fn comment(self, text: &str) -> String {
        match self {
            Dialect::Jsx => format!("{{/* {text} */}}"),
            Dialect::Html | Dialect::Vue => format!("<!-- {text} -->"),
        }
    }

    fn style_attr(self, style: &StyleMap) -> String {
        match self {
            Dialect::Html => format!("style=\"{}\"", escape_html(&to_css_string(style))),
            Dialect::Jsx => format!("style={{{}}}", script_object(style)),
            Dialect::Vue => format!(":style='{}'", script_object(style).replace('\'', "&#39;")),
        }
    }

    /// Escape element text content. Braces would start an expression in JSX
    /// and an interpolation in Vue templates.
    fn text(self, text: &str) -> String {
        let escaped = escape_html(text);
        match self {
            Dialect::Html => escaped,
            Dialect::Jsx | Dialect::Vue => escaped.replace('{', "&#123;").replace('}', "&#125;"),
        }
    }

    fn value_attr(self, value: &str) -> String {
        match self {
            Dialect::Jsx => format!("defaultValue=\"{}\"", escape_html(value)),
            Dialect::Html | Dialect::Vue => format!("value=\"{}\"", escape_html(value)),
        }
    }

    fn rows_attr(self, rows: u32) -> String {
        match self {
            Dialect::Jsx => format!("rows={{{rows}}}"),
            Dialect::Html | Dialect::Vue => format!("rows=\"{rows}\""),
        }
    }
}

/// Serialize a style map as a script object literal with camelCase keys.
pub(crate) fn script_object(style: &StyleMap) -> String {
    serde_json::to_string(&to_script_style_map(style)).unwrap_or_else(|_| String::from("{}"))
}

/// Position of an element in the tree: sibling indices from the root,
/// joined by `-` (`0`, `0-2`, `0-2-1`).
pub(crate) fn child_path(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        index.to_string()
    } else {
        format!("{parent}-{index}")
    }
}

/// Render a list of top-level elements, one per line.
pub(crate) fn render_elements(elements: &[Element], dialect: Dialect, indent: &str) -> String {
    if elements.is_empty() {
        return format!("{indent}{}", dialect.comment("No elements to display"));
    }
    render_siblings(elements, "", dialect, indent)
}

fn render_siblings(elements: &[Element], parent: &str, dialect: Dialect, indent: &str) -> String {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| render_element(element, &child_path(parent, index), dialect, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_element(element: &Element, path: &str, dialect: Dialect, indent: &str) -> String {
    let class = format!(
        "{}=\"{} {}\"",
        dialect.class_attr(),
        class_name("element", path),
        element.kind.as_str()
    );
    let style = dialect.style_attr(&element.style);
    let props = &element.properties;
    let text_or = |fallback: &str| {
        let text = if element.text.is_empty() { fallback } else { element.text.as_str() };
        dialect.text(text)
    };
    let placeholder = escape_html(props.placeholder.as_deref().unwrap_or("Enter text..."));

    match element.kind {
        ElementKind::Button => {
            format!("{indent}<button {class} {style}>{}</button>", text_or("Button"))
        }
        ElementKind::Heading => format!("{indent}<h2 {class} {style}>{}</h2>", text_or("Heading")),
        ElementKind::Image => format!(
            "{indent}<img {class} src=\"{}\" {style} alt=\"{}\" />",
            escape_html(props.src.as_deref().unwrap_or("/placeholder.jpg")),
            escape_html(props.alt.as_deref().unwrap_or("Image")),
        ),
        ElementKind::Input => format!(
            "{indent}<input {class} type=\"{}\" {style} placeholder=\"{placeholder}\" {} />",
            escape_html(props.input_type.as_deref().unwrap_or("text")),
            dialect.value_attr(&element.text),
        ),
        ElementKind::Textarea => format!(
            "{indent}<textarea {class} {style} placeholder=\"{placeholder}\" {}>{}</textarea>",
            dialect.rows_attr(props.rows.unwrap_or(4)),
            dialect.text(&element.text),
        ),
        ElementKind::Select => {
            let defaults = ["Option 1".to_string(), "Option 2".to_string()];
            let options = props.options.as_deref().unwrap_or(&defaults);
            let options = options
                .iter()
                .map(|option| {
                    format!(
                        "{indent}  <option value=\"{}\">{}</option>",
                        escape_html(&option.to_lowercase()),
                        dialect.text(option)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{indent}<select {class} {style}>\n{options}\n{indent}</select>")
        }
        ElementKind::Card => format!(
            "{indent}<div {class} {style}>\n{indent}  <div {}=\"card-content\">{}</div>\n{indent}</div>",
            dialect.class_attr(),
            text_or("Card Content"),
        ),
        ElementKind::Link => format!(
            "{indent}<a {class} href=\"{}\" {style}>{}</a>",
            escape_html(props.href.as_deref().unwrap_or("#")),
            text_or("Link"),
        ),
        ElementKind::Divider => format!("{indent}<hr {class} {style} />"),
        kind if kind.is_container() => {
            let child_indent = format!("{indent}  ");
            let children = if element.children.is_empty() {
                format!("{child_indent}{}", dialect.comment("Empty container"))
            } else {
                render_siblings(&element.children, path, dialect, &child_indent)
            };
            format!("{indent}<div {class} {style}>\n{children}\n{indent}</div>")
        }
        kind => format!("{indent}<div {class} {style}>{}</div>", text_or(kind.display_name())),
    }
}
