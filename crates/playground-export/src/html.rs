//! Standalone HTML page export.

use crate::css;
use crate::markup::{Dialect, child_path, escape_html, minify_html, render_elements};
use playground_core::Element;
use playground_core::style::{class_name, to_css_string};

/// Where element CSS goes in an HTML export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssOutput {
    /// A `<style>` block in the page head.
    #[default]
    Inline,
    /// A linked `styles.css` file.
    External,
}

/// HTML export options.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Wrap the elements in a full page. When false only the element markup
    /// is produced.
    pub include_container: bool,
    pub css_output: CssOutput,
    pub include_meta: bool,
    pub include_reset: bool,
    pub responsive: bool,
    pub minify: bool,
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            include_container: true,
            css_output: CssOutput::Inline,
            include_meta: true,
            include_reset: true,
            responsive: true,
            minify: false,
            title: "Exported Design".to_string(),
        }
    }
}

const ELEMENT_INDENT: &str = "        ";

/// Generate an HTML page for the elements.
pub fn generate(elements: &[Element], options: &HtmlOptions) -> String {
    let body = render_elements(elements, Dialect::Html, ELEMENT_INDENT);

    let html = if !options.include_container {
        body
    } else {
        let meta = if options.include_meta {
            format!(
                "\n    <meta charset=\"UTF-8\">\
                 \n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
                 \n    <meta name=\"generator\" content=\"Design Playground\">\
                 \n    <title>{}</title>",
                escape_html(&options.title)
            )
        } else {
            String::new()
        };

        let head_styles = match options.css_output {
            CssOutput::External => "\n    <link rel=\"stylesheet\" href=\"styles.css\">".to_string(),
            CssOutput::Inline => format!("\n    <style>\n{}    </style>", page_styles(elements, options)),
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>{meta}{head_styles}\n</head>\n<body>\n    <div class=\"container\">\n{body}\n    </div>\n</body>\n</html>"
        )
    };

    if options.minify { minify_html(&html) } else { html }
}

/// The stylesheet linked by an external-CSS export.
pub fn stylesheet(elements: &[Element], options: &HtmlOptions) -> String {
    let css_options = css::CssOptions {
        include_reset: options.include_reset,
        responsive: options.responsive,
        ..css::CssOptions::default()
    };
    css::generate(elements, &css_options)
}

fn page_styles(elements: &[Element], options: &HtmlOptions) -> String {
    let mut css = String::new();
    if options.include_reset {
        css.push_str(
            "        * {\n            margin: 0;\n            padding: 0;\n            box-sizing: border-box;\n        }\n",
        );
    }
    css.push_str(
        "        body {\n            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;\n            background: #f8f9fa;\n            line-height: 1.6;\n            color: #333;\n        }\n",
    );
    css.push_str(
        "        .container {\n            max-width: 1200px;\n            margin: 0 auto;\n            padding: 20px;\n            background: white;\n            border-radius: 8px;\n            box-shadow: 0 2px 10px rgba(0,0,0,0.1);\n        }\n",
    );
    if options.responsive {
        css.push_str(
            "        @media (max-width: 768px) {\n            .container {\n                padding: 10px;\n            }\n        }\n",
        );
    }
    css.push_str(&element_rules(elements));
    css
}

/// One rule per element with a non-empty style, keyed by its tree path.
fn element_rules(elements: &[Element]) -> String {
    let mut css = String::new();
    push_rules(&mut css, elements, "");
    css
}

fn push_rules(css: &mut String, elements: &[Element], parent: &str) {
    for (index, element) in elements.iter().enumerate() {
        let path = child_path(parent, index);
        let declarations = to_css_string(&element.style);
        if !declarations.is_empty() {
            css.push_str(&format!("        .{} {{ {declarations} }}\n", class_name("element", &path)));
        }
        push_rules(css, &element.children, &path);
    }
}
