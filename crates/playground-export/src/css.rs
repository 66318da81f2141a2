//! Stylesheet export.

use crate::markup::child_path;
use playground_core::Element;
use playground_core::style::{class_name, normalize_style_map};

/// Class naming scheme for generated rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Methodology {
    /// `.element-N`, nested `.element-N-M`.
    #[default]
    Bem,
    /// `.comp-N`, nested `.comp-N-M`.
    Component,
}

impl Methodology {
    fn base_class(self) -> &'static str {
        match self {
            Methodology::Bem => "element",
            Methodology::Component => "comp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssOptions {
    pub include_reset: bool,
    pub responsive: bool,
    pub methodology: Methodology,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            include_reset: true,
            responsive: true,
            methodology: Methodology::Bem,
        }
    }
}

const RESET: &str = "/* CSS Reset */
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.6;
  color: #333;
  background: #f8f9fa;
}

";

const RESPONSIVE: &str = "
/* Responsive Design */
@media (max-width: 768px) {
  .container { padding: 10px; }
  .element { margin: 10px 0; }
}

@media (max-width: 480px) {
  .container { padding: 5px; }
}
";

/// Generate a stylesheet for the elements.
pub fn generate(elements: &[Element], options: &CssOptions) -> String {
    let mut css = String::new();
    if options.include_reset {
        css.push_str(RESET);
    }
    css.push_str("/* Design Elements */\n");
    css.push_str(&element_rules(elements, options.methodology));
    if options.responsive {
        css.push_str(RESPONSIVE);
    }
    css
}

/// Rules for every element with a non-empty style, nested elements included.
///
/// Classes follow the element's path in the tree, matching the classes the
/// markup generators emit.
pub fn element_rules(elements: &[Element], methodology: Methodology) -> String {
    let mut css = String::new();
    push_rules(&mut css, elements, "", methodology.base_class());
    css
}

fn push_rules(css: &mut String, elements: &[Element], parent: &str, prefix: &str) {
    for (index, element) in elements.iter().enumerate() {
        let path = child_path(parent, index);
        let declarations = normalize_style_map(&element.style);
        if !declarations.is_empty() {
            css.push_str(&format!(".{} {{\n", class_name(prefix, &path)));
            for (property, value) in &declarations {
                css.push_str(&format!("  {property}: {value};\n"));
            }
            css.push_str("}\n\n");
        }
        push_rules(css, &element.children, &path, prefix);
    }
}
