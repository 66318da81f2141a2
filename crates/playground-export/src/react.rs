//! React component export.

use crate::css::{Methodology, element_rules};
use crate::markup::{Dialect, render_elements};
use crate::component_name;
use playground_core::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct ReactOptions {
    /// Function component (`true`) or class component.
    pub functional_component: bool,
    pub use_typescript: bool,
    /// Generate the companion stylesheet.
    pub include_css: bool,
    pub component_name: String,
}

impl Default for ReactOptions {
    fn default() -> Self {
        Self {
            functional_component: true,
            use_typescript: false,
            include_css: true,
            component_name: "ExportedComponent".to_string(),
        }
    }
}

/// A generated component with its stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactExport {
    pub component: String,
    /// Empty when `include_css` is off.
    pub css: String,
    /// `<Name>.jsx` or `<Name>.tsx`.
    pub file_name: String,
}

impl ReactExport {
    pub fn css_file_name(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.css"),
            None => format!("{}.css", self.file_name),
        }
    }
}

pub fn generate(elements: &[Element], options: &ReactOptions) -> ReactExport {
    let name = component_name(&options.component_name);
    let container = format!("{}-container", name.to_lowercase());
    let imports = format!("import React from 'react';\nimport './{name}.css';");

    let component = if options.functional_component {
        let body = render_elements(elements, Dialect::Jsx, "      ");
        let signature = if options.use_typescript {
            format!("const {name}: React.FC = () => {{")
        } else {
            format!("const {name} = () => {{")
        };
        format!(
            "{imports}\n\n{signature}\n  return (\n    <div className=\"{container}\">\n{body}\n    </div>\n  );\n}};\n\nexport default {name};"
        )
    } else {
        let body = render_elements(elements, Dialect::Jsx, "        ");
        format!(
            "{imports}\n\nclass {name} extends React.Component {{\n  render() {{\n    return (\n      <div className=\"{container}\">\n{body}\n      </div>\n    );\n  }}\n}}\n\nexport default {name};"
        )
    };

    let css = if options.include_css {
        format!(
            ".{container} {{\n  max-width: 1200px;\n  margin: 0 auto;\n  padding: 20px;\n  background: white;\n  border-radius: 8px;\n  box-shadow: 0 2px 10px rgba(0,0,0,0.1);\n}}\n\n{}",
            element_rules(elements, Methodology::Bem)
        )
    } else {
        String::new()
    };

    let extension = if options.use_typescript { "tsx" } else { "jsx" };
    ReactExport {
        component,
        css,
        file_name: format!("{name}.{extension}"),
    }
}
