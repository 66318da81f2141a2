//! Vue single-file component export.

use crate::component_name;
use crate::css::{Methodology, element_rules};
use crate::markup::{Dialect, render_elements};
use playground_core::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct VueOptions {
    /// Use `<script setup>`.
    pub script_setup: bool,
    pub use_typescript: bool,
    /// Use `defineComponent` when not in script-setup mode.
    pub composition_api: bool,
    pub component_name: String,
}

impl Default for VueOptions {
    fn default() -> Self {
        Self {
            script_setup: true,
            use_typescript: false,
            composition_api: true,
            component_name: "ExportedComponent".to_string(),
        }
    }
}

pub fn generate(elements: &[Element], options: &VueOptions) -> String {
    let name = component_name(&options.component_name);
    let container = format!("{}-container", name.to_lowercase());
    let template = render_elements(elements, Dialect::Vue, "    ");
    let lang = if options.use_typescript { " lang=\"ts\"" } else { "" };

    let script = if options.script_setup {
        format!("<script setup{lang}>\n// Composition API with script setup\n</script>")
    } else if options.composition_api {
        format!(
            "<script{lang}>\nimport {{ defineComponent }} from 'vue'\n\nexport default defineComponent({{\n  name: '{name}'\n}})\n</script>"
        )
    } else {
        format!("<script{lang}>\nexport default {{\n  name: '{name}'\n}}\n</script>")
    };

    format!(
        "<template>\n  <div class=\"{container}\">\n{template}\n  </div>\n</template>\n\n{script}\n\n<style scoped>\n.{container} {{\n  max-width: 1200px;\n  margin: 0 auto;\n  padding: 20px;\n  background: white;\n  border-radius: 8px;\n}}\n{}</style>",
        element_rules(elements, Methodology::Bem)
    )
}
