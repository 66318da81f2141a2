//! Design Playground Export
//!
//! Code generators for element trees. Every generator is a pure function of
//! the elements and its options.

pub mod css;
pub mod html;
pub mod json;
pub mod markup;
pub mod react;
pub mod tailwind;
pub mod vue;

pub use css::{CssOptions, Methodology};
pub use html::{CssOutput, HtmlOptions};
pub use json::JsonOptions;
pub use react::{ReactExport, ReactOptions};
pub use vue::VueOptions;

use playground_core::Element;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format '{0}' (expected one of: html, react, vue, css, tailwind, json)")]
    UnknownFormat(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Html,
    React,
    Vue,
    Css,
    Tailwind,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::React => "react",
            ExportFormat::Vue => "vue",
            ExportFormat::Css => "css",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Json => "json",
        }
    }

    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Html,
            ExportFormat::React,
            ExportFormat::Vue,
            ExportFormat::Css,
            ExportFormat::Tailwind,
            ExportFormat::Json,
        ]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::all()
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}

/// Options for every generator, used by [`export`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub html: HtmlOptions,
    pub react: ReactOptions,
    pub vue: VueOptions,
    pub css: CssOptions,
    pub json: JsonOptions,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    pub contents: String,
}

impl ExportFile {
    fn new(name: impl Into<String>, contents: String) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }
}

/// The output of one export: the main file plus any companion files.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: ExportFormat,
    /// The main file comes first.
    pub files: Vec<ExportFile>,
}

impl Artifact {
    /// Name of the main file.
    pub fn file_name(&self) -> &str {
        self.files.first().map_or("", |file| file.name.as_str())
    }

    /// Contents of the main file.
    pub fn code(&self) -> &str {
        self.files.first().map_or("", |file| file.contents.as_str())
    }
}

/// Size statistics of generated code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeStats {
    pub lines: usize,
    /// Size in KiB, rounded to two decimals.
    pub size_kb: f64,
    /// Number of top-level elements exported.
    pub elements: usize,
}

impl CodeStats {
    pub fn measure(code: &str, elements: &[Element]) -> Self {
        let size_kb = (code.len() as f64 / 1024.0 * 100.0).round() / 100.0;
        Self {
            lines: code.split('\n').count(),
            size_kb,
            elements: elements.len(),
        }
    }
}

impl fmt::Display for CodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {:.2} KB, {} elements",
            self.lines, self.size_kb, self.elements
        )
    }
}

/// Normalize a component name to PascalCase identifier characters.
///
/// Falls back to `ExportedComponent` when nothing usable remains.
pub fn component_name(name: &str) -> String {
    let pascal: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if pascal.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        pascal
    } else {
        "ExportedComponent".to_string()
    }
}

/// Run the generator for `format`.
pub fn export(
    format: ExportFormat,
    elements: &[Element],
    options: &ExportOptions,
) -> Result<Artifact, ExportError> {
    log::debug!("Exporting {} elements as {}", elements.len(), format);

    let files = match format {
        ExportFormat::Html => {
            let mut files = vec![ExportFile::new(
                "design-export.html",
                html::generate(elements, &options.html),
            )];
            if options.html.include_container && options.html.css_output == CssOutput::External {
                files.push(ExportFile::new(
                    "styles.css",
                    html::stylesheet(elements, &options.html),
                ));
            }
            files
        }
        ExportFormat::React => {
            let generated = react::generate(elements, &options.react);
            let css_file_name = generated.css_file_name();
            let mut files = vec![ExportFile::new(generated.file_name, generated.component)];
            if !generated.css.is_empty() {
                files.push(ExportFile::new(css_file_name, generated.css));
            }
            files
        }
        ExportFormat::Vue => vec![ExportFile::new(
            format!("{}.vue", component_name(&options.vue.component_name)),
            vue::generate(elements, &options.vue),
        )],
        ExportFormat::Css => vec![ExportFile::new(
            "design-export.css",
            css::generate(elements, &options.css),
        )],
        ExportFormat::Tailwind => vec![ExportFile::new(
            "design-export-tailwind.html",
            tailwind::generate(elements),
        )],
        ExportFormat::Json => vec![ExportFile::new(
            "design-export.json",
            json::generate(elements, &options.json)?,
        )],
    };

    Ok(Artifact { format, files })
}
