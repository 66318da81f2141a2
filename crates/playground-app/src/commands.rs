//! Command implementations, kept apart from argument parsing so they can be
//! driven from tests.

use anyhow::{Context, Result};
use playground_core::shortcuts::ShortcutRegistry;
use playground_core::{Canvas, CanvasConfig, CanvasDocument, FileStorage};
use playground_export::{Artifact, CodeStats, CssOutput, ExportFormat, ExportOptions, export};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load a design file (a canvas document or a bare element array).
pub fn load_design(path: &Path) -> Result<Canvas> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read design file {}", path.display()))?;
    let document = CanvasDocument::from_json(&json)
        .with_context(|| format!("Invalid design file {}", path.display()))?;
    log::info!(
        "Loaded {} elements from {}",
        document.elements.len(),
        path.display()
    );
    Ok(Canvas::with_document(document, CanvasConfig::default()))
}

/// Load the design saved in the local store.
pub fn load_stored_design() -> Result<Canvas> {
    let storage = FileStorage::default_location().context("Failed to open local store")?;
    log::info!("Using local store at {}", storage.base_path().display());
    Ok(Canvas::load(Arc::new(storage), CanvasConfig::default()))
}

/// Load from `path`, or from the local store when no path is given.
pub fn open(path: Option<&Path>) -> Result<Canvas> {
    match path {
        Some(path) => load_design(path),
        None => load_stored_design(),
    }
}

/// Export settings collected from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub component_name: Option<String>,
    pub minify: bool,
    pub typescript: bool,
    pub external_css: bool,
}

impl ExportRequest {
    pub fn options(&self) -> ExportOptions {
        let mut options = ExportOptions::default();
        if let Some(name) = &self.component_name {
            options.react.component_name = name.clone();
            options.vue.component_name = name.clone();
            options.html.title = name.clone();
        }
        options.html.minify = self.minify;
        if self.external_css {
            options.html.css_output = CssOutput::External;
        }
        options.react.use_typescript = self.typescript;
        options.vue.use_typescript = self.typescript;
        options
    }

    pub fn run(&self, canvas: &Canvas) -> Result<Artifact> {
        export(self.format, canvas.elements(), &self.options())
            .with_context(|| format!("Failed to generate {} export", self.format))
    }
}

/// Write every file of an artifact into `dir`, creating it if needed.
pub fn write_artifact(artifact: &Artifact, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifact.files.len());
    for file in &artifact.files {
        let path = dir.join(&file.name);
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Exported {} to {}", artifact.format, path.display());
        written.push(path);
    }
    Ok(written)
}

/// Write a statistics report for one export format.
pub fn write_stats(out: &mut impl Write, canvas: &Canvas, artifact: &Artifact) -> io::Result<()> {
    let stats = CodeStats::measure(artifact.code(), canvas.elements());
    writeln!(out, "Format:    {}", artifact.format)?;
    writeln!(out, "File:      {}", artifact.file_name())?;
    writeln!(out, "Code:      {}", stats)?;
    writeln!(
        out,
        "Canvas:    {} top-level, {} sections, {} total",
        canvas.total_elements(),
        canvas.total_sections(),
        canvas.len()
    )
}

/// Print all keyboard shortcuts.
pub fn write_shortcuts(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "=== Keyboard Shortcuts ===")?;
    for shortcut in ShortcutRegistry::all() {
        writeln!(out, "  {:20} {}", shortcut.format(), shortcut.description)?;
    }
    Ok(())
}

/// Write a design file holding the welcome layout.
pub fn write_sample(path: &Path) -> Result<()> {
    let mut canvas = Canvas::new();
    canvas.add_sample_layout();
    let json = canvas.export_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote sample design to {}", path.display());
    Ok(())
}
