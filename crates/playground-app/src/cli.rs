//! Command line arguments.

use crate::commands::{self, ExportRequest};
use anyhow::Result;
use clap::{Parser, Subcommand};
use playground_export::ExportFormat;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playground")]
#[command(about = "Export and inspect design playground documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate code from a design
    Export {
        /// Design file (reads the local store if not provided)
        design: Option<PathBuf>,

        /// Output format: html, react, vue, css, tailwind, json
        #[arg(long, short, default_value_t = ExportFormat::Html)]
        format: ExportFormat,

        /// Output directory (prints the main file to stdout if not provided)
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Component name for React/Vue, page title for HTML
        #[arg(long)]
        component_name: Option<String>,

        /// Minify HTML output
        #[arg(long)]
        minify: bool,

        /// Emit TypeScript components
        #[arg(long)]
        typescript: bool,

        /// Link an external stylesheet from HTML output
        #[arg(long)]
        external_css: bool,
    },

    /// Show code statistics for an export
    Stats {
        /// Design file (reads the local store if not provided)
        design: Option<PathBuf>,

        #[arg(long, short, default_value_t = ExportFormat::Html)]
        format: ExportFormat,
    },

    /// Write a sample design file
    Sample {
        /// Where to write the design
        #[arg(default_value = "design.json")]
        path: PathBuf,
    },

    /// List keyboard shortcuts
    Shortcuts,
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Export {
            design,
            format,
            out: out_dir,
            component_name,
            minify,
            typescript,
            external_css,
        } => {
            let canvas = commands::open(design.as_deref())?;
            let request = ExportRequest {
                format,
                component_name,
                minify,
                typescript,
                external_css,
            };
            let artifact = request.run(&canvas)?;

            match out_dir {
                Some(dir) => {
                    for path in commands::write_artifact(&artifact, &dir)? {
                        writeln!(out, "{}", path.display())?;
                    }
                }
                None => {
                    writeln!(out, "{}", artifact.code())?;
                    for extra in artifact.files.iter().skip(1) {
                        log::warn!("Companion file {} not written, use --out", extra.name);
                    }
                }
            }
        }
        Command::Stats { design, format } => {
            let canvas = commands::open(design.as_deref())?;
            let artifact = ExportRequest {
                format,
                ..ExportRequest::default()
            }
            .run(&canvas)?;
            commands::write_stats(&mut out, &canvas, &artifact)?;
        }
        Command::Sample { path } => {
            commands::write_sample(&path)?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Shortcuts => commands::write_shortcuts(&mut out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "playground",
            "export",
            "design.json",
            "--format",
            "react",
            "--component-name",
            "Hero",
            "--typescript",
        ])
        .unwrap();

        match cli.command {
            Command::Export {
                design,
                format,
                component_name,
                typescript,
                minify,
                ..
            } => {
                assert_eq!(design, Some(PathBuf::from("design.json")));
                assert_eq!(format, ExportFormat::React);
                assert_eq!(component_name.as_deref(), Some("Hero"));
                assert!(typescript);
                assert!(!minify);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Cli::try_parse_from(["playground", "stats", "--format", "svg"]);
        assert!(result.is_err());
    }
}
