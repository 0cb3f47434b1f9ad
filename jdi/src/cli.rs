///
/// This module implements the CLI interface for jdi: command parsing, config
/// resolution and user-visible output.
///
/// All transform logic lives in the [`jdi-core`] crate. This module is glue only.
///
/// ## Commands
/// - `jdi doc <FILES>...` writes `<file>.md` next to every file and prints
///   `wrote <bytes> bytes to <path>` for each.
/// - `jdi print <FILE>` streams the Markdown of one file to stdout.
///
/// ## How To Use
/// - For command-line users: use the installed `jdi` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`jdi-core`]: ../../jdi-core/
use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jdi_core::batch;
use jdi_core::document::{open_document, FileDocumenter};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// CLI for jdi: turn commented source files into Markdown documentation.
///
/// Files are passed to the `doc` subcommand (`jdi doc index.js test.js`)
/// rather than directly to `jdi`.
#[derive(Parser)]
#[clap(
    name = "jdi",
    version,
    about = "Generate literate Markdown documentation from commented source files"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write `<file>.md` next to every given source file (overwrites existing files)
    Doc {
        /// Source files, relative to the current directory
        #[clap(required = true)]
        files: Vec<PathBuf>,
        #[clap(flatten)]
        options: LanguageOptions,
    },
    /// Print the generated Markdown of a single file to stdout
    Print {
        /// Source file to render
        file: PathBuf,
        #[clap(flatten)]
        options: LanguageOptions,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LanguageOptions {
    /// Path to an optional YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Fence annotation for files without an extension (overrides config and env)
    #[clap(long)]
    pub language: Option<String>,
}

impl LanguageOptions {
    fn default_language(&self) -> Result<String> {
        let config = load_config(self.config.as_deref())?;
        Ok(self.language.clone().unwrap_or(config.default_language))
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Doc { files, options } => {
            let default_language = options.default_language()?;
            let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
            tracing::info!(command = "doc", files = files.len(), "Starting documentation run");

            let documenter = FileDocumenter::new(default_language);
            let report = batch::run(&cwd, &files, &documenter)
                .await
                .map_err(|e| {
                    tracing::error!(command = "doc", error = %e, "Documentation run failed");
                    anyhow::Error::new(e)
                })
                .context("Failed to document source files")?;

            for file in &report.files {
                println!(
                    "wrote {} bytes to {}",
                    file.bytes_written,
                    file.destination.display()
                );
            }
            tracing::info!(command = "doc", ?report, "Documentation run complete");
            Ok(())
        }
        Commands::Print { file, options } => {
            let default_language = options.default_language()?;
            tracing::info!(command = "print", file = %file.display(), "Printing document");
            tokio::task::spawn_blocking(move || print_document(&file, &default_language))
                .await
                .context("Print task failed")?
        }
    }
}

fn print_document(file: &Path, default_language: &str) -> Result<()> {
    let document = open_document(file, default_language)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in document {
        let line = line.with_context(|| format!("Failed to read {}", file.display()))?;
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
