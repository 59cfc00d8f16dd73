//! Markpad - Main Entry Point
//!
//! Renders a Markdown file (or standard input) to HTML.

use clap::Parser;
use log::{debug, info};
use markpad::config::{load_config, load_config_from, save_config, save_config_to, Settings};
use markpad::error::{Error, Result};
use markpad::export::{copy_html_to_clipboard, generate_html_document};
use markpad::preview::{PreviewState, SAMPLE_DOCUMENT};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Application name constant.
const APP_NAME: &str = "markpad";

#[derive(Parser)]
#[command(name = APP_NAME, version)]
#[command(about = "Render Markdown to HTML for live preview")]
struct Cli {
    /// Input Markdown file (reads standard input when omitted)
    input: Option<PathBuf>,

    /// Output HTML file (writes to standard output when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the output in a complete HTML document
    #[arg(long)]
    standalone: bool,

    /// Document title for standalone output
    #[arg(long)]
    title: Option<String>,

    /// Mark headings with the high-contrast class
    #[arg(long)]
    contrast: bool,

    /// Print list and code diagnostics as JSON instead of HTML
    #[arg(long)]
    diagnostics: bool,

    /// Also copy the rendered HTML to the clipboard
    #[arg(long)]
    copy: bool,

    /// Render the built-in sample document instead of reading input
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the current configuration (defaults if none exists) and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => {
                save_config_to(path, &settings)?;
                path.clone()
            }
            None => save_config(&settings)?,
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let markdown = read_input(&cli)?;
    info!("Starting {} on {} bytes of input", APP_NAME, markdown.len());

    let mut state = PreviewState::from_settings(&settings).with_source(markdown);
    if cli.contrast && !state.contrast_enabled() {
        state.toggle_contrast();
    }

    if cli.diagnostics {
        let json = state.diagnostics().to_json()?;
        return write_output(cli.output.as_ref(), &json);
    }

    let body = state.render().to_string();

    if cli.copy {
        copy_html_to_clipboard(&body)?;
        info!("Copied rendered HTML to clipboard");
    }

    let html = if cli.standalone || settings.standalone {
        let title = document_title(&cli, &settings);
        generate_html_document(&body, Some(&title))
    } else {
        body
    };

    write_output(cli.output.as_ref(), &html)
}

/// Read the document from the input file, the sample, or standard input.
fn read_input(cli: &Cli) -> Result<String> {
    if cli.sample {
        return Ok(SAMPLE_DOCUMENT.to_string());
    }
    match &cli.input {
        Some(path) => {
            debug!("Reading {}", path.display());
            fs::read_to_string(path).map_err(|e| Error::from_read(Some(path.clone()), e))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::from_read(None, e))?;
            Ok(buffer)
        }
    }
}

/// `--title`, else the input file name, else the configured title.
fn document_title(cli: &Cli, settings: &Settings) -> String {
    cli.title
        .clone()
        .or_else(|| {
            cli.input
                .as_ref()
                .and_then(|p| p.file_stem())
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| settings.title.clone())
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
