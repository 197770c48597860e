//! Morph — a format-aware file converter.
//!
//! `morph report.docx` asks interactively which format to produce;
//! `morph report.docx --to pdf` converts straight away.

mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use morph_core::{
    choose_target, supported_targets, Config, ConvertError, Dispatcher, SofficeBackend,
};

use crate::prompt::SelectPrompt;

#[derive(Debug, Parser)]
#[command(name = "morph", version, about = "Convert files between document, spreadsheet, presentation and image formats")]
struct Cli {
    /// Source file to convert.
    source: PathBuf,

    /// Target extension (e.g. "pdf"). Prompts interactively when omitted.
    #[arg(long, short = 't')]
    to: Option<String>,

    /// List the supported target formats for the source file and exit.
    #[arg(long, conflicts_with = "to")]
    list: bool,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.list {
        return list_targets(&cli.source);
    }

    let target_ext = match &cli.to {
        Some(ext) => ext.clone(),
        None => match choose_target(&cli.source, &mut SelectPrompt)? {
            Some(target) => target.extension.to_string(),
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    let mut dispatcher = Dispatcher::new(Box::new(SofficeBackend::new(
        config.backend.to_soffice(),
    )));
    if !config.output.overwrite {
        dispatcher = dispatcher.refuse_overwrite();
    }

    match dispatcher.convert(&cli.source, &target_ext) {
        Ok(path) => {
            println!("Converted: {}", path.display());
            Ok(())
        }
        Err(e @ ConvertError::UnsupportedFormat(_)) => {
            eprintln!("{e}");
            eprintln!("Run with --list to see the supported targets for this file.");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

fn list_targets(source: &PathBuf) -> anyhow::Result<()> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let targets = supported_targets(ext);
    if targets.is_empty() {
        println!("No supported target formats for {}", source.display());
        return Ok(());
    }
    for target in targets {
        println!("{}\t{}", target.extension, target.display_name);
    }
    Ok(())
}
