use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use phaseui_compiler::{compile_to_qt, GeneratorConfig, PhaseUiError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phaseui")]
#[command(version, about = "Generate the Qt PhaseController header from a GROUP-annotated proto schema", long_about = None)]
struct Cli {
    /// Input `.proto` schema; the header is written to stdout
    proto: PathBuf,
}

fn main() -> Result<(), PhaseUiError> {
    // stdout carries the generated header, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.proto).map_err(PhaseUiError::Io)?;
    info!(path = %cli.proto.display(), bytes = text.len(), "read schema");

    let header = compile_to_qt(&text, &GeneratorConfig::default())?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(header.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
