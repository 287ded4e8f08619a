//! krandom CLI
//!
//! Streams Keccak sponge output to standard output until the reader
//! closes the pipe.

use clap::{error::ErrorKind, Parser};
use krandom::{
    cli::Cli,
    config::FileConfig,
    error::{Error, EXIT_USAGE},
    generate,
    stream::sink,
    Diagnostics, KeccakSponge, StreamError, StreamStats,
};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Standard output carries the stream, so logs go to standard error.
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let mut diagnostics = Diagnostics::stderr(program_name()).verbose(cli.verbose);

    match run(&cli, &mut diagnostics) {
        Ok(stats) => {
            debug!(blocks = stats.blocks, bytes = stats.bytes, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            diagnostics.report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli, diagnostics: &mut Diagnostics) -> Result<StreamStats, Error> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let gspec = file.spec.overridden_by(&cli.generalized_spec());
    if gspec.is_empty() {
        info!("No parameters given, using Keccak defaults");
    }

    let source = file.entropy.build();
    info!(
        version = krandom::VERSION,
        source = %source.name(),
        "Starting stream"
    );

    let mut stdout = sink::stdout().map_err(StreamError::Write)?;
    generate(&gspec, &KeccakSponge::new(), source.as_ref(), &mut stdout, diagnostics)
}

/// Name this binary was invoked as, for diagnostic prefixes.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "krandom".to_owned())
}
