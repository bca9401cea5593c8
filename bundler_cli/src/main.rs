//! Command-line entry point: argument parsing, pipeline orchestration,
//! diagnostics, and exit codes.

mod error;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use error::BundlerError;

/// A teaching-grade JavaScript bundler: follows an entry module's static and
/// dynamic imports, partitions the result into chunks, and emits a
/// self-bootstrapping bundle.
#[derive(Debug, Parser)]
#[command(name = "bundler", version, about)]
struct Cli {
    /// The entry source file to bundle.
    #[arg(short, long)]
    entry: PathBuf,

    /// Directory the bundled output is written to; created if absent.
    #[arg(short, long)]
    output: PathBuf,

    /// Raise log verbosity; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: &Cli) -> Result<(), BundlerError> {
    tracing::debug!(entry = %cli.entry.display(), output = %cli.output.display(), "starting build");

    let graph = bundler_graph::build_graph(&cli.entry)?;
    let plan = bundler_chunk::plan_chunks(&graph);
    let output = bundler_codegen::emit_bundle(&graph, &plan)?;

    fs::create_dir_all(&cli.output).map_err(|source| BundlerError::OutputIo { path: cli.output.clone(), source })?;

    for (filename, contents) in &output.files {
        let path = cli.output.join(filename.as_ref());
        fs::write(&path, contents).map_err(|source| BundlerError::OutputIo { path, source })?;
    }

    tracing::debug!(files = output.files.len(), "build complete");
    Ok(())
}

/// Prints a colored diagnostic to stderr. A parse failure gets its source
/// location translated to line:column by re-reading the file the graph
/// builder already read once (the error itself only carries the byte offset).
fn report(err: &BundlerError) {
    if let BundlerError::Graph(bundler_graph::GraphError::Parse { path, source }) = err {
        if let Ok(text) = fs::read_to_string(path) {
            let (line, col) = bundler_ast::Span::line_col_of(&text, source.offset());
            eprintln!("{} {}:{}:{}: {}", "error:".red().bold(), path.display(), line, col, source);
            return;
        }
    }
    eprintln!("{} {}", "error:".red().bold(), err);
}
