//! rvaname — name binary functions from RVA-annotated decompiled C# stubs.
//!
//! Reads a directory of dumped classes (`Player.cs`, ...) in which every
//! method carries an `[Address(RVA = "0x...")]` attribute, and produces one
//! unique name per address:
//!
//! 1. **Discover** — list `*.cs` files in the directory, sorted
//! 2. **Parse** — per file, extract `Type.Member[.get|.set]` descriptors
//! 3. **Resolve** — sort all names and suffix duplicates (`_1`, `_2`, ...)
//! 4. **Emit** — write an IDAPython script (default), JSON, or a listing
//!
//! `rvaname dump/ -o rename.py` then run `rename.py` inside IDA.

mod discover;
mod emit;
mod error;
mod model;
mod parser;
mod resolve;

use anyhow::{Context, Result};
use clap::Parser;
use error::Error;
use model::{ParsedFile, Summary};
use parser::ParseOptions;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rvaname",
    version,
    about = "Name binary functions from RVA-annotated decompiled C# stubs"
)]
struct Cli {
    /// Directory containing the dumped class files
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output file. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: idapython (default), json, text
    #[arg(short = 'f', long, default_value = "idapython")]
    format: String,

    /// Extension of the stub files to read
    #[arg(long, default_value = discover::DEFAULT_EXTENSION)]
    ext: String,

    /// Symbol joining the type, member, and accessor
    #[arg(long, default_value = model::DEFAULT_SEPARATOR)]
    separator: String,

    /// Skip functions whose return type is not void, int, or string
    #[arg(long)]
    require_return_type: bool,

    /// Log every emitted name
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Reject a bad format before touching any files.
    let mut emitter = emit::create_emitter(&cli.format)?;

    let options = ParseOptions {
        separator: cli.separator.clone(),
        require_return_type: cli.require_return_type,
    };

    info!("Chosen folder: {}", cli.dir.display());
    let parsed = match parse_dir(&cli.dir, &cli.ext, &options) {
        Ok(parsed) => parsed,
        Err(err @ Error::InputNotFound(_)) => {
            // Nothing to do; not a process failure.
            error!("{}", err);
            return Ok(());
        }
        Err(err) => return Err(err).context("failed to list stub files"),
    };

    let summary = process(parsed, emitter.as_mut());
    let out_path = cli
        .output
        .as_deref()
        .map(|p| resolve_output_path(p, emitter.file_extension()));
    let output = emitter.finish();
    write_output(out_path.as_deref(), &output)?;

    for (file, count) in &summary.files {
        info!("{}: parsed {} function(s)", file, count);
    }
    if summary.discarded > 0 {
        warn!("{} function(s) discarded for malformed addresses", summary.discarded);
    }
    info!("Total count of parsed functions: {}", summary.total_extracted);
    info!("Total renamed functions: {}", summary.total_applied);

    if let Some(failure) = summary.failure {
        error!("{}. Exiting...", failure);
        return Err(failure)
            .context("emission stopped; names applied before the failure were kept");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rvaname=debug" } else { "rvaname=info" };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = default.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

/// Parse every stub file in `dir`. Unreadable files are skipped.
fn parse_dir(dir: &Path, ext: &str, options: &ParseOptions) -> error::Result<Vec<ParsedFile>> {
    let files = discover::find_stub_files(dir, ext)?;

    let mut parsed = Vec::with_capacity(files.len());
    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let file = parser::parse_file(path, &content, options);
        debug!("{}: type {}", path.display(), file.type_name);
        parsed.push(file);
    }
    Ok(parsed)
}

/// Resolve names across all files and run them through the emitter.
fn process(parsed: Vec<ParsedFile>, emitter: &mut dyn emit::Emitter) -> Summary {
    let mut summary = Summary::default();
    let mut all = Vec::new();
    for file in parsed {
        summary
            .files
            .push((display_name(&file.path), file.functions.len()));
        summary.total_extracted += file.functions.len();
        summary.discarded += file.diagnostics.len();
        all.extend(file.functions);
    }

    let resolved = resolve::resolve(all);
    let records = resolve::to_records(&resolved);
    let report = emit::emit_all(emitter, &records);

    summary.total_applied = report.applied;
    summary.failure = report.failure;
    summary
}

/// An existing directory gets `rvaname.<ext>` inside it.
fn resolve_output_path(path: &Path, ext: &str) -> PathBuf {
    if path.is_dir() {
        path.join(format!("rvaname.{}", ext))
    } else {
        path.to_path_buf()
    }
}

fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
