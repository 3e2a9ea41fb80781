//! Shirabe Resolve
//!
//! Resolves media paths given as arguments, or one per stdin line, and
//! prints one JSON object per path.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shirabe_core::{EpisodeInfo, EpisodeResolver, NamingOptions, ResolveOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "shirabe-resolve")]
#[command(about = "Resolve media paths into episode metadata")]
#[command(version)]
struct Cli {
    /// Treat every path as a directory
    #[arg(short, long)]
    directory: bool,

    /// Only use named (true) or positional (false) expressions
    #[arg(long)]
    named: Option<bool>,

    /// Allow or forbid optimistic expressions
    #[arg(long)]
    optimistic: Option<bool>,

    /// Allow or forbid absolute episode numbers
    #[arg(long)]
    absolute: Option<bool>,

    /// Skip series name and multi-episode filling
    #[arg(long)]
    no_extended: bool,

    /// JSON file overriding the default naming options
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Paths to resolve; read from stdin when omitted
    paths: Vec<String>,
}

impl Cli {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            is_named: self.named,
            is_optimistic: self.optimistic,
            supports_absolute_numbers: self.absolute,
            fill_extended_info: !self.no_extended,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    input: String,
    resolved: bool,
    info: Option<EpisodeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ResolveOutput {
    fn new(input: &str, result: shirabe_core::Result<Option<EpisodeInfo>>) -> Self {
        match result {
            Ok(info) => Self {
                input: input.to_string(),
                resolved: info.is_some(),
                info,
                error: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                resolved: false,
                info: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn load_options(path: Option<&PathBuf>) -> Result<NamingOptions> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading naming options");
            NamingOptions::from_path(path)
                .with_context(|| format!("failed to load naming options from {}", path.display()))
        }
        None => Ok(NamingOptions::default()),
    }
}

fn emit(out: &mut impl Write, output: &ResolveOutput) -> Result<()> {
    serde_json::to_writer(&mut *out, output).context("failed to serialize result")?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(cli.options.as_ref())?;
    let resolver = EpisodeResolver::new(options).context("invalid naming options")?;
    let modes = cli.resolve_options();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut resolve_one = |input: &str| -> Result<()> {
        let output = ResolveOutput::new(input, resolver.resolve_with(input, cli.directory, &modes));
        debug!(input = %input, resolved = output.resolved, "resolved path");
        emit(&mut out, &output)
    };

    if cli.paths.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            resolve_one(line)?;
        }
    } else {
        for path in &cli.paths {
            resolve_one(path.as_str())?;
        }
    }

    Ok(())
}
