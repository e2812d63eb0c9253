//! Dispatch for the `multibat` binary.
//!
//! - `run()`: parses flags, installs logging, dispatches (called by `main.rs`)
//! - `init_context()`: resolves config + flags into a job and an API
//! - `handle_*()`: per-command handlers that call the API and print results

use super::render::{print_messages, print_paths, render_chunk_json, render_chunk_table};
use super::setup::{Cli, Commands, OutputFormat};
use clap::Parser;
use multibat::api::{init_config, MultibatApi};
use multibat::clock::SystemClock;
use multibat::config::{global_config_dir, MultibatConfig};
use multibat::error::Result;
use multibat::model::{ChunkPolicy, RenderJob};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: MultibatApi<SystemClock>,
    job: RenderJob,
    policy: ChunkPolicy,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.as_ref().unwrap_or(&Commands::Preview) {
        Commands::Init { path, force } => handle_init(path.clone(), *force),
        Commands::Preview => handle_preview(&init_context(&cli)?),
        Commands::Chunks { format } => handle_chunks(&init_context(&cli)?, *format),
        Commands::Files => handle_files(&init_context(&cli)?),
        Commands::Archive => handle_archive(&init_context(&cli)?),
    }
}

/// Logs go to stderr so scripts printed on stdout stay clean. `RUST_LOG`
/// takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "multibat=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let global_dir = global_config_dir();

    let (file_config, source) =
        MultibatConfig::discover(cli.config.as_deref(), &cwd, global_dir.as_deref())?;
    if let Some(path) = &source {
        debug!(path = %path.display(), "loaded config file");
    }

    let config = file_config.merged(cli.job.overrides());
    let job = config.render_job()?;
    let templates = config.template_set()?;
    let policy = config.chunk_policy();
    debug!(?job, ?policy, "resolved render job");

    Ok(AppContext {
        api: MultibatApi::new(SystemClock, templates, config.layout),
        job,
        policy,
    })
}

fn handle_preview(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.preview(&ctx.job, ctx.policy)?;
    if let Some(text) = &result.text {
        print!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_chunks(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let result = ctx.api.chunks(&ctx.job, ctx.policy)?;
    match format {
        OutputFormat::Text => print!("{}", render_chunk_table(&result.chunks)),
        OutputFormat::Json => println!("{}", render_chunk_json(&result.chunks)?),
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_files(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.write_files(&ctx.job, ctx.policy)?;
    print_paths(&result.paths);
    print_messages(&result.messages);
    Ok(())
}

fn handle_archive(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.archive(&ctx.job, ctx.policy)?;
    if let Some(archive) = result.archive.clone() {
        print_paths(&[archive]);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(path: PathBuf, force: bool) -> Result<()> {
    let result = init_config(&path, force)?;
    print_messages(&result.messages);
    Ok(())
}
