//! # Commands
//!
//! - `leakscope scan` - Scan a repository's commit history for leaked secrets

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod git;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;

const REPO_URL: &str = "https://github.com/leakscope/leakscope";

#[derive(Debug, Parser)]
#[command(
    name = "leakscope",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "s")]
    Scan(ScanArgs),
}

/// Arguments for the `leakscope scan` command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Local path or clone URL of the repository to scan.
    #[arg(long, value_name = "PATH|URL")]
    pub repo: String,

    /// Maximum number of commits to scan, newest first.
    #[arg(short = 'n', long, alias = "n", value_name = "N", default_value_t = 1)]
    pub commits: usize,

    /// Write the JSON report to this path.
    #[arg(long, value_name = "PATH", default_value = "out.json")]
    pub out: PathBuf,

    /// Escalate findings to an LLM scorer (requires OPENAI_API_KEY).
    #[arg(long)]
    pub llm: bool,

    /// Entropy threshold for base64-shaped tokens, in bits per character.
    #[arg(long, value_name = "BITS", default_value_t = 4.5)]
    pub base64_threshold: f64,

    /// Entropy threshold for hex-shaped tokens, in bits per character.
    #[arg(long, value_name = "BITS", default_value_t = 3.0)]
    pub hex_threshold: f64,

    /// Maximum number of concurrent scoring requests.
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub llm_concurrency: usize,

    /// Per-request scoring timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub llm_timeout: u64,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scan(args) => commands::scan::run(&args),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} hunts secrets that slipped into git history.

  Walks recent commits, flags secret-shaped patterns and high-entropy
  tokens in their diffs, and can ask an LLM to judge each candidate.",
        ui::colors::accent().apply_to("leakscope").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    leakscope scan --repo .                    Scan the last commit
    leakscope scan --repo . -n 100             Scan the last 100 commits
    leakscope scan --repo <url> -n 50 --llm    Clone, scan, and score with an LLM
    leakscope scan --repo . --out report.json  Choose the report path

  Learn more: {}",
        style("Examples:").bold(),
        ui::colors::accent().apply_to(REPO_URL).underlined()
    )
}
