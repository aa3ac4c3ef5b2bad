use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::info;

mod session;

use session::{OutputFormat, Session};

/// ReelWatch - Movie watchlist session
#[derive(Parser)]
#[command(name = "reel-watch")]
#[command(about = "Keep a deduplicated movie watchlist for the length of a session", long_about = None)]
#[command(after_help = session::HELP)]
struct Cli {
    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Output format for `list`
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only print query results (`has`, `list`, `count`)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // The session owns the watchlist; it is dropped when the session ends.
    let mut session = Session::new(cli.format, cli.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.script {
        Some(path) => {
            info!("Running script {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session
                .run(BufReader::new(file), &mut out, false)
                .context("Session aborted")?;
        }
        None => {
            let stdin = io::stdin();
            let prompt = !cli.quiet && stdin.is_terminal();
            session
                .run(stdin.lock(), &mut out, prompt)
                .context("Session aborted")?;
        }
    }

    info!(
        "Session ended with {} movie(s) in the watchlist",
        session.watchlist().len()
    );
    Ok(())
}
