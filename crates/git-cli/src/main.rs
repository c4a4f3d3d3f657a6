mod brute;
mod repo;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, ArgAction, Parser};
use git_brute::{DEFAULT_ALPHABET, DEFAULT_PATTERN};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitbrute",
    about = "Rewrite HEAD with a nonce header so its commit id matches a pattern",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Desired pattern, a regexp over the lowercase hex commit id
    #[arg(long, env = "GITBRUTE_PATTERN", default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Re-run, even if the current hash matches the pattern
    #[arg(long)]
    force: bool,

    /// Number of CPUs to use. Defaults to the number of processors
    #[arg(long, env = "GITBRUTE_CPUS")]
    cpus: Option<usize>,

    /// Name of the nonce field to add to the commit object
    #[arg(long, env = "GITBRUTE_NONCE_NAME", default_value = "nonce")]
    nonce_name: String,

    /// Characters to use in the nonce field value
    #[arg(long, env = "GITBRUTE_NONCE_CHARS", default_value = DEFAULT_ALPHABET)]
    nonce_chars: String,

    /// Run as if started in <path>
    #[arg(short = 'C')]
    change_dir: Option<PathBuf>,

    /// Log more (repeat for more detail); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e:#}");
            process::exit(128);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    brute::run(&cli)
}
