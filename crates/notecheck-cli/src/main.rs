//! Notecheck CLI - Command-line interface for Nostr event and delegation verification.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod path;

use commands::{canonicalize, conditions, delegate, event_id, sign, verify};

#[derive(Parser)]
#[command(name = "notecheck")]
#[command(about = "Nostr event identity, signature and delegation verification CLI")]
struct Cli {
    /// Increase log verbosity (default info, -v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical serialization for an event JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the id for an event JSON
    EventId {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Verify identity, signature and delegation of event files
    Verify {
        /// Paths to event JSON files
        #[arg(required = true)]
        files: Vec<String>,
        /// Exit with error code if any event is rejected
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// JSON file overriding the default shape limits
        #[arg(long)]
        limits: Option<String>,
        /// Reject files larger than SIZE bytes (default: unlimited)
        #[arg(long)]
        max_size: Option<u64>,
    },
    /// Parse a delegation condition string
    Conditions {
        /// Condition string, e.g. `kind=1&created_at<1700000000`
        conditions: String,
    },
    /// Sign an unsigned event template
    Sign {
        /// Hex secret key
        #[arg(long)]
        secret: String,
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Issue a delegation tag
    Delegate {
        /// Delegator hex secret key
        #[arg(long)]
        secret: String,
        /// Delegatee hex public key
        #[arg(long)]
        delegatee: String,
        /// Condition string
        #[arg(long)]
        conditions: String,
    },
}

/// Filter used when `RUST_LOG` is unset. `notecheck` also covers the
/// `notecheck_core` and `notecheck_canonical` targets.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "notecheck=info",
        1 => "notecheck=debug",
        _ => "notecheck=trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::EventId { input } => event_id::run(input),
        Commands::Verify {
            files,
            strict,
            json,
            limits,
            max_size,
        } => verify::run(files, strict, json, limits, max_size),
        Commands::Conditions { conditions } => conditions::run(conditions),
        Commands::Sign { secret, input } => sign::run(secret, input),
        Commands::Delegate {
            secret,
            delegatee,
            conditions,
        } => delegate::run(secret, delegatee, conditions),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
