//! # Scribe Binary
//!
//! Command-line interface over the post store. Backend and database path
//! are explicit flags; logging is configured from `RUST_LOG` via
//! tracing-subscriber's env filter.

use clap::{Parser, Subcommand};
use scribe::cli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scribe", version, about = "Minimal persisted post store")]
struct Args {
    /// Database file path
    #[arg(long, global = true, default_value = "scribe.db")]
    db: PathBuf,

    /// Store backend: "file" (snapshot) or "redb" (embedded database)
    #[arg(long, global = true, default_value = "file")]
    backend: String,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Initialize a new database file
    Init {
        /// Overwrite an existing database
        #[arg(long)]
        force: bool,
    },
    /// Create a post
    Create {
        /// Post title
        #[arg(long)]
        title: String,
        /// Post description
        #[arg(long)]
        description: String,
    },
    /// Show one post by id
    Show { id: u64 },
    /// Show the most recently created post
    Last,
    /// List all posts
    List,
    /// Print the derived summary of one post
    Summary { id: u64 },
    /// Delete one post by id
    Delete { id: u64 },
    /// Show backend, path, and post count
    Status,
}

fn run(args: &Args) -> Result<(), cli::CliError> {
    let db = &args.db;
    let backend = args.backend.as_str();
    let json = args.json;

    match &args.command {
        Command::Init { force } => cli::cmd_init(db, backend, *force),
        Command::Create { title, description } => {
            cli::cmd_create(db, backend, json, title, description)
        }
        Command::Show { id } => cli::cmd_show(db, backend, json, *id),
        Command::Last => cli::cmd_last(db, backend, json),
        Command::List => cli::cmd_list(db, backend, json),
        Command::Summary { id } => cli::cmd_summary(db, backend, json, *id),
        Command::Delete { id } => cli::cmd_delete(db, backend, *id),
        Command::Status => cli::cmd_status(db, backend, json),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
