//! Journal CLI - an encrypted personal-growth journal
//!
//! This is the command-line interface for the journal. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod helpers;
mod output;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use journal_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::entries::{handle_add, handle_delete, handle_edit, handle_list, handle_show};
use crate::commands::init::handle_init;
use crate::commands::maintenance::handle_check;
use crate::commands::misc::{handle_completions, handle_preview};
use crate::commands::moods::handle_mood;
use crate::commands::profile::handle_profile;

/// Log filter for the CLI (e.g. `JOURNAL_LOG=debug`); defaults to warnings.
const LOG_ENV: &str = "JOURNAL_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();
    let ctx = AppContext::new(&cli);

    match &cli.command {
        Some(Commands::Init(args)) => handle_init(&ctx, args),
        Some(Commands::Add(args)) => handle_add(&ctx, args),
        Some(Commands::Edit(args)) => handle_edit(&ctx, args),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Show(args)) => handle_show(&ctx, args),
        Some(Commands::Delete(args)) => handle_delete(&ctx, args),
        Some(Commands::Mood(command)) => handle_mood(&ctx, command),
        Some(Commands::Profile(command)) => handle_profile(&ctx, command),
        Some(Commands::Preview) => handle_preview(),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::Completions(args)) => handle_completions(args.shell),
        None => {
            println!("Journal v{}", VERSION);
            println!("\nRun `journal --help` for usage information.");
            Ok(())
        }
    }
}
