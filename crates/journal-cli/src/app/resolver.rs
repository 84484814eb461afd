//! Path and identity resolution from CLI flags, environment and config.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, JournalConfig};

/// Resolve the config file path, checking JOURNAL_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("JOURNAL_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path: `--db`/JOURNAL_DB, then the config file.
pub fn resolve_store_path(cli: &Cli, config: Option<&JournalConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.store.path)),
        None => Err(anyhow::anyhow!(missing_config_message(
            &resolve_config_path()?
        ))),
    }
}

/// Resolve the acting user: `--user`/JOURNAL_USER, then the config file.
pub fn resolve_user_id(cli: &Cli, config: Option<&JournalConfig>) -> anyhow::Result<String> {
    let from_cli = cli.user.as_deref().map(str::trim).filter(|id| !id.is_empty());
    let from_config = config
        .and_then(|config| config.user.id.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty());

    from_cli.or(from_config).map(str::to_string).ok_or_else(|| {
        anyhow::anyhow!(
            "No user id configured.\n\nSet [user] id in the config file, pass --user, or set JOURNAL_USER."
        )
    })
}

/// Error message when the journal database is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!(
        "No journal found at {}\n\nRun:\n  journal init\n\nOr specify a journal path:\n  JOURNAL_DB=/path/to/journal.db journal init",
        path.display()
    )
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No config found at {}\n\nRun:\n  journal init\n\nOr specify a journal path:\n  JOURNAL_DB=/path/to/journal.db journal init",
        config_path.display()
    )
}

/// Print a not-found error with a hint and exit with status 3.
pub fn exit_not_found_with_hint(message: &str, hint: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", hint);
    std::process::exit(3);
}
