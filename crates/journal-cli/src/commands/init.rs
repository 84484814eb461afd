use std::path::PathBuf;

use journal_core::SqliteStore;
use uuid::Uuid;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, JournalConfig};

/// Write a config file and create an empty store.
///
/// The store path comes from the positional argument, then `--db`, then the
/// XDG data dir. Without `--user` a random user id is generated.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ));
    }

    let store_path = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };
    let user_id = ctx
        .cli()
        .user
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let store = SqliteStore::open(&store_path)?;
    store.check_integrity()?;

    let config = JournalConfig::new(
        store_path.clone(),
        user_id.clone(),
        args.namespace.clone(),
        args.profile_ttl_seconds,
    );
    write_config(&config_path, &config)?;
    tracing::info!(path = %store_path.display(), "journal initialized");

    if !ctx.quiet() {
        println!("Initialized journal at {}", store_path.display());
        println!("Config: {}", config_path.display());
        println!("User: {}", user_id);
    }
    Ok(())
}
