//! Application context for the journal CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and opens the
//! store and services that command handlers need.

use std::sync::Arc;
use std::time::Duration;

use once_cell::unsync::OnceCell;

use journal_core::storage::Profile;
use journal_core::{ContentCipher, Journal, ProfileService, SqliteStore, TtlCache};

use crate::cli::Cli;
use crate::config::{read_config, JournalConfig};

use super::resolver::{
    missing_store_message, resolve_config_path, resolve_store_path, resolve_user_id,
};

pub type CliJournal = Journal<Arc<SqliteStore>>;
pub type CliProfiles = ProfileService<Arc<SqliteStore>, TtlCache<String, Profile>>;

/// Application context that bundles CLI args with the config file.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<JournalConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&JournalConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                read_config(&path).map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(config.as_ref())
    }

    pub fn user_id(&self) -> anyhow::Result<String> {
        resolve_user_id(self.cli, self.config()?)
    }

    fn cipher(&self) -> anyhow::Result<ContentCipher> {
        Ok(match self.config()? {
            Some(config) => ContentCipher::with_namespace(config.encryption.namespace.clone()),
            None => ContentCipher::new(),
        })
    }

    fn profile_ttl(&self) -> anyhow::Result<Duration> {
        Ok(match self.config()? {
            Some(config) => Duration::from_secs(config.cache.profile_ttl_seconds),
            None => journal_core::DEFAULT_PROFILE_TTL,
        })
    }

    /// Open the existing store. Fails with a hint if it has not been created.
    pub fn open_store(&self) -> anyhow::Result<Arc<SqliteStore>> {
        let path = resolve_store_path(self.cli, self.config()?)?;
        if !path.exists() {
            return Err(anyhow::anyhow!(missing_store_message(&path)));
        }
        tracing::debug!(path = %path.display(), "opening store");
        Ok(Arc::new(SqliteStore::open(&path)?))
    }

    pub fn open_journal(&self) -> anyhow::Result<CliJournal> {
        Ok(Journal::with_cipher(self.open_store()?, self.cipher()?))
    }

    pub fn open_profiles(&self) -> anyhow::Result<CliProfiles> {
        Ok(ProfileService::with_ttl(
            self.open_store()?,
            TtlCache::new(),
            self.profile_ttl()?,
        ))
    }
}
