use std::path::{Path, PathBuf};

use journal_core::crypto::DEFAULT_NAMESPACE;
use journal_core::DEFAULT_PROFILE_TTL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub user: UserSection,
    #[serde(default)]
    pub encryption: EncryptionSection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserSection {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptionSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for EncryptionSection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_profile_ttl_seconds")]
    pub profile_ttl_seconds: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            profile_ttl_seconds: default_profile_ttl_seconds(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_profile_ttl_seconds() -> u64 {
    DEFAULT_PROFILE_TTL.as_secs()
}

impl JournalConfig {
    pub fn new(
        store_path: PathBuf,
        user_id: String,
        namespace: Option<String>,
        profile_ttl_seconds: Option<u64>,
    ) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            user: UserSection { id: Some(user_id) },
            encryption: EncryptionSection {
                namespace: namespace.unwrap_or_else(default_namespace),
            },
            cache: CacheSection {
                profile_ttl_seconds: profile_ttl_seconds
                    .unwrap_or_else(default_profile_ttl_seconds),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("journal.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<JournalConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &JournalConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("journal"));
        }
    }
    Ok(home_dir()?.join(".config").join("journal"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("journal"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("journal"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: JournalConfig = toml::from_str("[store]\npath = \"/tmp/j.db\"\n").unwrap();
        assert_eq!(config.store.path, "/tmp/j.db");
        assert!(config.user.id.is_none());
        assert_eq!(config.encryption.namespace, "growth_journal");
        assert_eq!(config.cache.profile_ttl_seconds, 300);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = JournalConfig::new(
            PathBuf::from("/data/journal.db"),
            "u1".to_string(),
            Some("custom".to_string()),
            Some(60),
        );
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: JournalConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.user.id.as_deref(), Some("u1"));
        assert_eq!(parsed.encryption.namespace, "custom");
        assert_eq!(parsed.cache.profile_ttl_seconds, 60);
    }

    #[test]
    fn test_missing_store_section_fails() {
        let result: Result<JournalConfig, _> = toml::from_str("[user]\nid = \"u1\"\n");
        assert!(result.is_err());
    }
}
