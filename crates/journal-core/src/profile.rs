//! Profile service with a read-through cache.
//!
//! Profiles are read on nearly every screen, so reads go through an injected
//! [`Cache`] keyed by user id. Every write refreshes the cached copy.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::cache::Cache;
use crate::error::{JournalError, Result};
use crate::storage::{JournalStore, Profile, Subscription};

/// How long a cached profile stays fresh.
pub const DEFAULT_PROFILE_TTL: Duration = Duration::from_secs(300);

pub struct ProfileService<S, C> {
    store: S,
    cache: C,
    ttl: Duration,
}

impl<S, C> ProfileService<S, C>
where
    S: JournalStore,
    C: Cache<String, Profile>,
{
    pub fn new(store: S, cache: C) -> Self {
        Self::with_ttl(store, cache, DEFAULT_PROFILE_TTL)
    }

    pub fn with_ttl(store: S, cache: C, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The user's profile, or a fresh default if none has been saved yet.
    pub fn get(&self, user_id: &str) -> Result<Profile> {
        require_user(user_id)?;
        let key = user_id.to_string();
        if let Some(profile) = self.cache.get(&key) {
            debug!(user_id, "profile cache hit");
            return Ok(profile);
        }

        let profile = self
            .store
            .get_profile(user_id)?
            .unwrap_or_else(|| Profile::new(user_id));
        self.cache.put(key, profile.clone(), self.ttl);
        Ok(profile)
    }

    /// Mark onboarding as done.
    pub fn complete_onboarding(&self, user_id: &str) -> Result<Profile> {
        self.modify(user_id, |profile| profile.onboarding_completed = true)
    }

    /// Set or clear the display name. Blank names clear it.
    pub fn set_display_name(&self, user_id: &str, name: Option<&str>) -> Result<Profile> {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self.modify(user_id, |profile| profile.display_name = name)
    }

    pub fn set_subscription(&self, user_id: &str, subscription: Subscription) -> Result<Profile> {
        self.modify(user_id, |profile| profile.subscription = subscription)
    }

    /// Drop the cached copy so the next read hits the store.
    pub fn invalidate(&self, user_id: &str) {
        self.cache.invalidate(&user_id.to_string());
    }

    fn modify(&self, user_id: &str, change: impl FnOnce(&mut Profile)) -> Result<Profile> {
        require_user(user_id)?;
        let mut profile = self
            .store
            .get_profile(user_id)?
            .unwrap_or_else(|| Profile::new(user_id));
        change(&mut profile);
        profile.updated_at = Utc::now();

        self.store.upsert_profile(&profile)?;
        self.cache
            .put(user_id.to_string(), profile.clone(), self.ttl);
        debug!(user_id, "profile updated");
        Ok(profile)
    }
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(JournalError::MissingUserId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{NoopCache, TtlCache};
    use crate::storage::{SqliteStore, SubscriptionTier};

    fn service() -> (Arc<SqliteStore>, ProfileService<Arc<SqliteStore>, TtlCache<String, Profile>>) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let service = ProfileService::new(Arc::clone(&store), TtlCache::new());
        (store, service)
    }

    #[test]
    fn test_get_defaults_for_unknown_user() {
        let (_, service) = service();
        let profile = service.get("u1").unwrap();
        assert_eq!(profile.user_id, "u1");
        assert!(!profile.onboarding_completed);
    }

    #[test]
    fn test_reads_are_served_from_cache() {
        let (store, service) = service();
        service.get("u1").unwrap();

        // Written behind the service's back; the cached copy stays in effect.
        let mut direct = Profile::new("u1");
        direct.onboarding_completed = true;
        store.upsert_profile(&direct).unwrap();
        assert!(!service.get("u1").unwrap().onboarding_completed);

        service.invalidate("u1");
        assert!(service.get("u1").unwrap().onboarding_completed);
    }

    #[test]
    fn test_writes_refresh_cache() {
        let (store, service) = service();
        service.get("u1").unwrap();

        let updated = service.complete_onboarding("u1").unwrap();
        assert!(updated.onboarding_completed);
        assert!(service.get("u1").unwrap().onboarding_completed);
        assert!(store.get_profile("u1").unwrap().unwrap().onboarding_completed);
    }

    #[test]
    fn test_display_name_blank_clears() {
        let (_, service) = service();
        let named = service.set_display_name("u1", Some("  Sam ")).unwrap();
        assert_eq!(named.display_name.as_deref(), Some("Sam"));

        let cleared = service.set_display_name("u1", Some("   ")).unwrap();
        assert!(cleared.display_name.is_none());
    }

    #[test]
    fn test_set_subscription() {
        let (_, service) = service();
        let profile = service
            .set_subscription("u1", Subscription::premium(None))
            .unwrap();
        assert_eq!(profile.subscription.tier, SubscriptionTier::Premium);
        assert!(service.get("u1").unwrap().subscription.is_premium(Utc::now()));
    }

    #[test]
    fn test_zero_ttl_always_reads_store() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let service =
            ProfileService::with_ttl(Arc::clone(&store), TtlCache::new(), Duration::ZERO);
        service.get("u1").unwrap();

        let mut direct = Profile::new("u1");
        direct.display_name = Some("Direct".to_string());
        store.upsert_profile(&direct).unwrap();
        assert_eq!(service.get("u1").unwrap().display_name.as_deref(), Some("Direct"));
    }

    #[test]
    fn test_noop_cache_works() {
        let store = SqliteStore::open_in_memory().unwrap();
        let service = ProfileService::new(store, NoopCache);
        service.complete_onboarding("u1").unwrap();
        assert!(service.get("u1").unwrap().onboarding_completed);
    }

    #[test]
    fn test_blank_user_rejected() {
        let (_, service) = service();
        assert!(matches!(service.get(""), Err(JournalError::MissingUserId)));
    }
}
