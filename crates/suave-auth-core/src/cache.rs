//! TTL'd token cache
//!
//! One live token per subject. The cache is the revocation authority:
//! a token that is not the cached value for its subject is dead, no
//! matter what its signature says. Entries expire on their own after
//! the configured TTL, so an abandoned session needs no cleanup job.
//!
//! All conditional operations are atomic compare-and-swap style updates,
//! so two racing sign-ins converge on one token instead of clobbering
//! each other.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use subtle::ConstantTimeEq;
use suave_types::UserId;

/// Cached token value, cheap to clone
pub type CachedToken = Arc<str>;

/// Token cache interface
///
/// Value comparisons inside conditional operations are constant-time.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Get the live token for a subject, if any
    async fn current(&self, subject: &UserId) -> Option<CachedToken>;

    /// Store `candidate` unless the subject already has a live token.
    /// Returns the token that won: the existing one when present,
    /// otherwise `candidate`.
    async fn put_if_absent(&self, subject: UserId, candidate: CachedToken) -> CachedToken;

    /// Swap the subject's token for `next`, but only while the live value
    /// still equals `expected`. Returns whether the swap happened. The
    /// replacement starts a fresh TTL.
    async fn replace(&self, subject: UserId, expected: &str, next: CachedToken) -> bool;

    /// Drop the subject's entry, but only while the live value still
    /// equals `expected`. Returns whether the entry was removed.
    async fn remove_if_current(&self, subject: UserId, expected: &str) -> bool;
}

/// In-process token cache backed by moka
pub struct MokaTokenCache {
    entries: Cache<UserId, CachedToken>,
}

impl MokaTokenCache {
    /// Create a cache whose entries live for `ttl` (must be nonzero)
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }
}

#[async_trait]
impl TokenCache for MokaTokenCache {
    async fn current(&self, subject: &UserId) -> Option<CachedToken> {
        self.entries.get(subject).await
    }

    async fn put_if_absent(&self, subject: UserId, candidate: CachedToken) -> CachedToken {
        let result = self
            .entries
            .entry(subject)
            .and_compute_with(|existing| {
                let op = match existing {
                    // keep the live token and its remaining TTL
                    Some(_) => Op::Nop,
                    None => Op::Put(Arc::clone(&candidate)),
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Inserted(entry) | CompResult::Unchanged(entry) => entry.into_value(),
            CompResult::ReplacedWith(entry) => entry.into_value(),
            CompResult::StillNone(_) | CompResult::Removed(_) => candidate,
        }
    }

    async fn replace(&self, subject: UserId, expected: &str, next: CachedToken) -> bool {
        let result = self
            .entries
            .entry(subject)
            .and_compute_with(|existing| {
                let op = match existing {
                    Some(ref entry) if token_eq(entry.value(), expected) => {
                        Op::Put(Arc::clone(&next))
                    }
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        matches!(result, CompResult::ReplacedWith(_))
    }

    async fn remove_if_current(&self, subject: UserId, expected: &str) -> bool {
        let result = self
            .entries
            .entry(subject)
            .and_compute_with(|existing| {
                let op = match existing {
                    Some(ref entry) if token_eq(entry.value(), expected) => Op::Remove,
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        matches!(result, CompResult::Removed(_))
    }
}

/// Constant-time token comparison
fn token_eq(cached: &CachedToken, presented: &str) -> bool {
    cached.as_bytes().ct_eq(presented.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> MokaTokenCache {
        MokaTokenCache::new(Duration::from_secs(60), 100)
    }

    fn token(s: &str) -> CachedToken {
        Arc::from(s)
    }

    #[tokio::test]
    async fn test_put_if_absent_stores_when_vacant() {
        let cache = cache();
        let subject = UserId::new();
        let winner = cache.put_if_absent(subject, token("t1")).await;
        assert_eq!(winner.as_ref(), "t1");
        assert_eq!(cache.current(&subject).await.unwrap().as_ref(), "t1");
    }

    #[tokio::test]
    async fn test_put_if_absent_keeps_existing() {
        let cache = cache();
        let subject = UserId::new();
        cache.put_if_absent(subject, token("first")).await;
        let winner = cache.put_if_absent(subject, token("second")).await;
        assert_eq!(winner.as_ref(), "first");
        assert_eq!(cache.current(&subject).await.unwrap().as_ref(), "first");
    }

    #[tokio::test]
    async fn test_concurrent_put_if_absent_converges() {
        let cache = cache();
        let subject = UserId::new();
        let (a, b) = tokio::join!(
            cache.put_if_absent(subject, token("a")),
            cache.put_if_absent(subject, token("b")),
        );
        assert_eq!(a.as_ref(), b.as_ref(), "both callers must see one winner");
    }

    #[tokio::test]
    async fn test_replace_swaps_only_on_match() {
        let cache = cache();
        let subject = UserId::new();
        cache.put_if_absent(subject, token("old")).await;

        assert!(!cache.replace(subject, "not-old", token("new")).await);
        assert_eq!(cache.current(&subject).await.unwrap().as_ref(), "old");

        assert!(cache.replace(subject, "old", token("new")).await);
        assert_eq!(cache.current(&subject).await.unwrap().as_ref(), "new");
    }

    #[tokio::test]
    async fn test_replace_fails_on_vacant_entry() {
        let cache = cache();
        let subject = UserId::new();
        assert!(!cache.replace(subject, "anything", token("new")).await);
        assert!(cache.current(&subject).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_if_current_drops_only_on_match() {
        let cache = cache();
        let subject = UserId::new();
        cache.put_if_absent(subject, token("live")).await;

        assert!(!cache.remove_if_current(subject, "stale").await);
        assert!(cache.current(&subject).await.is_some());

        assert!(cache.remove_if_current(subject, "live").await);
        assert!(cache.current(&subject).await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MokaTokenCache::new(Duration::from_millis(50), 100);
        let subject = UserId::new();
        cache.put_if_absent(subject, token("short-lived")).await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.current(&subject).await.is_none());
    }

    #[tokio::test]
    async fn test_subjects_are_independent() {
        let cache = cache();
        let (alice, bob) = (UserId::new(), UserId::new());
        cache.put_if_absent(alice, token("a")).await;
        cache.put_if_absent(bob, token("b")).await;

        assert!(cache.remove_if_current(alice, "a").await);
        assert_eq!(cache.current(&bob).await.unwrap().as_ref(), "b");
    }
}
