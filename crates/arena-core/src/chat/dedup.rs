//! Dedup Cache - Remembers events the dispatcher re-emitted itself.
//!
//! When the dispatcher publishes a chat event, its own monitor listener sees
//! that event again. Marking the token before publishing lets the listener
//! recognise it and step aside instead of cancelling it a second time.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use arena_traits::DispatchToken;
use tracing::debug;

/// Short-lived set of in-flight dispatch tokens.
#[derive(Debug)]
pub struct DispatchCache {
    entries: DashMap<DispatchToken, Instant>,
    ttl: Duration,
}

impl DispatchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mark a token as dispatched by us.
    pub fn mark(&self, token: DispatchToken) {
        self.purge_expired();
        self.entries.insert(token, Instant::now());
    }

    /// Remove the token, returning whether it was marked and still fresh.
    ///
    /// The removal is atomic: of two concurrent callers, at most one sees `true`.
    pub fn consume(&self, token: DispatchToken) -> bool {
        match self.entries.remove(&token) {
            Some((_, marked_at)) if marked_at.elapsed() < self.ttl => true,
            Some(_) => {
                debug!("Dispatch token {} expired before it was seen again", token);
                false
            }
            None => false,
        }
    }

    /// Drop entries older than the ttl.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, marked_at| marked_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_consume_returns_true_once() {
        let cache = DispatchCache::new(Duration::from_secs(15));
        let token = DispatchToken::new();

        cache.mark(token);
        assert!(cache.consume(token));
        assert!(!cache.consume(token));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unmarked_token_is_not_consumed() {
        let cache = DispatchCache::new(Duration::from_secs(15));
        assert!(!cache.consume(DispatchToken::new()));
    }

    #[test]
    fn test_expired_entry_is_treated_as_unmarked() {
        let cache = DispatchCache::new(Duration::from_millis(10));
        let token = DispatchToken::new();

        cache.mark(token);
        thread::sleep(Duration::from_millis(25));

        assert!(!cache.consume(token));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_mark_purges_stale_entries() {
        let cache = DispatchCache::new(Duration::from_millis(10));
        cache.mark(DispatchToken::new());
        cache.mark(DispatchToken::new());
        thread::sleep(Duration::from_millis(25));

        cache.mark(DispatchToken::new());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_consume_has_single_winner() {
        let cache = Arc::new(DispatchCache::new(Duration::from_secs(15)));
        let token = DispatchToken::new();
        cache.mark(token);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || cache.consume(token))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
