use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::{CoinPulseError, Result};

struct CachedResponse {
    body: Value,
    stored_at: Instant,
    freshness: Duration,
}

impl CachedResponse {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.freshness
    }
}

pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    pub fn get(&self, url: &str) -> Result<Option<Value>> {
        {
            let guard = self
                .entries
                .read()
                .map_err(|_| CoinPulseError::internal("Response cache lock poisoned"))?;
            match guard.get(url) {
                Some(entry) if entry.is_fresh() => return Ok(Some(entry.body.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Stale: drop it unless another writer already refreshed it.
        let mut guard = self
            .entries
            .write()
            .map_err(|_| CoinPulseError::internal("Response cache lock poisoned"))?;
        if guard.get(url).is_some_and(|entry| !entry.is_fresh()) {
            guard.remove(url);
        }
        Ok(None)
    }

    pub fn insert(&self, url: &str, body: Value, freshness: Duration) -> Result<()> {
        if freshness.is_zero() || self.max_entries == 0 {
            return Ok(());
        }

        let mut guard = self
            .entries
            .write()
            .map_err(|_| CoinPulseError::internal("Response cache lock poisoned"))?;

        if !guard.contains_key(url) && guard.len() >= self.max_entries {
            guard.retain(|_, entry| entry.is_fresh());
            if guard.len() >= self.max_entries {
                let oldest = guard
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    guard.remove(&key);
                }
            }
        }

        guard.insert(
            url.to_string(),
            CachedResponse {
                body,
                stored_at: Instant::now(),
                freshness,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.write() {
            guard.clear();
        }
    }

    // (total, fresh)
    pub fn stats(&self) -> (usize, usize) {
        match self.entries.read() {
            Ok(guard) => {
                let fresh = guard.values().filter(|entry| entry.is_fresh()).count();
                (guard.len(), fresh)
            }
            Err(_) => (0, 0),
        }
    }
}
