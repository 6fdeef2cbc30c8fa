//! Time boxed response cache fronting upstream fetches.
//!
//! Entries are immutable once stored and are swapped wholesale on `put`, so a
//! reader holding an entry never observes a partial write. Stale entries are not
//! purged, they simply stop being returned and linger until overwritten.
//!
//! All time dependent functions have an `_at` variant taking `now` explicitly,
//! which keeps tests deterministic.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use chrono::{DateTime, TimeDelta, Utc};

/// Default time to live for cache entries in milliseconds, five minutes
pub const DEFAULT_TTL_MS: i64 = 300_000;

/// Kinds of upstream requests, part of the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    History,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Current => write!(f, "current"),
            Endpoint::History => write!(f, "history"),
        }
    }
}

/// Builds a cache key from an endpoint and coordinates rounded to the given
/// number of decimals
///
/// # Arguments
///
/// * 'endpoint' - the kind of request
/// * 'lat' - latitude
/// * 'long' - longitude
/// * 'precision' - number of decimals to keep
pub fn cache_key(endpoint: Endpoint, lat: f64, long: f64, precision: usize) -> String {
    // adding 0.0 turns -0.0 into 0.0 so both round to the same key
    let lat = round_to(lat, precision) + 0.0;
    let long = round_to(long, precision) + 0.0;
    format!("{}:{:.*}:{:.*}", endpoint, precision, lat, precision, long)
}

fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

#[derive(Debug)]
pub struct CacheEntry<T> {
    pub key: String,
    pub payload: Arc<T>,
    pub created_at: DateTime<Utc>,
}

/// Key/value store where every entry expires after a fixed time to live
pub struct ResponseCache<T> {
    ttl: TimeDelta,
    entries: RwLock<HashMap<String, Arc<CacheEntry<T>>>>,
}

impl<T> ResponseCache<T> {
    /// Returns a new empty cache
    ///
    /// # Arguments
    ///
    /// * 'ttl' - time to live for entries
    pub fn new(ttl: TimeDelta) -> Self {
        Self { ttl, entries: RwLock::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Returns the payload stored under key if it is younger than the time to live
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.get_at(key, Utc::now())
    }

    /// Returns the payload stored under key if `now - created_at < ttl`
    ///
    /// # Arguments
    ///
    /// * 'key' - the cache key
    /// * 'now' - the time to evaluate freshness against
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|e| now - e.created_at < self.ttl)
            .map(|e| e.payload.clone())
    }

    /// Stores a payload under key, replacing any previous entry, and returns
    /// a shared handle to the stored payload
    pub fn put(&self, key: &str, payload: T) -> Arc<T> {
        self.put_at(key, payload, Utc::now())
    }

    /// Stores a payload under key stamped with the given creation time
    ///
    /// # Arguments
    ///
    /// * 'key' - the cache key
    /// * 'payload' - the payload to store
    /// * 'now' - creation time of the entry
    pub fn put_at(&self, key: &str, payload: T, now: DateTime<Utc>) -> Arc<T> {
        let payload = Arc::new(payload);
        let entry = Arc::new(CacheEntry { key: key.to_string(), payload: payload.clone(), created_at: now });

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(entry.key.clone(), entry);

        payload
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
