//! Time-to-live cache in front of a holdings source.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::error::ThrustError;
use crate::domain::holding::Holding;
use crate::ports::holdings_port::HoldingsPort;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    holdings: Vec<Holding>,
    loaded_at: Instant,
}

/// Serves holdings from memory until the entry is older than `ttl`.
///
/// Failed loads are not cached; the next call retries the inner source.
pub struct CachedHoldings<P> {
    inner: P,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<P: HoldingsPort> CachedHoldings<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Load as if the current time were `now`.
    pub fn load_at(&self, now: Instant) -> Result<Vec<Holding>, ThrustError> {
        let mut entry = self.entry.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = entry.as_ref() {
            if now.saturating_duration_since(cached.loaded_at) < self.ttl {
                tracing::debug!(source = %self.inner.source_name(), "holdings cache hit");
                return Ok(cached.holdings.clone());
            }
        }

        let holdings = self.inner.load_holdings()?;
        tracing::debug!(
            source = %self.inner.source_name(),
            count = holdings.len(),
            "holdings cache refreshed"
        );
        *entry = Some(CacheEntry {
            holdings: holdings.clone(),
            loaded_at: now,
        });
        Ok(holdings)
    }

    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl<P: HoldingsPort> HoldingsPort for CachedHoldings<P> {
    fn load_holdings(&self) -> Result<Vec<Holding>, ThrustError> {
        self.load_at(Instant::now())
    }

    fn source_name(&self) -> String {
        self.inner.source_name()
    }
}
