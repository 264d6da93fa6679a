//! Nonce reconciliation for back-to-back submissions.
//!
//! The chain only observes a submitted transaction after it leaves the
//! pool, so the nonce it reports lags behind transactions this client has
//! already submitted. The tracker remembers the last nonce it handed out
//! and keeps counting from there.

use tokio::sync::Mutex;

/// Per-client nonce state.
///
/// The cached value only moves forward. It never re-syncs to the chain's
/// reported nonce once set; if a rejected submission leaves it diverged,
/// call [`NonceTracker::reset`] to start over from the chain's view.
#[derive(Debug, Default)]
pub struct NonceTracker {
    cached: Mutex<Option<u64>>,
}

impl NonceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the nonce for the next transaction, given the nonce the
    /// chain currently reports for the account.
    ///
    /// First call adopts `chain_nonce`; every later call uses the cached
    /// value plus one, whether or not the chain has caught up. The mutex
    /// scope guarantees concurrent callers get distinct values.
    pub async fn next(&self, chain_nonce: u64) -> u64 {
        let mut cached = self.cached.lock().await;
        let next = match *cached {
            None => chain_nonce,
            Some(previous) => {
                if chain_nonce > previous + 1 {
                    // The chain moved past us (another client submitted for
                    // this account); we still keep counting locally.
                    tracing::warn!(
                        chain_nonce,
                        cached_nonce = previous,
                        "chain nonce ahead of local counter"
                    );
                }
                previous + 1
            }
        };
        *cached = Some(next);
        next
    }

    /// Current cached nonce, if any. Mostly useful for diagnostics.
    pub async fn current(&self) -> Option<u64> {
        *self.cached.lock().await
    }

    /// Forget the cached nonce so the next call adopts the chain's value.
    ///
    /// The escape hatch for divergence after a rejected submission
    /// (stale-nonce errors stay permanent otherwise).
    pub async fn reset(&self) {
        *self.cached.lock().await = None;
    }
}
