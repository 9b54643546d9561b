use crate::core::usage_store::{StatusReport, UsageStore};
use crate::domain::model::UsageMap;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle for using one [`UsageStore`] from several threads.
///
/// Each call holds the lock across the whole read-modify-persist sequence,
/// so a count-then-reset cannot interleave with a concurrent `mark_used`.
pub struct SharedUsageStore<S: Storage> {
    inner: Arc<Mutex<UsageStore<S>>>,
}

impl<S: Storage> Clone for SharedUsageStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedUsageStore<S> {
    pub fn new(store: UsageStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // A panic mid-call cannot leave the map half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, UsageStore<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_used(&self, id: &str) -> bool {
        self.lock().is_used(id)
    }

    pub fn mark_used(&self, id: &str) {
        self.lock().mark_used(id);
    }

    pub fn reset_all(&self) {
        self.lock().reset_all();
    }

    pub fn count_unused_in_tier(&self, tier: u8) -> usize {
        self.lock().count_unused_in_tier(tier)
    }

    pub fn has_unused_in_tier(&self, tier: u8) -> bool {
        self.lock().has_unused_in_tier(tier)
    }

    pub fn reset_tier(&self, tier: u8) {
        self.lock().reset_tier(tier);
    }

    pub fn ensure_tier_playable(&self, tier: u8) -> bool {
        self.lock().ensure_tier_playable(tier)
    }

    pub fn count_used_total(&self) -> usize {
        self.lock().count_used_total()
    }

    pub fn status(&self) -> StatusReport {
        self.lock().status()
    }

    pub fn print_status(&self) {
        self.lock().print_status();
    }

    pub fn persist(&self) -> Result<()> {
        self.lock().persist()
    }

    pub fn snapshot(&self) -> UsageMap {
        self.lock().usage().clone()
    }

    /// Runs `f` with exclusive access, for sequences that must be atomic.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut UsageStore<S>) -> R) -> R {
        f(&mut self.lock())
    }
}
