use std::collections::HashMap;
use std::sync::{Arc, Mutex, TryLockError};
use std::time::{Duration, Instant};

use stockbook_core::LedgerError;
use stockbook_ledger::StockKey;

const DEFAULT_ACQUIRE_WINDOW: Duration = Duration::from_secs(2);

/// Per-key serialization boundary for the validate-then-append sequence.
///
/// Each (product, warehouse) key owns one mutex; the whole read-check-write
/// sequence for that key runs under it, so two concurrent sales racing for
/// the last unit can never both pass the stock check. Transactions on
/// different keys take different mutexes and proceed in parallel.
///
/// Acquisition is bounded: a section that cannot be entered within the
/// configured window fails with [`LedgerError::Timeout`] instead of waiting
/// indefinitely. The window only matters under pathological contention; the
/// critical section never does IO beyond the in-process store.
pub struct KeyLockRegistry {
    acquire_window: Duration,
    slots: Mutex<HashMap<StockKey, Arc<Mutex<()>>>>,
}

impl KeyLockRegistry {
    pub fn new() -> Self {
        Self::with_acquire_window(DEFAULT_ACQUIRE_WINDOW)
    }

    pub fn with_acquire_window(acquire_window: Duration) -> Self {
        Self {
            acquire_window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: StockKey) -> Result<Arc<Mutex<()>>, LedgerError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| LedgerError::storage("key registry lock poisoned"))?;
        Ok(slots.entry(key).or_default().clone())
    }

    /// Run `section` with mutual exclusion over `key`.
    ///
    /// The closure's own failure is returned as-is; the guard adds only
    /// `Timeout` (window elapsed) and `Storage` (poisoned lock).
    pub fn run_serialized<T>(
        &self,
        key: StockKey,
        section: impl FnOnce() -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let slot = self.slot(key)?;
        let deadline = Instant::now() + self.acquire_window;

        let guard = loop {
            match slot.try_lock() {
                Ok(guard) => break guard,
                Err(TryLockError::Poisoned(_)) => {
                    return Err(LedgerError::storage("stock key lock poisoned"));
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(LedgerError::timeout(format!(
                            "could not enter serialized section within {:?}",
                            self.acquire_window
                        )));
                    }
                    std::thread::yield_now();
                }
            }
        };

        let outcome = section();
        drop(guard);
        outcome
    }
}

impl Default for KeyLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
