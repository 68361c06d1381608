//! # Fork
//!
//! One fork is one mutually-exclusive resource shared by the two
//! philosophers seated on either side of it. Acquisition blocks until the
//! fork is free; release wakes at most one waiter, with no fairness
//! guarantee among several. The lock is not reentrant, and a holder that
//! never releases starves every other waiter — that property is exactly the
//! deadlock vector the naive protocol demonstrates.
//!
//! The fork keeps two extra counters (current holders and the all-time
//! peak) so tests can assert the mutual-exclusion invariant from outside:
//! the peak must never exceed 1.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

/// A single fork in the ring.
pub struct Fork {
    id: usize,
    lock: Mutex<()>,
    holders: AtomicUsize,
    peak_holders: AtomicUsize,
}

/// RAII proof of holding a fork; the fork is released on drop.
///
/// Release order between two held forks is therefore the reverse of guard
/// declaration order, which is how the protocols release in reverse
/// acquisition order without any explicit unlock calls.
pub struct ForkGuard<'a> {
    fork: &'a Fork,
    _inner: MutexGuard<'a, ()>,
}

impl Fork {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            lock: Mutex::new(()),
            holders: AtomicUsize::new(0),
            peak_holders: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Blocks until the fork is free, then takes it.
    pub async fn acquire(&self) -> ForkGuard<'_> {
        let inner = self.lock.lock().await;
        let now = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_holders.fetch_max(now, Ordering::SeqCst);
        trace!(fork = self.id, "fork acquired");
        ForkGuard {
            fork: self,
            _inner: inner,
        }
    }

    /// Number of current holders. Only meaningful as 0 or 1; anything else
    /// would be a mutual-exclusion violation.
    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holders ever observed.
    pub fn peak_holders(&self) -> usize {
        self.peak_holders.load(Ordering::SeqCst)
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.fork.holders.fetch_sub(1, Ordering::SeqCst);
        trace!(fork = self.fork.id, "fork released");
    }
}

impl std::fmt::Debug for Fork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fork")
            .field("id", &self.id)
            .field("holders", &self.holders())
            .finish()
    }
}
