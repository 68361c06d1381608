//! # Waiter
//!
//! The admission limiter of the corrected protocol. The waiter hands out at
//! most N-1 table permits, so at any instant at least one seated philosopher
//! faces no contention on one side and can finish its acquisition chain —
//! the circular-wait precondition can never close.
//!
//! A permit is held for the entire acquire-eat-release span and returned
//! only after both forks are back on the table.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Semaphore, SemaphorePermit};

/// Counting permit pool with a fixed capacity of N-1.
pub struct Waiter {
    permits: Semaphore,
    capacity: usize,
    inside: AtomicUsize,
    peak_inside: AtomicUsize,
}

/// RAII table permit; returned to the waiter on drop.
pub struct TablePermit<'a> {
    waiter: &'a Waiter,
    _inner: SemaphorePermit<'a>,
}

impl Waiter {
    /// Creates a waiter admitting at most `capacity` philosophers at once.
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Semaphore::new(capacity),
            capacity,
            inside: AtomicUsize::new(0),
            peak_inside: AtomicUsize::new(0),
        }
    }

    /// Blocks until fewer than `capacity` philosophers are seated, then
    /// admits the caller.
    pub async fn enter(&self) -> TablePermit<'_> {
        // The semaphore is owned by the waiter and never closed, so acquire
        // cannot fail.
        let inner = self
            .permits
            .acquire()
            .await
            .expect("waiter semaphore is never closed");
        let now = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_inside.fetch_max(now, Ordering::SeqCst);
        TablePermit {
            waiter: self,
            _inner: inner,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Philosophers currently admitted.
    pub fn inside(&self) -> usize {
        self.inside.load(Ordering::SeqCst)
    }

    /// Highest admission count ever observed; must never exceed capacity.
    pub fn peak_inside(&self) -> usize {
        self.peak_inside.load(Ordering::SeqCst)
    }
}

impl Drop for TablePermit<'_> {
    fn drop(&mut self) {
        self.waiter.inside.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn admission_is_bounded_by_capacity() {
        let waiter = Arc::new(Waiter::new(4));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let waiter = waiter.clone();
            handles.push(tokio::spawn(async move {
                let _permit = waiter.enter().await;
                tokio::time::sleep(Duration::from_millis(10)).await;
            }));
        }
        for handle in handles {
            handle.await.expect("admitted task should finish");
        }

        assert!(waiter.peak_inside() <= 4, "admission limiter overshot");
        assert_eq!(waiter.inside(), 0);
    }
}
