//! Bounded multi-producer/multi-consumer queue with a lifecycle flag.
//!
//! Producers block while the queue is full and active; consumers block while
//! it is empty and active. Deactivation wakes every waiter: producers fail
//! fast, consumers keep draining whatever is already enqueued and only then
//! observe [`QueueError::Inactive`].

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

use thiserror::Error;

/// Error returned by queue operations once the lifecycle flag is down.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue has been deactivated.
    #[error("queue is inactive")]
    Inactive,
}

struct Inner<T> {
    items: VecDeque<T>,
    active: bool,
}

/// Fixed-capacity FIFO shared between pipeline stages.
pub struct ConcurrentQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> ConcurrentQueue<T> {
    /// Creates an active queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity.max(1)),
                active: true,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Moves `item` into the queue, blocking while it is full.
    ///
    /// # Errors
    ///
    /// [`QueueError::Inactive`] if the queue is (or becomes) deactivated.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        let mut inner = self.lock();
        while inner.active && inner.items.len() >= self.capacity {
            inner = self
                .not_full
                .wait(inner)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if !inner.active {
            return Err(QueueError::Inactive);
        }
        inner.items.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Takes the head item, blocking while the queue is empty and active.
    ///
    /// Already-enqueued items keep draining after deactivation.
    ///
    /// # Errors
    ///
    /// [`QueueError::Inactive`] once the queue is both empty and
    /// deactivated.
    pub fn pop(&self) -> Result<T, QueueError> {
        let mut inner = self.lock();
        while inner.items.is_empty() && inner.active {
            inner = self
                .not_empty
                .wait(inner)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        match inner.items.pop_front() {
            Some(item) => {
                self.not_full.notify_one();
                Ok(item)
            }
            None => Err(QueueError::Inactive),
        }
    }

    /// `true` while another item may still be popped: the queue is
    /// non-empty, or active so more may arrive.
    pub fn can_pop(&self) -> bool {
        let inner = self.lock();
        !inner.items.is_empty() || inner.active
    }

    /// Lifecycle flag state.
    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// Lowers the lifecycle flag and wakes every waiter; enqueued items keep
    /// draining to consumers.
    pub fn deactivate(&self) {
        let mut inner = self.lock();
        inner.active = false;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Deactivates and drops everything already enqueued.
    pub fn deactivate_and_clear(&self) {
        let mut inner = self.lock();
        inner.active = false;
        inner.items.clear();
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}
