//! Bounded concurrent container for idle connections

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::{self, Instant};

use crate::conn::{PooledConn, Transport};
use crate::error::Error;

/// Holds checked-in connections, bounded at the pool's maximum capacity
///
/// Supports non-blocking take and insert plus a blocking take with a
/// deadline. No ordering is guaranteed among blocked takers beyond every
/// insert waking one of them.
pub(crate) struct IdleStore<T: Transport> {
    capacity: usize,
    slots: Mutex<VecDeque<PooledConn<T>>>,
    available: Notify,
    closed: AtomicBool,
}

impl<T: Transport> IdleStore<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Notify::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub(crate) fn try_take(&self) -> Option<PooledConn<T>> {
        self.slots.lock().pop_front()
    }

    /// Take a connection, waiting up to `wait` for one to be inserted
    ///
    /// Fails with [`Error::Closed`] if the store is drained while waiting
    /// and [`Error::AcquireTimeout`] once the deadline passes.
    pub(crate) async fn take_timeout(&self, wait: Duration) -> Result<PooledConn<T>, Error> {
        let deadline = Instant::now() + wait;
        loop {
            // register before re-checking so an insert between the check
            // and the await leaves a stored permit
            let notified = self.available.notified();
            if self.closed.load(Ordering::Acquire) {
                return Err(Error::Closed);
            }
            if let Some(conn) = self.try_take() {
                return Ok(conn);
            }
            if time::timeout_at(deadline, notified).await.is_err() {
                return Err(Error::AcquireTimeout(wait));
            }
        }
    }

    /// Non-blocking insert; hands the connection back when the store is
    /// full or already drained
    pub(crate) fn try_put(&self, conn: PooledConn<T>) -> Result<(), PooledConn<T>> {
        {
            let mut slots = self.slots.lock();
            if self.closed.load(Ordering::Acquire) || slots.len() >= self.capacity {
                return Err(conn);
            }
            slots.push_back(conn);
        }
        self.available.notify_one();
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Empty the store and refuse all further inserts
    ///
    /// Idempotent. Blocked takers are woken and observe the closed state.
    pub(crate) fn drain(&self) -> Vec<PooledConn<T>> {
        let drained: Vec<_> = {
            let mut slots = self.slots.lock();
            self.closed.store(true, Ordering::Release);
            slots.drain(..).collect()
        };
        self.available.notify_waiters();
        drained
    }
}
