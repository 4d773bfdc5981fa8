//! Pool statistics types

use serde::{Deserialize, Serialize};

/// Snapshot of a pool's current state
///
/// Every field is an independently racy observation; values may disagree
/// with each other under concurrent traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Maximum number of live connections the pool allows
    max_cap: usize,
    /// Live connections, checked out or idle
    alive: usize,
    /// Advisory idle counter
    idle: usize,
    /// Connections physically present in the idle store
    store_size: usize,
    /// Acquires parked in the bounded wait
    waiting: usize,
}

impl PoolStats {
    /// Create new pool statistics
    pub fn new(max_cap: usize, alive: usize, idle: usize, store_size: usize, waiting: usize) -> Self {
        Self {
            max_cap,
            alive,
            idle,
            store_size,
            waiting,
        }
    }

    /// Get the maximum capacity
    pub fn max_cap(&self) -> usize {
        self.max_cap
    }

    /// Get the number of live connections
    pub fn alive(&self) -> usize {
        self.alive
    }

    /// Get the advisory idle count
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Get the number of connections resident in the idle store
    pub fn store_size(&self) -> usize {
        self.store_size
    }

    /// Get the number of waiting acquires
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Live connections as a fraction of maximum capacity (0.0 to 1.0)
    ///
    /// Returns 0.0 for a zero-capacity pool.
    pub fn utilization(&self) -> f64 {
        if self.max_cap == 0 {
            0.0
        } else {
            self.alive as f64 / self.max_cap as f64
        }
    }

    /// Whether the pool is at capacity with nothing idle
    pub fn is_saturated(&self) -> bool {
        self.max_cap > 0 && self.alive >= self.max_cap && self.store_size == 0
    }
}
