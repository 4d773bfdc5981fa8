//! Pool configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a connection pool
///
/// Capacities and timeouts are fixed for the lifetime of the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of connections dialed synchronously at construction
    init_cap: usize,
    /// Maximum number of live connections, checked out or idle
    max_cap: usize,
    /// Timeout in milliseconds when waiting for a connection at capacity
    wait_timeout_ms: u64,
    /// Idle age in milliseconds past which a released connection is discarded
    idle_timeout_ms: u64,
}

impl PoolConfig {
    /// Create a pool configuration with the given initial and maximum sizes
    ///
    /// Capacity validation happens in [`Pool::new`](crate::Pool::new), which
    /// returns [`Error::InvalidCapacity`] rather than panicking.
    pub fn new(init_cap: usize, max_cap: usize) -> Self {
        Self {
            init_cap,
            max_cap,
            wait_timeout_ms: 30_000,
            idle_timeout_ms: 600_000,
        }
    }

    /// Set the acquire-wait timeout in milliseconds
    pub fn with_wait_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.wait_timeout_ms = timeout_ms;
        self
    }

    /// Set the idle-eviction timeout in milliseconds
    pub fn with_idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.idle_timeout_ms = timeout_ms;
        self
    }

    /// Get the initial capacity
    pub fn init_cap(&self) -> usize {
        self.init_cap
    }

    /// Get the maximum capacity
    pub fn max_cap(&self) -> usize {
        self.max_cap
    }

    /// Get the acquire-wait timeout as a Duration
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Get the idle-eviction timeout as a Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Check the capacity settings
    pub fn validate(&self) -> Result<()> {
        if self.init_cap > self.max_cap {
            return Err(Error::InvalidCapacity {
                init: self.init_cap,
                max: self.max_cap,
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    /// Defaults: 1/10 capacity, 30 second wait timeout, 10 minute idle timeout
    fn default() -> Self {
        Self::new(1, 10)
    }
}
