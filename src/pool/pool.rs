//! Connection pool implementation

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::conn::{Connector, PooledConn};
use crate::error::{Error, Result};

use super::config::PoolConfig;
use super::stats::PoolStats;
use super::store::IdleStore;

/// How `release` disposed of the connection it was handed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Re-admitted to the idle store, available for reuse
    Returned,
    /// Caller flagged the transport broken; closed and removed from circulation
    DiscardedInvalid,
    /// Idle past the eviction timeout; closed instead of recycled
    DiscardedStale,
    /// Idle store already full; closed and removed from circulation
    DiscardedFull,
    /// Pool was already shut down; the transport was closed
    PoolClosed,
}

/// Store and connector, detached together at shutdown
struct Shared<C: Connector> {
    store: Arc<IdleStore<C::Conn>>,
    connector: Arc<C>,
}

/// Advisory idle/alive counters, maintained outside the store's own lock
///
/// May transiently diverge from the store's true contents under
/// concurrent traffic.
struct Counters {
    idle: usize,
    alive: usize,
}

/// A pool of reusable transport connections to a fixed backend
///
/// Connections are checked out with [`acquire`](Pool::acquire) and handed
/// back with [`release`](Pool::release); ownership transfers fully each
/// way. The pool never probes connections itself: liveness is reported by
/// the caller through [`PooledConn::mark_invalid`].
pub struct Pool<C: Connector> {
    config: PoolConfig,
    shared: RwLock<Option<Shared<C>>>,
    counters: Mutex<Counters>,
    waiting: AtomicUsize,
}

impl<C: Connector> Pool<C> {
    /// Create a pool and synchronously dial `init_cap` connections
    ///
    /// Any single dial failure tears the partial pool down, closing
    /// whatever was already created, and returns [`Error::Initialize`]
    /// wrapping the connector's error. Invalid capacities
    /// (`init_cap > max_cap`) yield [`Error::InvalidCapacity`].
    pub async fn new(config: PoolConfig, connector: C) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(IdleStore::<C::Conn>::new(config.max_cap()));
        let connector = Arc::new(connector);

        for _ in 0..config.init_cap() {
            let transport = match connector.connect().await {
                Ok(transport) => transport,
                Err(err) => {
                    for mut conn in store.drain() {
                        let _ = conn.close().await;
                    }
                    return Err(Error::Initialize {
                        source: Box::new(err),
                    });
                }
            };
            if let Err(mut conn) = store.try_put(PooledConn::new(transport)) {
                // store capacity is max_cap, which bounds init_cap
                let _ = conn.close().await;
            }
        }

        tracing::debug!(
            init_cap = config.init_cap(),
            max_cap = config.max_cap(),
            "pool filled"
        );

        let counters = Counters {
            idle: config.init_cap(),
            alive: config.init_cap(),
        };
        Ok(Self {
            config,
            shared: RwLock::new(Some(Shared { store, connector })),
            counters: Mutex::new(counters),
            waiting: AtomicUsize::new(0),
        })
    }

    /// Snapshot the store and connector under the read lock
    fn snapshot(&self) -> Option<(Arc<IdleStore<C::Conn>>, Arc<C>)> {
        let guard = self.shared.read();
        guard
            .as_ref()
            .map(|shared| (Arc::clone(&shared.store), Arc::clone(&shared.connector)))
    }

    /// Check a connection out of the pool
    ///
    /// Serves from the idle store when possible, dials a new connection
    /// while under maximum capacity, and otherwise waits up to the
    /// configured timeout for a release. Connector errors propagate
    /// unchanged; the bounded wait is the only suspension point and its
    /// timeout the only cancellation mechanism.
    pub async fn acquire(&self) -> Result<PooledConn<C::Conn>> {
        let Some((store, connector)) = self.snapshot() else {
            return Err(Error::Closed);
        };

        if let Some(conn) = store.try_take() {
            let mut counters = self.counters.lock();
            counters.idle = counters.idle.saturating_sub(1);
            return Ok(conn);
        }

        let at_capacity = self.counters.lock().alive >= self.config.max_cap();
        if at_capacity {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            let waited = store.take_timeout(self.config.wait_timeout()).await;
            self.waiting.fetch_sub(1, Ordering::SeqCst);
            let conn = waited?;
            let mut counters = self.counters.lock();
            counters.idle = counters.idle.saturating_sub(1);
            return Ok(conn);
        }

        // dialed without holding the counter lock, so a slow backend never
        // stalls acquires served from the store
        let transport = connector.connect().await?;
        self.counters.lock().alive += 1;
        tracing::debug!("created connection on demand");
        Ok(PooledConn::new(transport))
    }

    /// Hand a connection back to the pool
    ///
    /// Invalid and stale connections are closed and dropped from
    /// circulation; a release against a shut-down pool closes the
    /// transport and still reports success. The only error is
    /// [`Error::NoConnection`], for a wrapper whose transport is gone.
    pub async fn release(&self, mut conn: PooledConn<C::Conn>) -> Result<ReleaseOutcome> {
        if conn.is_taken() {
            return Err(Error::NoConnection);
        }

        if conn.is_invalid() {
            self.discard_one();
            conn.close().await?;
            tracing::debug!("discarded invalid connection");
            return Ok(ReleaseOutcome::DiscardedInvalid);
        }

        let Some((store, _)) = self.snapshot() else {
            conn.close().await?;
            return Ok(ReleaseOutcome::PoolClosed);
        };

        if conn.idle_for() > self.config.idle_timeout() {
            self.discard_one();
            conn.close().await?;
            tracing::debug!("discarded stale connection");
            return Ok(ReleaseOutcome::DiscardedStale);
        }

        conn.touch();
        match store.try_put(conn) {
            Ok(()) => {
                self.counters.lock().idle += 1;
                Ok(ReleaseOutcome::Returned)
            }
            Err(mut conn) => {
                self.discard_one();
                conn.close().await?;
                tracing::debug!("discarded connection, idle store full");
                Ok(ReleaseOutcome::DiscardedFull)
            }
        }
    }

    /// Shut the pool down, closing every idle connection exactly once
    ///
    /// Idempotent. Acquires racing with shutdown either complete against
    /// the store as it was or fail with [`Error::Closed`]; releases that
    /// arrive afterwards close their connection and report
    /// [`ReleaseOutcome::PoolClosed`].
    pub async fn shutdown(&self) {
        let detached = self.shared.write().take();
        let Some(shared) = detached else {
            return;
        };

        let drained = shared.store.drain();
        let count = drained.len();
        tracing::info!(idle = count, "shutting down pool");
        for mut conn in drained {
            if let Err(err) = conn.close().await {
                tracing::warn!(error = %err, "failed to close idle connection");
            }
        }

        let mut counters = self.counters.lock();
        counters.idle = 0;
        counters.alive = counters.alive.saturating_sub(count);
    }

    /// Number of connections physically present in the idle store
    ///
    /// An instantaneous, racy snapshot; 0 once the pool is shut down.
    pub fn store_size(&self) -> usize {
        self.shared
            .read()
            .as_ref()
            .map_or(0, |shared| shared.store.len())
    }

    /// Advisory idle counter
    ///
    /// Maintained separately from the store, so it may transiently
    /// disagree with [`store_size`](Pool::store_size).
    pub fn idle_count(&self) -> usize {
        self.counters.lock().idle
    }

    /// Whether the pool has been shut down
    pub fn is_closed(&self) -> bool {
        self.shared.read().is_none()
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Approximate utilization snapshot
    ///
    /// Assembled from independently racy counters; telemetry, not a basis
    /// for correctness decisions.
    pub fn stats(&self) -> PoolStats {
        let (idle, alive) = {
            let counters = self.counters.lock();
            (counters.idle, counters.alive)
        };
        PoolStats::new(
            self.config.max_cap(),
            alive,
            idle,
            self.store_size(),
            self.waiting.load(Ordering::SeqCst),
        )
    }

    fn discard_one(&self) {
        let mut counters = self.counters.lock();
        counters.alive = counters.alive.saturating_sub(1);
    }
}
