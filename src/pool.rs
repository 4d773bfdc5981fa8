//! Connection pooling over caller-supplied transports
//!
//! This module provides the pool itself, its configuration, and the
//! statistics snapshot. Connections are checked out explicitly and handed
//! back explicitly; the caller reports broken transports through the
//! wrapper's validity flag.
//!
//! # Example
//!
//! ```ignore
//! use wirepool::{Pool, PoolConfig, TcpConnector};
//!
//! let config = PoolConfig::new(2, 10)
//!     .with_wait_timeout_ms(5000)
//!     .with_idle_timeout_ms(300_000);
//!
//! let pool = Pool::new(config, TcpConnector::new("127.0.0.1:4000")).await?;
//! let mut conn = pool.acquire().await?;
//! // Use the transport...
//! pool.release(conn).await?;
//! pool.shutdown().await;
//! ```

mod config;
mod pool;
mod stats;
mod store;


pub use config::PoolConfig;
pub use pool::{Pool, ReleaseOutcome};
pub use stats::PoolStats;
