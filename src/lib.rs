//! wirepool - Bounded async connection pooling for a fixed backend
//!
//! This crate amortizes transport-connection setup by reusing a bounded
//! set of connections across concurrent callers. Acquisition is
//! timeout-bounded, idle connections are evicted at release time, and
//! shutdown closes everything exactly once. The pool speaks no
//! application protocol: callers get the raw transport handle and do
//! their own framing, reporting broken transports back through the
//! wrapper's validity flag.

mod conn;
mod error;
pub mod pool;
mod tcp;

pub use conn::{Connector, PooledConn, Transport};
pub use error::{Error, Result};
pub use pool::{Pool, PoolConfig, PoolStats, ReleaseOutcome};
pub use tcp::TcpConnector;
