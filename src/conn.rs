//! Transport and connector traits plus the pooled connection wrapper

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::Result;

/// A raw transport handle the pool can hand out and close
///
/// The pool never reads or writes the transport itself; framing and
/// marshaling are the caller's business. Closing is the only operation
/// the pool needs.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Close the underlying transport
    async fn close(&mut self) -> Result<()>;
}

/// Factory trait producing new transport connections on demand
///
/// Typically a dialer for a fixed backend address. Errors are never
/// interpreted by the pool, only propagated.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// The concrete transport this connector produces
    type Conn: Transport;

    /// Establish a new connection to the backend
    async fn connect(&self) -> Result<Self::Conn>;
}

#[async_trait]
impl<C: Connector> Connector for Arc<C> {
    type Conn = C::Conn;

    async fn connect(&self) -> Result<Self::Conn> {
        (**self).connect().await
    }
}

/// A transport checked out of (or resident in) the pool
///
/// Exclusively owned by whoever holds it: the caller between `acquire`
/// and `release`, the idle store otherwise. Derefs to the transport for
/// I/O while checked out.
pub struct PooledConn<T: Transport> {
    transport: Option<T>,
    last_visit_at: Instant,
    invalid: bool,
}

impl<T: Transport> PooledConn<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self {
            transport: Some(transport),
            last_visit_at: Instant::now(),
            invalid: false,
        }
    }

    /// Mark the transport as broken after an observed I/O failure
    ///
    /// A connection released with this flag set is closed and never
    /// handed out again.
    pub fn mark_invalid(&mut self) {
        self.invalid = true;
    }

    /// Whether the caller has flagged the transport as broken
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Time since the connection was created or last re-admitted
    pub fn idle_for(&self) -> Duration {
        self.last_visit_at.elapsed()
    }

    pub(crate) fn touch(&mut self) {
        self.last_visit_at = Instant::now();
    }

    pub(crate) fn is_taken(&self) -> bool {
        self.transport.is_none()
    }

    pub(crate) async fn close(&mut self) -> Result<()> {
        match self.transport.take() {
            Some(mut transport) => transport.close().await,
            None => Ok(()),
        }
    }
}

impl<T: Transport> Deref for PooledConn<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.transport.as_ref().expect("transport taken")
    }
}

impl<T: Transport> DerefMut for PooledConn<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.transport.as_mut().expect("transport taken")
    }
}
