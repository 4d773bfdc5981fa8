//! TCP dialing connector

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::conn::{Connector, Transport};
use crate::error::Result;

#[async_trait]
impl Transport for TcpStream {
    async fn close(&mut self) -> Result<()> {
        AsyncWriteExt::shutdown(self).await?;
        Ok(())
    }
}

/// Connector that dials a fixed backend address over TCP
#[derive(Debug, Clone)]
pub struct TcpConnector {
    addr: String,
}

impl TcpConnector {
    /// Create a connector for the given `host:port` address
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Get the backend address
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Conn = TcpStream;

    async fn connect(&self) -> Result<TcpStream> {
        tracing::debug!(addr = %self.addr, "dialing backend");
        let stream = TcpStream::connect(&self.addr).await?;
        Ok(stream)
    }
}
