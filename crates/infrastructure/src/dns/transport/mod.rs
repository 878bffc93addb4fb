pub mod client;
pub mod resolver;
pub mod tcp;
pub mod udp;

pub use client::UpdateClient;

use async_trait::async_trait;
use ferrous_nsupdate_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    /// "UDP" or "TCP"
    pub protocol_used: &'static str,
}

/// One request/response exchange with a single server.
///
/// `timeout` is a hard deadline for the whole exchange.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

/// Transaction id of an encoded message, if it has one.
pub(crate) fn message_id(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

pub(crate) fn request_id(message_bytes: &[u8]) -> Result<u16, DomainError> {
    message_id(message_bytes).ok_or_else(|| {
        DomainError::IoError(format!(
            "refusing to send a {} byte message",
            message_bytes.len()
        ))
    })
}

pub(crate) fn map_io_error(error: io::Error, server: SocketAddr) -> DomainError {
    match error.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            DomainError::TransportConnectionReset {
                server: server.to_string(),
            }
        }
        _ => DomainError::IoError(format!("{}: {}", server, error)),
    }
}
