use ferrous_nsupdate_domain::{DomainError, ServerAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves the server to one socket address. Literal addresses are returned
/// as they are; hostnames go through the system resolver under `timeout`.
pub async fn resolve(server: &ServerAddr, timeout: Duration) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match server {
        ServerAddr::Resolved(addr) => return Ok(*addr),
        ServerAddr::Unresolved { hostname, port } => (hostname, *port),
    };

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host((&**hostname, port)))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| DomainError::IoError(format!("DNS resolution failed for {}: {}", server, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::IoError(format!("No addresses found for {}", server)))
}
