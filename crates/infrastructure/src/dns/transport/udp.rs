//! UDP transport for UPDATE messages (RFC 1035 §4.2.1).
//!
//! The socket is connected to the server, so datagrams from other sources are
//! dropped by the kernel and ICMP errors surface as I/O errors. Responses with
//! the TC bit set are returned as they are; the caller retries over TCP.

use super::{map_io_error, message_id, request_id, DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_nsupdate_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 65535;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8], id: u16) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| map_io_error(e, self.server_addr))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| map_io_error(e, self.server_addr))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP update sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| map_io_error(e, self.server_addr))?;

            match message_id(&recv_buf[..bytes_received]) {
                Some(received) if received == id => {
                    debug!(
                        server = %self.server_addr,
                        bytes_received = bytes_received,
                        "UDP response received"
                    );
                    recv_buf.truncate(bytes_received);
                    return Ok(recv_buf);
                }
                received => {
                    warn!(
                        server = %self.server_addr,
                        expected_id = id,
                        received_id = ?received,
                        bytes_received = bytes_received,
                        "Skipping UDP datagram with unexpected transaction id"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let id = request_id(message_bytes)?;

        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes, id))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }
}
