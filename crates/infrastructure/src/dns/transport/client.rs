use super::resolver::resolve;
use super::tcp::TcpTransport;
use super::udp::UdpTransport;
use super::{DnsTransport, TransportResponse};
use crate::dns::tsig::{unix_now, SignedMessage};
use crate::dns::update::ResponseParser;
use crate::dns::wire::Header;
use ferrous_nsupdate_domain::{DomainError, ServerAddr, TsigKey, UpdateResult};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Sends a signed UPDATE over UDP, falls back to TCP when the answer is
/// truncated, and classifies whatever comes back.
///
/// There is no retry: one UDP attempt, and at most one TCP attempt.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    cancel: Option<CancellationToken>,
}

impl UpdateClient {
    pub fn new() -> Self {
        Self { cancel: None }
    }

    /// Cancelling `token` ends an in-flight exchange with [`UpdateResult::Timeout`].
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
        }
    }

    pub async fn send(
        &self,
        request: &SignedMessage,
        key: &TsigKey,
        server: &ServerAddr,
        timeout: Duration,
    ) -> UpdateResult {
        match self.exchange(request, server, timeout).await {
            Ok(response) => {
                debug!(
                    server = %server,
                    protocol = response.protocol_used,
                    bytes_received = response.bytes.len(),
                    "UPDATE response received"
                );
                ResponseParser::classify(&response.bytes, request, key, unix_now())
            }
            Err(e) if e.is_timeout() => {
                debug!(server = %server, error = %e, "UPDATE exchange timed out");
                UpdateResult::Timeout
            }
            Err(e) => UpdateResult::TransportError(e.to_string()),
        }
    }

    async fn exchange(
        &self,
        request: &SignedMessage,
        server: &ServerAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let attempt = Self::exchange_with_fallback(&request.bytes, server, timeout);

        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(DomainError::TransportCancelled {
                    server: server.to_string(),
                }),
                result = attempt => result,
            },
            None => attempt.await,
        }
    }

    async fn exchange_with_fallback(
        message_bytes: &[u8],
        server: &ServerAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve(server, timeout).await?;

        let udp = UdpTransport::new(server_addr);
        let response = udp.send(message_bytes, timeout).await?;

        let truncated = Header::peek(&response.bytes)
            .map(|header| header.truncated)
            .unwrap_or(false);
        if !truncated {
            return Ok(response);
        }

        info!(
            server = %server_addr,
            bytes_received = response.bytes.len(),
            "UDP response truncated, retrying over TCP"
        );

        TcpTransport::new(server_addr)
            .send(message_bytes, timeout)
            .await
    }
}
