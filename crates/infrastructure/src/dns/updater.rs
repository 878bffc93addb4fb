use super::transport::UpdateClient;
use super::tsig;
use super::update::UpdateBuilder;
use async_trait::async_trait;
use ferrous_nsupdate_application::ports::DnsUpdateClient;
use ferrous_nsupdate_domain::{UpdateRequest, UpdateResult};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Builds, signs, sends and classifies one dynamic update.
#[derive(Debug, Clone, Default)]
pub struct DnsUpdater {
    client: UpdateClient,
}

impl DnsUpdater {
    pub fn new() -> Self {
        Self {
            client: UpdateClient::new(),
        }
    }

    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            client: UpdateClient::with_cancellation(token),
        }
    }

    pub async fn update(&self, request: &UpdateRequest) -> UpdateResult {
        let message = UpdateBuilder::from_request(request);

        let signed = match tsig::sign(&message, request.key()) {
            Ok(signed) => signed,
            Err(e) => return UpdateResult::TransportError(format!("failed to sign update: {}", e)),
        };

        debug!(
            id = signed.id,
            zone = %request.zone(),
            server = %request.server(),
            algorithm = %request.key().algorithm,
            updates = message.updates.len(),
            bytes = signed.bytes.len(),
            "Sending signed UPDATE"
        );

        let result = self
            .client
            .send(&signed, request.key(), request.server(), request.timeout())
            .await;

        info!(
            zone = %request.zone(),
            server = %request.server(),
            result = %result,
            "UPDATE completed"
        );

        result
    }
}

#[async_trait]
impl DnsUpdateClient for DnsUpdater {
    async fn update(&self, request: &UpdateRequest) -> UpdateResult {
        DnsUpdater::update(self, request).await
    }
}
