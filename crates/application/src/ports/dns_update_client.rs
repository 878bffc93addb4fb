use async_trait::async_trait;
use ferrous_nsupdate_domain::{UpdateRequest, UpdateResult};

/// Performs one signed dynamic update against the request's server.
///
/// Implementations never return an error: every failure is classified into
/// the [`UpdateResult`].
#[async_trait]
pub trait DnsUpdateClient: Send + Sync {
    async fn update(&self, request: &UpdateRequest) -> UpdateResult;
}
