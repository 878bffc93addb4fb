#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_nsupdate_application::ports::DnsUpdateClient;
use ferrous_nsupdate_domain::{UpdateRequest, UpdateResult};
use std::sync::{Arc, Mutex};

/// Answers every update with a fixed result and records the requests it saw.
#[derive(Clone)]
pub struct MockUpdateClient {
    result: UpdateResult,
    requests: Arc<Mutex<Vec<UpdateRequest>>>,
}

impl MockUpdateClient {
    pub fn new(result: UpdateResult) -> Self {
        Self {
            result,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(UpdateResult::Success)
    }

    pub fn requests(&self) -> Vec<UpdateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsUpdateClient for MockUpdateClient {
    async fn update(&self, request: &UpdateRequest) -> UpdateResult {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}
