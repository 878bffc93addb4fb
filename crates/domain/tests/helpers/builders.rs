#![allow(dead_code)]
use ferrous_nsupdate_domain::{
    DnsName, RecordData, ResourceRecord, ServerAddr, TsigAlgorithm, TsigKey, UpdateRequest,
};
use std::time::Duration;

pub const TEST_SECRET_B64: &str = "c2VjcmV0LWtleS1mb3ItdGVzdHM=";

pub struct UpdateRequestBuilder {
    zone: String,
    records: Vec<(String, RecordData)>,
    ttl: u64,
    algorithm: TsigAlgorithm,
    server: String,
    timeout: Duration,
}

impl UpdateRequestBuilder {
    pub fn new() -> Self {
        Self {
            zone: "example.org".to_string(),
            records: Vec::new(),
            ttl: 3600,
            algorithm: TsigAlgorithm::HmacSha256,
            server: "127.0.0.1:53".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn zone(mut self, zone: &str) -> Self {
        self.zone = zone.to_string();
        self
    }

    pub fn a(mut self, name: &str, ip: &str) -> Self {
        self.records
            .push((name.to_string(), RecordData::a_from_str(ip).unwrap()));
        self
    }

    pub fn txt(mut self, name: &str, tokens: &str) -> Self {
        self.records
            .push((name.to_string(), RecordData::txt_from_tokens(tokens).unwrap()));
        self
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn algorithm(mut self, algorithm: TsigAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn server(mut self, server: &str) -> Self {
        self.server = server.to_string();
        self
    }

    pub fn key(&self) -> TsigKey {
        TsigKey::from_base64("ddns-key.example.org", self.algorithm, TEST_SECRET_B64).unwrap()
    }

    pub fn build(self) -> UpdateRequest {
        let zone = DnsName::from_ascii(&self.zone).unwrap();
        let records = self
            .records
            .iter()
            .map(|(name, data)| {
                let name = DnsName::prepend_relative(name, &zone).unwrap();
                ResourceRecord::new(name, self.ttl, data.clone()).unwrap()
            })
            .collect();
        let server: ServerAddr = self.server.parse().unwrap();
        UpdateRequest::new(zone, records, self.key(), server, self.timeout).unwrap()
    }
}

impl Default for UpdateRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
