mod dns_update_client;

pub use dns_update_client::DnsUpdateClient;
