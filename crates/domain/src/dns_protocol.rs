use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// The primary master an update is sent to. May still need a hostname lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServerAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerAddr::Resolved(addr) => write!(f, "{}", addr),
            ServerAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn is_hostname(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 253
        && host
            .split('.')
            .all(|l| !l.is_empty() && l.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'))
}

impl FromStr for ServerAddr {
    type Err = DomainError;

    /// Accepts `IP`, `IP:PORT`, `[IPv6]:PORT`, `HOST` and `HOST:PORT`. Port defaults to 53.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(ServerAddr::Resolved(addr));
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(ServerAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            if let Ok(ip) = inner.parse::<IpAddr>() {
                return Ok(ServerAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
            }
        }

        let (host, port) = parse_host_port(s).unwrap_or((s, DEFAULT_DNS_PORT));
        let host = host.trim_end_matches('.');
        if !is_hostname(host) {
            return Err(DomainError::InvalidServerAddress(format!(
                "'{}'. Expected IP, IP:PORT, [IPv6]:PORT, HOST or HOST:PORT",
                s
            )));
        }
        Ok(ServerAddr::Unresolved {
            hostname: host.into(),
            port,
        })
    }
}
