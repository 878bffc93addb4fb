use crate::DomainError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// A domain name as an ordered list of labels, most specific first.
///
/// Labels keep the case they were created with. Comparison and hashing are
/// ASCII case-insensitive, as DNS requires (RFC 4343).
#[derive(Debug, Clone, Default)]
pub struct DnsName {
    labels: Vec<Box<[u8]>>,
}

impl DnsName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Parses a dotted name. A trailing dot is optional; `""` and `"."` are the root.
    pub fn from_ascii(name: &str) -> Result<Self, DomainError> {
        if name.is_empty() || name == "." {
            return Ok(Self::root());
        }

        let trimmed = name.strip_suffix('.').unwrap_or(name);
        let labels = trimmed
            .split('.')
            .map(|label| label.as_bytes().to_vec())
            .collect();

        Self::from_labels(labels)
            .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
    }

    /// Builds a name from raw wire labels, enforcing the RFC 1035 length limits.
    pub fn from_labels(labels: Vec<Vec<u8>>) -> Result<Self, DomainError> {
        let mut encoded_len = 1;
        let mut checked = Vec::with_capacity(labels.len());

        for label in labels {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName("empty label".to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label of {} bytes exceeds {}",
                    label.len(),
                    MAX_LABEL_LEN
                )));
            }
            encoded_len += label.len() + 1;
            checked.push(label.into_boxed_slice());
        }

        if encoded_len > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "encoded length {} exceeds {}",
                encoded_len, MAX_NAME_LEN
            )));
        }

        Ok(Self { labels: checked })
    }

    /// Resolves a name given relative to `zone`.
    ///
    /// `"@"` (or an empty string) is the zone apex, a name with a trailing dot is
    /// taken as absolute, anything else gets the zone appended.
    pub fn prepend_relative(name: &str, zone: &DnsName) -> Result<Self, DomainError> {
        if name.is_empty() || name == "@" {
            return Ok(zone.clone());
        }
        if name.ends_with('.') {
            return Self::from_ascii(name);
        }

        let mut labels: Vec<Vec<u8>> = name.split('.').map(|l| l.as_bytes().to_vec()).collect();
        labels.extend(zone.labels.iter().map(|l| l.to_vec()));

        Self::from_labels(labels).map_err(|e| {
            DomainError::InvalidDomainName(format!("'{}' in zone {}: {}", name, zone, e))
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(|l| l.as_ref())
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the uncompressed wire form, including the terminating zero.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// The name without its first `n` labels.
    pub fn suffix(&self, n: usize) -> DnsName {
        Self {
            labels: self.labels[n.min(self.labels.len())..].to_vec(),
        }
    }

    pub fn is_subdomain_of(&self, other: &DnsName) -> bool {
        if other.labels.len() > self.labels.len() {
            return false;
        }
        self.suffix(self.labels.len() - other.labels.len()) == *other
    }

    pub fn to_lowercase(&self) -> DnsName {
        Self {
            labels: self
                .labels
                .iter()
                .map(|l| l.to_ascii_lowercase().into_boxed_slice())
                .collect(),
        }
    }

    /// Uncompressed wire form, used for canonical TSIG input.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label);
        }
        out.push(0);
        out
    }
}

impl PartialEq for DnsName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for DnsName {}

impl Hash for DnsName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in &self.labels {
            state.write_usize(label.len());
            for b in label.iter() {
                state.write_u8(b.to_ascii_lowercase());
            }
        }
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in &self.labels {
            for &b in label.iter() {
                if b == b'.' || b == b'\\' {
                    write!(f, "\\{}", b as char)?;
                } else if b.is_ascii_graphic() {
                    write!(f, "{}", b as char)?;
                } else {
                    write!(f, "\\{:03}", b)?;
                }
            }
            write!(f, ".")?;
        }
        Ok(())
    }
}

impl FromStr for DnsName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}
