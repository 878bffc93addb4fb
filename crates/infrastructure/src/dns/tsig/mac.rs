use ferrous_nsupdate_domain::{DnsName, TsigAlgorithm};
use hmac::digest::{InvalidLength, KeyInit};
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

/// HMAC over the concatenation of `parts`.
pub(super) fn compute(
    algorithm: TsigAlgorithm,
    secret: &[u8],
    parts: &[&[u8]],
) -> Result<Vec<u8>, InvalidLength> {
    match algorithm {
        TsigAlgorithm::HmacMd5 => keyed_digest::<Hmac<Md5>>(secret, parts),
        TsigAlgorithm::HmacSha1 => keyed_digest::<Hmac<Sha1>>(secret, parts),
        TsigAlgorithm::HmacSha224 => keyed_digest::<Hmac<Sha224>>(secret, parts),
        TsigAlgorithm::HmacSha256 => keyed_digest::<Hmac<Sha256>>(secret, parts),
        TsigAlgorithm::HmacSha384 => keyed_digest::<Hmac<Sha384>>(secret, parts),
        TsigAlgorithm::HmacSha512 => keyed_digest::<Hmac<Sha512>>(secret, parts),
    }
}

fn keyed_digest<M: Mac + KeyInit>(secret: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)?;
    for part in parts {
        Mac::update(&mut mac, part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Compares a received MAC against the expected one in constant time.
/// Truncated MACs are not accepted.
pub(super) fn matches(expected: &[u8], received: &[u8]) -> bool {
    expected.ct_eq(received).into()
}

/// The TSIG variables appended after the message when computing the MAC
/// (RFC 8945 §4.3.3). Names are lowercased and never compressed.
pub(super) fn tsig_variables(
    key_name: &DnsName,
    algorithm: &DnsName,
    time_signed: u64,
    fudge: u16,
    error: u16,
    other: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(key_name.encoded_len() + algorithm.encoded_len() + 18);
    out.extend_from_slice(&key_name.to_lowercase().to_wire());
    out.extend_from_slice(&255u16.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&algorithm.to_lowercase().to_wire());
    out.extend_from_slice(&((time_signed >> 32) as u16).to_be_bytes());
    out.extend_from_slice(&(time_signed as u32).to_be_bytes());
    out.extend_from_slice(&fudge.to_be_bytes());
    out.extend_from_slice(&error.to_be_bytes());
    out.extend_from_slice(&(other.len() as u16).to_be_bytes());
    out.extend_from_slice(other);
    out
}

/// Length-prefixed request MAC that leads the digest of a response.
pub(super) fn request_mac_prefix(request_mac: Option<&[u8]>) -> Vec<u8> {
    match request_mac {
        Some(mac) => {
            let mut out = Vec::with_capacity(mac.len() + 2);
            out.extend_from_slice(&(mac.len() as u16).to_be_bytes());
            out.extend_from_slice(mac);
            out
        }
        None => Vec::new(),
    }
}
