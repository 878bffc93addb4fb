//! TSIG key material and failure reasons (RFC 2845, RFC 8945).

use crate::{DnsName, DomainError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{compiler_fence, Ordering};

/// Default allowed clock skew between signer and verifier, in seconds.
pub const DEFAULT_FUDGE: u16 = 300;

/// HMAC-MD5 is the default, as in the traditional `nsupdate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TsigAlgorithm {
    #[default]
    HmacMd5,
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl TsigAlgorithm {
    /// The algorithm name as it appears in the TSIG RDATA.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TsigAlgorithm::HmacMd5 => "hmac-md5.sig-alg.reg.int.",
            TsigAlgorithm::HmacSha1 => "hmac-sha1.",
            TsigAlgorithm::HmacSha224 => "hmac-sha224.",
            TsigAlgorithm::HmacSha256 => "hmac-sha256.",
            TsigAlgorithm::HmacSha384 => "hmac-sha384.",
            TsigAlgorithm::HmacSha512 => "hmac-sha512.",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            TsigAlgorithm::HmacMd5 => "hmac-md5",
            TsigAlgorithm::HmacSha1 => "hmac-sha1",
            TsigAlgorithm::HmacSha224 => "hmac-sha224",
            TsigAlgorithm::HmacSha256 => "hmac-sha256",
            TsigAlgorithm::HmacSha384 => "hmac-sha384",
            TsigAlgorithm::HmacSha512 => "hmac-sha512",
        }
    }

    pub fn name(&self) -> DnsName {
        // The wire names are constants well inside the name limits.
        DnsName::from_ascii(self.wire_name()).unwrap_or_default()
    }

    pub fn from_name(name: &DnsName) -> Option<Self> {
        [
            TsigAlgorithm::HmacMd5,
            TsigAlgorithm::HmacSha1,
            TsigAlgorithm::HmacSha224,
            TsigAlgorithm::HmacSha256,
            TsigAlgorithm::HmacSha384,
            TsigAlgorithm::HmacSha512,
        ]
        .into_iter()
        .find(|alg| alg.name() == *name)
    }

    /// Full MAC length in bytes.
    pub fn mac_len(&self) -> usize {
        match self {
            TsigAlgorithm::HmacMd5 => 16,
            TsigAlgorithm::HmacSha1 => 20,
            TsigAlgorithm::HmacSha224 => 28,
            TsigAlgorithm::HmacSha256 => 32,
            TsigAlgorithm::HmacSha384 => 48,
            TsigAlgorithm::HmacSha512 => 64,
        }
    }
}

impl fmt::Display for TsigAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for TsigAlgorithm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let short = lower.trim_end_matches('.');
        match short {
            "hmac-md5" | "hmac-md5.sig-alg.reg.int" => Ok(TsigAlgorithm::HmacMd5),
            "hmac-sha1" => Ok(TsigAlgorithm::HmacSha1),
            "hmac-sha224" => Ok(TsigAlgorithm::HmacSha224),
            "hmac-sha256" => Ok(TsigAlgorithm::HmacSha256),
            "hmac-sha384" => Ok(TsigAlgorithm::HmacSha384),
            "hmac-sha512" => Ok(TsigAlgorithm::HmacSha512),
            _ => Err(DomainError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// A shared-secret TSIG key. The secret is wiped when the key is dropped.
#[derive(Clone)]
pub struct TsigKey {
    pub name: DnsName,
    pub algorithm: TsigAlgorithm,
    secret: Vec<u8>,
}

impl TsigKey {
    pub fn new(name: DnsName, algorithm: TsigAlgorithm, secret: Vec<u8>) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::InvalidSecret("secret is empty".to_string()));
        }
        Ok(Self {
            name,
            algorithm,
            secret,
        })
    }

    pub fn from_base64(name: &str, algorithm: TsigAlgorithm, secret: &str) -> Result<Self, DomainError> {
        let name = DnsName::from_ascii(name)?;
        let secret = BASE64
            .decode(secret.trim())
            .map_err(|e| DomainError::InvalidSecret(format!("not valid base64: {}", e)))?;
        Self::new(name, algorithm, secret)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl Drop for TsigKey {
    fn drop(&mut self) {
        wipe(&mut self.secret);
    }
}

/// Overwrites `bytes` with zeros using volatile stores the optimiser cannot elide.
pub fn wipe(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        // SAFETY: `byte` is a valid, aligned, exclusive reference.
        unsafe { std::ptr::write_volatile(byte, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}

/// Zeroes and empties a string holding secret material.
pub fn wipe_string(s: &mut String) {
    // SAFETY: NUL bytes are valid UTF-8, so the string stays well formed.
    wipe(unsafe { s.as_bytes_mut() });
    s.clear();
}

impl fmt::Debug for TsigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsigKey")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Why a TSIG exchange did not authenticate.
///
/// The `Bad*` variants mirror the TSIG error field; they are reported either by the
/// server (non-zero error in its TSIG) or by our own check of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    BadSig,
    BadKey,
    BadTime,
    BadMode,
    BadName,
    BadAlg,
    BadTrunc,
    UnknownError(u16),
    /// The server answered NOERROR without a TSIG record.
    Unsigned,
    /// The response was signed with a different key or algorithm.
    KeyMismatch,
}

impl AuthFailure {
    pub fn from_tsig_error(code: u16) -> Self {
        match code {
            16 => AuthFailure::BadSig,
            17 => AuthFailure::BadKey,
            18 => AuthFailure::BadTime,
            19 => AuthFailure::BadMode,
            20 => AuthFailure::BadName,
            21 => AuthFailure::BadAlg,
            22 => AuthFailure::BadTrunc,
            other => AuthFailure::UnknownError(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthFailure::BadSig => "BADSIG",
            AuthFailure::BadKey => "BADKEY",
            AuthFailure::BadTime => "BADTIME",
            AuthFailure::BadMode => "BADMODE",
            AuthFailure::BadName => "BADNAME",
            AuthFailure::BadAlg => "BADALG",
            AuthFailure::BadTrunc => "BADTRUNC",
            AuthFailure::UnknownError(_) => "TSIG ERROR",
            AuthFailure::Unsigned => "UNSIGNED RESPONSE",
            AuthFailure::KeyMismatch => "KEY MISMATCH",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::UnknownError(code) => write!(f, "TSIG ERROR {}", code),
            _ => write!(f, "{}", self.name()),
        }
    }
}
