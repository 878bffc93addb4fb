//! TSIG transaction signatures (RFC 8945).

mod mac;
mod signer;
mod verifier;

pub use signer::{sign, sign_at, SignedMessage, TsigSigner};
pub use verifier::{verify, verify_at, verify_decoded};

use super::wire::{DecodeError, EncodeError};
use ferrous_nsupdate_domain::AuthFailure;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] EncodeError),

    #[error("key cannot be used with its algorithm: {0}")]
    InvalidKey(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("malformed message: {0}")]
    Malformed(#[from] DecodeError),

    #[error("TSIG verification failed: {0}")]
    Auth(AuthFailure),
}

/// Seconds since the epoch, as carried in the TSIG time field.
pub(crate) fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
