use super::mac::{compute, request_mac_prefix, tsig_variables};
use super::{unix_now, SignError};
use crate::dns::wire::{append_tsig, Message, TsigRecord};
use ferrous_nsupdate_domain::{TsigKey, DEFAULT_FUDGE};

/// A message ready for the wire, plus what is needed to check the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub id: u16,
    pub bytes: Vec<u8>,
    pub mac: Vec<u8>,
}

/// Builds the TSIG record for a message and appends it.
///
/// Defaults to the current time, a fudge of 300 seconds and error 0. Servers
/// and tests may override each of those.
pub struct TsigSigner<'k> {
    key: &'k TsigKey,
    time_signed: Option<u64>,
    fudge: u16,
    error: u16,
    other: Vec<u8>,
}

impl<'k> TsigSigner<'k> {
    pub fn new(key: &'k TsigKey) -> Self {
        Self {
            key,
            time_signed: None,
            fudge: DEFAULT_FUDGE,
            error: 0,
            other: Vec::new(),
        }
    }

    pub fn at(mut self, time_signed: u64) -> Self {
        self.time_signed = Some(time_signed);
        self
    }

    pub fn fudge(mut self, fudge: u16) -> Self {
        self.fudge = fudge;
        self
    }

    pub fn error(mut self, error: u16) -> Self {
        self.error = error;
        self
    }

    pub fn other(mut self, other: Vec<u8>) -> Self {
        self.other = other;
        self
    }

    /// Signs `message`. A response is signed over the request MAC as well.
    ///
    /// Any TSIG already present on `message` is replaced.
    pub fn sign(
        &self,
        message: &Message,
        request_mac: Option<&[u8]>,
    ) -> Result<SignedMessage, SignError> {
        let mut bytes = if message.tsig.is_some() {
            let mut unsigned = message.clone();
            unsigned.tsig = None;
            unsigned.encode()?
        } else {
            message.encode()?
        };

        let time_signed = self.time_signed.unwrap_or_else(unix_now);
        let algorithm = self.key.algorithm.name();
        let variables = tsig_variables(
            &self.key.name,
            &algorithm,
            time_signed,
            self.fudge,
            self.error,
            &self.other,
        );
        let prefix = request_mac_prefix(request_mac);

        let mac = compute(
            self.key.algorithm,
            self.key.secret(),
            &[&prefix, &bytes, &variables],
        )
        .map_err(|e| SignError::InvalidKey(e.to_string()))?;

        let tsig = TsigRecord {
            key_name: self.key.name.clone(),
            algorithm,
            time_signed,
            fudge: self.fudge,
            mac: mac.clone(),
            original_id: message.header.id,
            error: self.error,
            other: self.other.clone(),
        };
        append_tsig(&mut bytes, &tsig)?;

        Ok(SignedMessage {
            id: message.header.id,
            bytes,
            mac,
        })
    }
}

/// Signs a request with the current time and the default fudge.
pub fn sign(message: &Message, key: &TsigKey) -> Result<SignedMessage, SignError> {
    TsigSigner::new(key).sign(message, None)
}

/// Signs at a fixed time, over `request_mac` when `message` is a response.
pub fn sign_at(
    message: &Message,
    key: &TsigKey,
    request_mac: Option<&[u8]>,
    time_signed: u64,
) -> Result<SignedMessage, SignError> {
    TsigSigner::new(key).at(time_signed).sign(message, request_mac)
}
