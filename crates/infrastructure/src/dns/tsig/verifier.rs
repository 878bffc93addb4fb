use super::mac::{compute, matches, request_mac_prefix, tsig_variables};
use super::{unix_now, VerifyError};
use crate::dns::wire::{Layout, Message, HEADER_LEN};
use ferrous_nsupdate_domain::{AuthFailure, Rcode, TsigAlgorithm, TsigKey};
use tracing::debug;

/// Decodes and verifies a signed message against `key` at the current time.
///
/// For a response, `request_mac` is the MAC of the request it answers.
pub fn verify(
    bytes: &[u8],
    key: &TsigKey,
    request_mac: Option<&[u8]>,
) -> Result<Rcode, VerifyError> {
    verify_at(bytes, key, request_mac, unix_now())
}

pub fn verify_at(
    bytes: &[u8],
    key: &TsigKey,
    request_mac: Option<&[u8]>,
    now: u64,
) -> Result<Rcode, VerifyError> {
    let (message, layout) = Message::decode_with_layout(bytes)?;
    verify_decoded(&message, &layout, bytes, key, request_mac, now).map_err(VerifyError::Auth)
}

/// Verifies an already decoded message. `bytes` must be the buffer it was
/// decoded from, since the MAC covers the original encoding.
///
/// Checks run in this order: presence, key and algorithm, the MAC, the error
/// field reported by the peer, then the time window. A reply with an error and
/// no MAC (BADKEY, BADSIG) cannot be authenticated and is reported as is.
pub fn verify_decoded(
    message: &Message,
    layout: &Layout,
    bytes: &[u8],
    key: &TsigKey,
    request_mac: Option<&[u8]>,
    now: u64,
) -> Result<Rcode, AuthFailure> {
    let (tsig, offset) = match (&message.tsig, layout.tsig_offset) {
        (Some(tsig), Some(offset)) if (HEADER_LEN..=bytes.len()).contains(&offset) => (tsig, offset),
        _ => return Err(AuthFailure::Unsigned),
    };

    let algorithm = TsigAlgorithm::from_name(&tsig.algorithm);
    if tsig.key_name != key.name || algorithm != Some(key.algorithm) {
        debug!(
            key = %tsig.key_name,
            algorithm = %tsig.algorithm,
            "TSIG signed with an unexpected key"
        );
        return Err(AuthFailure::KeyMismatch);
    }

    if tsig.error != 0 && tsig.mac.is_empty() {
        return Err(AuthFailure::from_tsig_error(tsig.error));
    }

    let mut unsigned = bytes[..offset].to_vec();
    let arcount = u16::from_be_bytes([unsigned[10], unsigned[11]]).saturating_sub(1);
    unsigned[0..2].copy_from_slice(&tsig.original_id.to_be_bytes());
    unsigned[10..12].copy_from_slice(&arcount.to_be_bytes());

    let variables = tsig_variables(
        &tsig.key_name,
        &tsig.algorithm,
        tsig.time_signed,
        tsig.fudge,
        tsig.error,
        &tsig.other,
    );
    let prefix = request_mac_prefix(request_mac);
    let expected = compute(key.algorithm, key.secret(), &[&prefix, &unsigned, &variables])
        .map_err(|_| AuthFailure::BadKey)?;

    if !matches(&expected, &tsig.mac) {
        return Err(AuthFailure::BadSig);
    }

    if tsig.error != 0 {
        return Err(AuthFailure::from_tsig_error(tsig.error));
    }

    if now.abs_diff(tsig.time_signed) > u64::from(tsig.fudge) {
        debug!(
            now = now,
            time_signed = tsig.time_signed,
            fudge = tsig.fudge,
            "TSIG time outside the fudge window"
        );
        return Err(AuthFailure::BadTime);
    }

    Ok(message.header.rcode)
}
