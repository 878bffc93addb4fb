use crate::dns::tsig::{verify_decoded, SignedMessage};
use crate::dns::wire::Message;
use ferrous_nsupdate_domain::{AuthFailure, Rcode, TsigKey, UpdateResult};
use tracing::{debug, warn};

/// Turns the bytes of an UPDATE response into an [`UpdateResult`].
pub struct ResponseParser;

impl ResponseParser {
    /// Classifies `bytes` as the answer to `request`. `now` is the local clock
    /// in seconds since the epoch, used for the TSIG time check.
    pub fn classify(
        bytes: &[u8],
        request: &SignedMessage,
        key: &TsigKey,
        now: u64,
    ) -> UpdateResult {
        let (message, layout) = match Message::decode_with_layout(bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(error = %e, bytes = bytes.len(), "Malformed UPDATE response");
                return UpdateResult::TransportError(format!("malformed response: {}", e));
            }
        };

        if !message.header.response {
            return UpdateResult::TransportError(
                "malformed response: QR bit not set".to_string(),
            );
        }

        let rcode = message.header.rcode;
        debug!(id = message.header.id, rcode = %rcode, signed = message.tsig.is_some(), "UPDATE response decoded");

        if message.tsig.is_none() {
            // Servers answer unknown keys with an unsigned NOTAUTH or REFUSED.
            return match rcode {
                Rcode::NoError => UpdateResult::AuthenticationFailure(AuthFailure::Unsigned),
                other => UpdateResult::ServerRejected(other),
            };
        }

        match verify_decoded(&message, &layout, bytes, key, Some(&request.mac), now) {
            Ok(rcode) => UpdateResult::from_rcode(rcode),
            Err(failure) => {
                warn!(reason = %failure, "UPDATE response failed TSIG verification");
                UpdateResult::AuthenticationFailure(failure)
            }
        }
    }
}
