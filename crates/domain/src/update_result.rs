use crate::{AuthFailure, Rcode};
use serde::Serialize;
use std::fmt;

/// Classified result of one update exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// The server applied the update (NOERROR).
    Success,
    /// The server processed the message and declined it with this rcode.
    ServerRejected(Rcode),
    AuthenticationFailure(AuthFailure),
    /// No answer before the deadline, or the exchange was cancelled.
    Timeout,
    TransportError(String),
}

impl UpdateResult {
    pub fn from_rcode(rcode: Rcode) -> Self {
        match rcode {
            Rcode::NoError => UpdateResult::Success,
            other => UpdateResult::ServerRejected(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpdateResult::Success)
    }

    /// NOTAUTH and TSIG failures: the caller must fix the key or zone, not retry.
    pub fn is_fatal(&self) -> bool {
        match self {
            UpdateResult::ServerRejected(rcode) => rcode.is_fatal(),
            UpdateResult::AuthenticationFailure(_) => true,
            _ => false,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, UpdateResult::Timeout | UpdateResult::TransportError(_))
    }

    /// Short status: "OK", an rcode name, a TSIG error name, "TIMEOUT" or the transport detail.
    pub fn message(&self) -> String {
        match self {
            UpdateResult::Success => "OK".to_string(),
            UpdateResult::ServerRejected(rcode) => rcode.to_string(),
            UpdateResult::AuthenticationFailure(reason) => reason.to_string(),
            UpdateResult::Timeout => "TIMEOUT".to_string(),
            UpdateResult::TransportError(detail) => detail.clone(),
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The result object reported to whoever invoked the update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub changed: bool,
    pub failed: bool,
    pub fatal: bool,
    pub msg: String,
    pub zone: String,
    pub server: String,
}

impl UpdateOutcome {
    pub fn from_result(result: &UpdateResult, zone: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            changed: result.is_success(),
            failed: !result.is_success(),
            fatal: result.is_fatal(),
            msg: result.message(),
            zone: zone.into(),
            server: server.into(),
        }
    }

    /// Human-readable line with the server/zone context.
    pub fn describe(&self) -> String {
        if self.failed {
            format!(
                "update of zone {} via {} failed: {}",
                self.zone, self.server, self.msg
            )
        } else {
            format!("update of zone {} via {}: {}", self.zone, self.server, self.msg)
        }
    }
}
