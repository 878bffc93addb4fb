//! DNS message codec (RFC 1035 §4, RFC 2136 §2).
//!
//! Encoding compresses owner names against earlier names in the same message.
//! Decoding is bounds-checked throughout and reports every malformation as a
//! [`DecodeError`].

mod decoder;
mod encoder;
mod error;
mod header;
mod message;

pub use encoder::append_tsig;
pub use error::{DecodeError, EncodeError};
pub use header::{Header, Opcode, HEADER_LEN};
pub use message::{Layout, Message, Question, TsigRecord};
