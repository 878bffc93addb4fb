use thiserror::Error;

/// Why a buffer could not be decoded as a DNS message. Decoding never panics;
/// every malformed input ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("message truncated at offset {0}")]
    Truncated(usize),

    #[error("unsupported label type 0x{0:02x}")]
    BadLabelType(u8),

    #[error("compression pointer at offset {at} to {target} does not point backwards")]
    BadPointer { at: usize, target: usize },

    #[error("domain name exceeds 255 bytes")]
    NameTooLong,

    #[error("RDLENGTH {rdlength} at offset {at} runs past the end of the message")]
    RdataOverrun { at: usize, rdlength: usize },

    #[error("malformed {rtype} RDATA: {reason}")]
    BadRdata { rtype: String, reason: String },

    #[error("TSIG record must be the last additional record")]
    MisplacedTsig,

    #[error("{0} trailing bytes after the last record")]
    TrailingBytes(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("too many records in {section} section: {count}")]
    TooManyRecords { section: &'static str, count: usize },

    #[error("RDATA of {0} bytes does not fit RDLENGTH")]
    RdataTooLong(usize),

    #[error("TXT character-string of {0} bytes exceeds 255")]
    CharacterStringTooLong(usize),

    #[error("buffer of {0} bytes has no complete header")]
    MissingHeader(usize),
}
