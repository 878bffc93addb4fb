use super::DecodeError;
use ferrous_nsupdate_domain::Rcode;

pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Query,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl Opcode {
    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => Opcode::Query,
            2 => Opcode::Status,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            other => Opcode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::Status => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::Other(code) => *code & 0x0F,
        }
    }
}

/// The fixed 12-byte header minus the section counts, which the codec derives
/// from the section lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// QR: set on responses
    pub response: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// Z, AD and CD bits, kept verbatim
    pub z: u8,
    pub rcode: Rcode,
}

impl Header {
    pub fn new(id: u16, opcode: Opcode) -> Self {
        Self {
            id,
            response: false,
            opcode,
            authoritative: false,
            truncated: false,
            recursion_desired: false,
            recursion_available: false,
            z: 0,
            rcode: Rcode::NoError,
        }
    }

    pub fn flags(&self) -> u16 {
        let mut hi = self.opcode.to_u8() << 3;
        if self.response {
            hi |= 0x80;
        }
        if self.authoritative {
            hi |= 0x04;
        }
        if self.truncated {
            hi |= 0x02;
        }
        if self.recursion_desired {
            hi |= 0x01;
        }

        let mut lo = ((self.z & 0x07) << 4) | self.rcode.to_u8();
        if self.recursion_available {
            lo |= 0x80;
        }

        u16::from_be_bytes([hi, lo])
    }

    pub fn from_parts(id: u16, flags: u16) -> Self {
        let [hi, lo] = flags.to_be_bytes();
        Self {
            id,
            response: hi & 0x80 != 0,
            opcode: Opcode::from_u8((hi >> 3) & 0x0F),
            authoritative: hi & 0x04 != 0,
            truncated: hi & 0x02 != 0,
            recursion_desired: hi & 0x01 != 0,
            recursion_available: lo & 0x80 != 0,
            z: (lo >> 4) & 0x07,
            rcode: Rcode::from_u8(lo & 0x0F),
        }
    }

    /// Reads just the header, e.g. to check the TC bit before a full decode.
    pub fn peek(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < HEADER_LEN {
            return Err(DecodeError::Truncated(buf.len()));
        }
        Ok(Self::from_parts(
            u16::from_be_bytes([buf[0], buf[1]]),
            u16::from_be_bytes([buf[2], buf[3]]),
        ))
    }
}
