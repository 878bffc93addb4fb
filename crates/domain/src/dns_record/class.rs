use std::fmt;

/// RR CLASS values. UPDATE uses `ANY` and `NONE` as delete markers (RFC 2136 §2.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsClass {
    IN,
    NONE,
    ANY,
    Unknown(u16),
}

impl DnsClass {
    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::NONE => 254,
            DnsClass::ANY => 255,
            DnsClass::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => DnsClass::IN,
            254 => DnsClass::NONE,
            255 => DnsClass::ANY,
            _ => DnsClass::Unknown(code),
        }
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsClass::IN => write!(f, "IN"),
            DnsClass::NONE => write!(f, "NONE"),
            DnsClass::ANY => write!(f, "ANY"),
            DnsClass::Unknown(code) => write!(f, "CLASS{}", code),
        }
    }
}
