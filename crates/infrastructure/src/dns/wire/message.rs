use super::decoder::Decoder;
use super::encoder::Encoder;
use super::header::{Header, HEADER_LEN};
use super::{DecodeError, EncodeError};
use ferrous_nsupdate_domain::{DnsClass, DnsName, RecordType, ResourceRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DnsName,
    pub qtype: RecordType,
    pub qclass: DnsClass,
}

/// TSIG pseudo-record (RFC 8945 §4.2). Owner is the key name, class ANY, TTL 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigRecord {
    pub key_name: DnsName,
    pub algorithm: DnsName,
    /// Seconds since the epoch, 48 bits on the wire
    pub time_signed: u64,
    pub fudge: u16,
    pub mac: Vec<u8>,
    pub original_id: u16,
    pub error: u16,
    pub other: Vec<u8>,
}

/// A DNS message. For UPDATE the four sections are zone, prerequisite, update
/// and additional (RFC 2136 §2); for QUERY they are question, answer, authority
/// and additional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub zones: Vec<Question>,
    pub prerequisites: Vec<ResourceRecord>,
    pub updates: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
    /// Always the last record of the additional section when present.
    pub tsig: Option<TsigRecord>,
}

/// Where things sit in the buffer a message was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// Offset of the first byte of the TSIG record, if the message has one.
    pub tsig_offset: Option<usize>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            zones: Vec::new(),
            prerequisites: Vec::new(),
            updates: Vec::new(),
            additionals: Vec::new(),
            tsig: None,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let arcount = self.additionals.len() + usize::from(self.tsig.is_some());
        let mut encoder = Encoder::with_capacity(512);

        encoder.write_u16(self.header.id);
        encoder.write_u16(self.header.flags());
        encoder.write_u16(count("zone", self.zones.len())?);
        encoder.write_u16(count("prerequisite", self.prerequisites.len())?);
        encoder.write_u16(count("update", self.updates.len())?);
        encoder.write_u16(count("additional", arcount)?);

        for question in &self.zones {
            encoder.write_name(&question.name, true);
            encoder.write_u16(question.qtype.to_u16());
            encoder.write_u16(question.qclass.to_u16());
        }
        for record in self
            .prerequisites
            .iter()
            .chain(&self.updates)
            .chain(&self.additionals)
        {
            encoder.write_record(record)?;
        }
        if let Some(tsig) = &self.tsig {
            encoder.write_tsig(tsig)?;
        }

        Ok(encoder.finish())
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with_layout(buf).map(|(message, _)| message)
    }

    pub fn decode_with_layout(buf: &[u8]) -> Result<(Self, Layout), DecodeError> {
        let header = Header::peek(buf)?;
        let mut decoder = Decoder::new(buf, HEADER_LEN);
        let zcount = u16::from_be_bytes([buf[4], buf[5]]);
        let prcount = u16::from_be_bytes([buf[6], buf[7]]);
        let upcount = u16::from_be_bytes([buf[8], buf[9]]);
        let adcount = u16::from_be_bytes([buf[10], buf[11]]);

        let mut message = Message::new(header);
        let mut layout = Layout::default();

        for _ in 0..zcount {
            message.zones.push(decoder.read_question()?);
        }
        for _ in 0..prcount {
            message.prerequisites.push(decoder.read_record()?);
        }
        for _ in 0..upcount {
            message.updates.push(decoder.read_record()?);
        }
        for i in 0..adcount {
            let start = decoder.position();
            match decoder.read_additional()? {
                super::decoder::Additional::Record(record) => message.additionals.push(record),
                super::decoder::Additional::Tsig(tsig) => {
                    if i + 1 != adcount {
                        return Err(DecodeError::MisplacedTsig);
                    }
                    layout.tsig_offset = Some(start);
                    message.tsig = Some(tsig);
                }
            }
        }

        let remaining = buf.len() - decoder.position();
        if remaining != 0 {
            return Err(DecodeError::TrailingBytes(remaining));
        }

        Ok((message, layout))
    }
}

fn count(section: &'static str, len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::TooManyRecords {
        section,
        count: len,
    })
}
