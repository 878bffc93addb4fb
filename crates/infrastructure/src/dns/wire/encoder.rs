use super::header::HEADER_LEN;
use super::message::TsigRecord;
use super::EncodeError;
use ferrous_nsupdate_domain::{DnsName, RecordData, RecordType, ResourceRecord, MAX_CHARACTER_STRING_LEN};
use std::collections::HashMap;

/// Highest offset a compression pointer can reach.
const MAX_POINTER_OFFSET: usize = 0x3FFF;

pub(crate) struct Encoder {
    buf: Vec<u8>,
    names: HashMap<DnsName, u16>,
}

impl Encoder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            names: HashMap::new(),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `name`, replacing the longest suffix already in the buffer with a
    /// pointer when `compress` is set.
    pub fn write_name(&mut self, name: &DnsName, compress: bool) {
        let labels: Vec<&[u8]> = name.labels().collect();

        for (i, label) in labels.iter().enumerate() {
            if compress {
                let suffix = name.suffix(i);
                if let Some(&offset) = self.names.get(&suffix) {
                    self.write_u16(0xC000 | offset);
                    return;
                }
                if self.buf.len() <= MAX_POINTER_OFFSET {
                    self.names.insert(suffix, self.buf.len() as u16);
                }
            }
            self.write_u8(label.len() as u8);
            self.write_bytes(label);
        }

        self.write_u8(0);
    }

    pub fn write_record(&mut self, record: &ResourceRecord) -> Result<(), EncodeError> {
        self.write_name(&record.name, true);
        self.write_u16(record.rtype.to_u16());
        self.write_u16(record.class.to_u16());
        self.write_u32(record.ttl);

        let rdlength_at = self.begin_rdata();
        match &record.data {
            RecordData::A(addr) => self.write_bytes(&addr.octets()),
            RecordData::Aaaa(addr) => self.write_bytes(&addr.octets()),
            RecordData::Txt(strings) => {
                for s in strings {
                    if s.len() > MAX_CHARACTER_STRING_LEN {
                        return Err(EncodeError::CharacterStringTooLong(s.len()));
                    }
                    self.write_u8(s.len() as u8);
                    self.write_bytes(s);
                }
            }
            RecordData::Empty => {}
            RecordData::Unknown(bytes) => self.write_bytes(bytes),
        }
        self.end_rdata(rdlength_at)
    }

    /// TSIG names are never compressed (RFC 8945 §4.2).
    pub fn write_tsig(&mut self, tsig: &TsigRecord) -> Result<(), EncodeError> {
        self.write_name(&tsig.key_name, false);
        self.write_u16(RecordType::TSIG.to_u16());
        self.write_u16(ferrous_nsupdate_domain::DnsClass::ANY.to_u16());
        self.write_u32(0);

        let rdlength_at = self.begin_rdata();
        self.write_name(&tsig.algorithm, false);
        self.write_u16((tsig.time_signed >> 32) as u16);
        self.write_u32(tsig.time_signed as u32);
        self.write_u16(tsig.fudge);
        self.write_u16(
            u16::try_from(tsig.mac.len()).map_err(|_| EncodeError::RdataTooLong(tsig.mac.len()))?,
        );
        self.write_bytes(&tsig.mac);
        self.write_u16(tsig.original_id);
        self.write_u16(tsig.error);
        self.write_u16(
            u16::try_from(tsig.other.len())
                .map_err(|_| EncodeError::RdataTooLong(tsig.other.len()))?,
        );
        self.write_bytes(&tsig.other);
        self.end_rdata(rdlength_at)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    fn begin_rdata(&mut self) -> usize {
        let at = self.buf.len();
        self.write_u16(0);
        at
    }

    fn end_rdata(&mut self, rdlength_at: usize) -> Result<(), EncodeError> {
        let len = self.buf.len() - rdlength_at - 2;
        let len16 = u16::try_from(len).map_err(|_| EncodeError::RdataTooLong(len))?;
        self.buf[rdlength_at..rdlength_at + 2].copy_from_slice(&len16.to_be_bytes());
        Ok(())
    }
}

/// Appends `tsig` to an already encoded message and bumps ARCOUNT.
pub fn append_tsig(buf: &mut Vec<u8>, tsig: &TsigRecord) -> Result<(), EncodeError> {
    if buf.len() < HEADER_LEN {
        return Err(EncodeError::MissingHeader(buf.len()));
    }
    let arcount = u16::from_be_bytes([buf[10], buf[11]])
        .checked_add(1)
        .ok_or(EncodeError::TooManyRecords {
            section: "additional",
            count: usize::from(u16::MAX) + 1,
        })?;

    let unsigned_len = buf.len();
    let mut encoder = Encoder {
        buf: std::mem::take(buf),
        names: HashMap::new(),
    };
    let written = encoder.write_tsig(tsig);
    *buf = encoder.finish();

    if let Err(e) = written {
        buf.truncate(unsigned_len);
        return Err(e);
    }
    buf[10..12].copy_from_slice(&arcount.to_be_bytes());
    Ok(())
}
