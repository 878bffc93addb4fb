use super::message::{Question, TsigRecord};
use super::DecodeError;
use ferrous_nsupdate_domain::dns_name::MAX_NAME_LEN;
use ferrous_nsupdate_domain::{DnsClass, DnsName, RecordData, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};

pub(crate) enum Additional {
    Record(ResourceRecord),
    Tsig(TsigRecord),
}

/// Bounds-checked cursor over a received message.
pub(crate) struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let value = *self.buf.get(self.pos).ok_or(DecodeError::Truncated(self.pos))?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(DecodeError::Truncated(self.buf.len()))?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Reads a possibly compressed name.
    ///
    /// Every pointer must land strictly before the start of the label run that
    /// contains it, so each jump moves backwards and the walk always terminates.
    pub fn read_name(&mut self) -> Result<DnsName, DecodeError> {
        let mut labels = Vec::new();
        let mut encoded_len = 1usize;
        let mut pos = self.pos;
        let mut run_start = self.pos;
        let mut resume_at = None;

        loop {
            let len = *self.buf.get(pos).ok_or(DecodeError::Truncated(pos))?;
            match len & 0xC0 {
                0x00 if len == 0 => {
                    pos += 1;
                    break;
                }
                0x00 => {
                    let start = pos + 1;
                    let end = start + len as usize;
                    if end > self.buf.len() {
                        return Err(DecodeError::Truncated(self.buf.len()));
                    }
                    encoded_len += len as usize + 1;
                    if encoded_len > MAX_NAME_LEN {
                        return Err(DecodeError::NameTooLong);
                    }
                    labels.push(self.buf[start..end].to_vec());
                    pos = end;
                }
                0xC0 => {
                    let low = *self.buf.get(pos + 1).ok_or(DecodeError::Truncated(pos + 1))?;
                    let target = (((len & 0x3F) as usize) << 8) | low as usize;
                    if target >= run_start {
                        return Err(DecodeError::BadPointer { at: pos, target });
                    }
                    if resume_at.is_none() {
                        resume_at = Some(pos + 2);
                    }
                    run_start = target;
                    pos = target;
                }
                _ => return Err(DecodeError::BadLabelType(len)),
            }
        }

        self.pos = resume_at.unwrap_or(pos);
        DnsName::from_labels(labels).map_err(|_| DecodeError::NameTooLong)
    }

    pub fn read_question(&mut self) -> Result<Question, DecodeError> {
        let name = self.read_name()?;
        let qtype = RecordType::from_u16(self.read_u16()?);
        let qclass = DnsClass::from_u16(self.read_u16()?);
        Ok(Question {
            name,
            qtype,
            qclass,
        })
    }

    /// A record outside the additional section; TSIG is not allowed here.
    pub fn read_record(&mut self) -> Result<ResourceRecord, DecodeError> {
        match self.read_additional()? {
            Additional::Record(record) => Ok(record),
            Additional::Tsig(_) => Err(DecodeError::MisplacedTsig),
        }
    }

    pub fn read_additional(&mut self) -> Result<Additional, DecodeError> {
        let name = self.read_name()?;
        let rtype = RecordType::from_u16(self.read_u16()?);
        let class = DnsClass::from_u16(self.read_u16()?);
        let ttl = self.read_u32()?;
        let rdlength = self.read_u16()? as usize;

        let rdata_start = self.pos;
        let rdata_end = rdata_start + rdlength;
        if rdata_end > self.buf.len() {
            return Err(DecodeError::RdataOverrun {
                at: rdata_start,
                rdlength,
            });
        }

        if rtype == RecordType::TSIG {
            let tsig = self.read_tsig_rdata(name, rdata_end)?;
            return Ok(Additional::Tsig(tsig));
        }

        let data = self.read_rdata(rtype, class, rdata_end)?;
        Ok(Additional::Record(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            data,
        }))
    }

    /// Zero-length RDATA is `Empty` for the delete classes and the types we
    /// model, and `Unknown(vec![])` otherwise, mirroring how it was encoded.
    fn read_rdata(
        &mut self,
        rtype: RecordType,
        class: DnsClass,
        end: usize,
    ) -> Result<RecordData, DecodeError> {
        let len = end - self.pos;
        if len == 0 {
            let modeled = matches!(rtype, RecordType::A | RecordType::AAAA | RecordType::TXT);
            let delete = matches!(class, DnsClass::ANY | DnsClass::NONE);
            return Ok(if modeled || delete {
                RecordData::Empty
            } else {
                RecordData::Unknown(Vec::new())
            });
        }

        let data = match rtype {
            RecordType::A => {
                let octets: [u8; 4] = self
                    .read_bytes(len)?
                    .try_into()
                    .map_err(|_| bad_rdata(rtype, format!("length {} instead of 4", len)))?;
                RecordData::A(Ipv4Addr::from(octets))
            }
            RecordType::AAAA => {
                let octets: [u8; 16] = self
                    .read_bytes(len)?
                    .try_into()
                    .map_err(|_| bad_rdata(rtype, format!("length {} instead of 16", len)))?;
                RecordData::Aaaa(Ipv6Addr::from(octets))
            }
            RecordType::TXT => {
                let mut strings = Vec::new();
                while self.pos < end {
                    let slen = self.read_u8()? as usize;
                    if self.pos + slen > end {
                        return Err(bad_rdata(rtype, "character-string overruns RDATA".to_string()));
                    }
                    strings.push(self.read_bytes(slen)?.to_vec());
                }
                RecordData::Txt(strings)
            }
            _ => RecordData::Unknown(self.read_bytes(len)?.to_vec()),
        };

        Ok(data)
    }

    fn read_tsig_rdata(&mut self, key_name: DnsName, end: usize) -> Result<TsigRecord, DecodeError> {
        let algorithm = self.read_name()?;
        let time_hi = self.read_u16()? as u64;
        let time_lo = self.read_u32()? as u64;
        let fudge = self.read_u16()?;
        let mac_size = self.read_u16()? as usize;
        let mac = self.read_bytes(mac_size)?.to_vec();
        let original_id = self.read_u16()?;
        let error = self.read_u16()?;
        let other_len = self.read_u16()? as usize;
        let other = self.read_bytes(other_len)?.to_vec();

        if self.pos != end {
            return Err(bad_rdata(
                RecordType::TSIG,
                format!("fields end at {} but RDATA ends at {}", self.pos, end),
            ));
        }

        Ok(TsigRecord {
            key_name,
            algorithm,
            time_signed: (time_hi << 32) | time_lo,
            fudge,
            mac,
            original_id,
            error,
            other,
        })
    }
}

fn bad_rdata(rtype: RecordType, reason: String) -> DecodeError {
    DecodeError::BadRdata {
        rtype: rtype.to_string(),
        reason,
    }
}
