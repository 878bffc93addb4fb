//! UPDATE message construction (RFC 2136 §2.3, §2.5).
//!
//! Every (name, type) pair in the request becomes a "replace RRset": a delete
//! of the whole RRset followed by the adds for it. There is no prerequisite
//! section, so the update is unconditional.

use crate::dns::wire::{Header, Message, Opcode, Question};
use ferrous_nsupdate_domain::{DnsClass, DnsName, RecordType, ResourceRecord, UpdateRequest};

pub struct UpdateBuilder;

impl UpdateBuilder {
    /// Builds an UPDATE for `zone` with a random transaction id.
    pub fn build(zone: &DnsName, records: &[ResourceRecord]) -> Message {
        Self::build_with_id(fastrand::u16(..), zone, records)
    }

    pub fn build_with_id(id: u16, zone: &DnsName, records: &[ResourceRecord]) -> Message {
        let mut message = Message::new(Header::new(id, Opcode::Update));

        message.zones.push(Question {
            name: zone.clone(),
            qtype: RecordType::SOA,
            qclass: DnsClass::IN,
        });

        // First-seen order of (name, type) pairs.
        let mut rrsets: Vec<(&DnsName, RecordType)> = Vec::new();
        for record in records {
            let key = (&record.name, record.rtype);
            if !rrsets.contains(&key) {
                rrsets.push(key);
            }
        }

        for (name, rtype) in rrsets {
            message
                .updates
                .push(ResourceRecord::delete_rrset(name.clone(), rtype));
            message.updates.extend(
                records
                    .iter()
                    .filter(|r| r.name == *name && r.rtype == rtype)
                    .cloned(),
            );
        }

        message
    }

    pub fn from_request(request: &UpdateRequest) -> Message {
        Self::build(request.zone(), request.records())
    }
}
