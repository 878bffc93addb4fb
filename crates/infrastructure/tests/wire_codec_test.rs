use ferrous_nsupdate_domain::{DnsClass, DnsName, Rcode, RecordData, RecordType, ResourceRecord};
use ferrous_nsupdate_infrastructure::dns::tsig;
use ferrous_nsupdate_infrastructure::dns::wire::{
    DecodeError, Header, Message, Opcode, Question, TsigRecord,
};

mod helpers;
use helpers::{KeyBuilder, RequestBuilder};

fn name(s: &str) -> DnsName {
    DnsName::from_ascii(s).unwrap()
}

fn header_with_counts(qd: u16, an: u16, ns: u16, ar: u16) -> Vec<u8> {
    let mut buf = vec![0x12, 0x34, 0x00, 0x00];
    for count in [qd, an, ns, ar] {
        buf.extend_from_slice(&count.to_be_bytes());
    }
    buf
}

fn sample_message() -> Message {
    RequestBuilder::new("127.0.0.1:53".parse().unwrap())
        .a("www", "10.0.0.5")
        .txt("www", "foo bar")
        .message(0xBEEF)
}

#[test]
fn test_roundtrip_update_message() {
    let message = sample_message();
    let bytes = message.encode().unwrap();
    assert_eq!(Message::decode(&bytes).unwrap(), message);
}

#[test]
fn test_roundtrip_response_with_additional_and_tsig() {
    let mut header = Header::new(7, Opcode::Update);
    header.response = true;
    header.authoritative = true;
    header.rcode = Rcode::NXRRSet;

    let mut message = Message::new(header);
    message.zones.push(Question {
        name: name("example.org"),
        qtype: RecordType::SOA,
        qclass: DnsClass::IN,
    });
    message.prerequisites.push(ResourceRecord {
        name: name("host.example.org"),
        rtype: RecordType::AAAA,
        class: DnsClass::NONE,
        ttl: 0,
        data: RecordData::Empty,
    });
    message.additionals.push(ResourceRecord {
        name: name("example.org"),
        rtype: RecordType::Unknown(65280),
        class: DnsClass::IN,
        ttl: 60,
        data: RecordData::Unknown(vec![1, 2, 3]),
    });
    message.tsig = Some(TsigRecord {
        key_name: name("key.example.org"),
        algorithm: name("hmac-sha256"),
        time_signed: 0x0000_6543_2100,
        fudge: 300,
        mac: vec![0xAA; 32],
        original_id: 7,
        error: 0,
        other: vec![],
    });

    let bytes = message.encode().unwrap();
    assert_eq!(Message::decode(&bytes).unwrap(), message);
}

#[test]
fn test_roundtrip_zero_length_rdata() {
    let mut message = Message::new(Header::new(9, Opcode::Update));
    message.zones.push(Question {
        name: name("example.org"),
        qtype: RecordType::SOA,
        qclass: DnsClass::IN,
    });
    // Empty RDATA of an unmodelled type, and the delete forms around it.
    message.updates.push(ResourceRecord {
        name: name("www.example.org"),
        rtype: RecordType::Unknown(99),
        class: DnsClass::IN,
        ttl: 300,
        data: RecordData::Unknown(vec![]),
    });
    message.updates.push(ResourceRecord::delete_rrset(
        name("www.example.org"),
        RecordType::Unknown(99),
    ));
    message.updates.push(ResourceRecord::delete_rrset(
        name("www.example.org"),
        RecordType::A,
    ));

    let bytes = message.encode().unwrap();
    let decoded = Message::decode(&bytes).unwrap();

    assert_eq!(decoded.updates[0].data, RecordData::Unknown(vec![]));
    assert_eq!(decoded.updates[1].data, RecordData::Empty);
    assert_eq!(decoded.updates[2].data, RecordData::Empty);
    assert_eq!(decoded, message);
}

#[test]
fn test_owner_names_are_compressed_against_zone() {
    let bytes = sample_message().encode().unwrap();
    // Zone name starts at offset 12, so "www" + pointer to 0x0C.
    let needle = [3, b'w', b'w', b'w', 0xC0, 0x0C];
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn test_txt_rdata_encoding() {
    let bytes = sample_message().encode().unwrap();
    let rdata = [0x00, 0x08, 0x03, 0x66, 0x6f, 0x6f, 0x03, 0x62, 0x61, 0x72];
    assert!(bytes.windows(rdata.len()).any(|w| w == rdata));
}

#[test]
fn test_decode_follows_backward_pointer() {
    let mut buf = header_with_counts(2, 0, 0, 0);
    buf.extend_from_slice(&[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'o', b'r', b'g', 0]);
    buf.extend_from_slice(&[0, 6, 0, 1]);
    buf.extend_from_slice(&[3, b'w', b'w', b'w', 0xC0, 0x0C]);
    buf.extend_from_slice(&[0, 1, 0, 1]);

    let message = Message::decode(&buf).unwrap();
    assert_eq!(message.zones[0].name, name("example.org"));
    assert_eq!(message.zones[1].name, name("www.example.org"));
    assert_eq!(message.zones[1].qtype, RecordType::A);
}

#[test]
fn test_self_pointer_rejected() {
    let mut buf = header_with_counts(1, 0, 0, 0);
    buf.extend_from_slice(&[0xC0, 0x0C, 0, 1, 0, 1]);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::BadPointer { at: 12, target: 12 })
    ));
}

#[test]
fn test_pointer_cycle_through_label_rejected() {
    // "a" followed by a pointer back to the "a": a.a.a.a...
    let mut buf = header_with_counts(1, 0, 0, 0);
    buf.extend_from_slice(&[1, b'a', 0xC0, 0x0C, 0, 1, 0, 1]);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::BadPointer { .. })
    ));
}

#[test]
fn test_pointer_loop_between_two_names_rejected() {
    // Second name points to the first, whose pointer then jumps forward to the second.
    let mut buf = header_with_counts(2, 0, 0, 0);
    buf.extend_from_slice(&[1, b'a', 0xC0, 0x14, 0, 1, 0, 1]);
    buf.extend_from_slice(&[1, b'b', 0xC0, 0x0C, 0, 1, 0, 1]);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::BadPointer { .. })
    ));
}

#[test]
fn test_forward_pointer_rejected() {
    let mut buf = header_with_counts(1, 0, 0, 0);
    buf.extend_from_slice(&[0xC0, 0x20, 0, 1, 0, 1]);
    buf.resize(64, 0);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::BadPointer { at: 12, target: 0x20 })
    ));
}

#[test]
fn test_reserved_label_types_rejected() {
    for label_type in [0x40u8, 0x80] {
        let mut buf = header_with_counts(1, 0, 0, 0);
        buf.extend_from_slice(&[label_type, 0, 0, 1, 0, 1]);
        assert_eq!(
            Message::decode(&buf),
            Err(DecodeError::BadLabelType(label_type))
        );
    }
}

#[test]
fn test_name_over_255_bytes_rejected() {
    let mut buf = header_with_counts(1, 0, 0, 0);
    for _ in 0..5 {
        buf.push(63);
        buf.extend_from_slice(&[b'x'; 63]);
    }
    buf.extend_from_slice(&[0, 0, 1, 0, 1]);
    assert_eq!(Message::decode(&buf), Err(DecodeError::NameTooLong));
}

#[test]
fn test_rdlength_overrun_rejected() {
    let mut buf = header_with_counts(0, 0, 1, 0);
    buf.extend_from_slice(&[0, 0, 1, 0, 1, 0, 0, 0, 60, 0, 100, 10, 0, 0, 5]);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::RdataOverrun { rdlength: 100, .. })
    ));
}

#[test]
fn test_a_record_with_wrong_length_rejected() {
    let mut buf = header_with_counts(0, 0, 1, 0);
    buf.extend_from_slice(&[0, 0, 1, 0, 1, 0, 0, 0, 60, 0, 3, 10, 0, 0]);
    assert!(matches!(
        Message::decode(&buf),
        Err(DecodeError::BadRdata { .. })
    ));
}

#[test]
fn test_txt_string_overrunning_rdata_rejected() {
    let mut buf = header_with_counts(0, 0, 1, 0);
    buf.extend_from_slice(&[0, 0, 16, 0, 1, 0, 0, 0, 60, 0, 3, 5, b'a', b'b']);
    buf.extend_from_slice(&[0, 0, 0]);
    assert!(Message::decode(&buf).is_err());
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = sample_message().encode().unwrap();
    bytes.push(0);
    assert_eq!(Message::decode(&bytes), Err(DecodeError::TrailingBytes(1)));
}

#[test]
fn test_tsig_must_be_last_additional() {
    let key = KeyBuilder::default_key();
    let signed = tsig::sign(&sample_message(), &key).unwrap();

    // Claim one more additional record after the TSIG and provide it.
    let mut bytes = signed.bytes.clone();
    let arcount = u16::from_be_bytes([bytes[10], bytes[11]]) + 1;
    bytes[10..12].copy_from_slice(&arcount.to_be_bytes());
    bytes.extend_from_slice(&[0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0]);

    assert_eq!(Message::decode(&bytes), Err(DecodeError::MisplacedTsig));
}

#[test]
fn test_tsig_outside_additional_section_rejected() {
    let key = KeyBuilder::default_key();
    let signed = tsig::sign(&sample_message(), &key).unwrap();

    // Move the TSIG into the update section by shifting the counts.
    let mut bytes = signed.bytes.clone();
    let upcount = u16::from_be_bytes([bytes[8], bytes[9]]) + 1;
    bytes[8..10].copy_from_slice(&upcount.to_be_bytes());
    bytes[10..12].copy_from_slice(&0u16.to_be_bytes());

    assert_eq!(Message::decode(&bytes), Err(DecodeError::MisplacedTsig));
}

#[test]
fn test_every_prefix_fails_to_decode() {
    let key = KeyBuilder::default_key();
    let bytes = tsig::sign(&sample_message(), &key).unwrap().bytes;

    for len in 0..bytes.len() {
        assert!(
            Message::decode(&bytes[..len]).is_err(),
            "prefix of {} bytes decoded",
            len
        );
    }
    assert!(Message::decode(&bytes).is_ok());
}

#[test]
fn test_mutated_buffers_never_panic() {
    let key = KeyBuilder::default_key();
    let original = tsig::sign(&sample_message(), &key).unwrap().bytes;
    let mut rng = fastrand::Rng::with_seed(0x5EED);

    for _ in 0..5_000 {
        let mut bytes = original.clone();
        for _ in 0..rng.usize(1..8) {
            let at = rng.usize(..bytes.len());
            bytes[at] = rng.u8(..);
        }
        if rng.bool() {
            bytes.truncate(rng.usize(..=bytes.len()));
        }
        let _ = Message::decode(&bytes);
    }

    for _ in 0..1_000 {
        let len = rng.usize(..128);
        let bytes: Vec<u8> = (0..len).map(|_| rng.u8(..)).collect();
        let _ = Message::decode(&bytes);
    }
}

#[test]
fn test_hickory_parses_encoded_update() {
    let bytes = sample_message().encode().unwrap();
    assert!(hickory_proto::op::Message::from_vec(&bytes).is_ok());
}
