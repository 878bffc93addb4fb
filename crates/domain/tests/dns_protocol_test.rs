use ferrous_nsupdate_domain::{ServerAddr, DEFAULT_DNS_PORT};
use std::net::SocketAddr;

#[test]
fn test_parse_ipv4_defaults_to_port_53() {
    let addr: ServerAddr = "192.0.2.1".parse().unwrap();
    let expected: SocketAddr = "192.0.2.1:53".parse().unwrap();
    assert_eq!(addr, ServerAddr::Resolved(expected));
    assert_eq!(expected.port(), DEFAULT_DNS_PORT);
}

#[test]
fn test_parse_socket_addr() {
    let addr: ServerAddr = "192.0.2.1:5353".parse().unwrap();
    assert!(matches!(addr, ServerAddr::Resolved(sock) if sock.port() == 5353));
}

#[test]
fn test_parse_hostname_with_port() {
    let addr: ServerAddr = "ns1.example.org:53".parse().unwrap();
    if let ServerAddr::Unresolved { hostname, port } = &addr {
        assert_eq!(&**hostname, "ns1.example.org");
        assert_eq!(*port, 53);
    } else {
        panic!("Expected Unresolved variant");
    }
}

#[test]
fn test_parse_hostname_trailing_dot() {
    let addr: ServerAddr = "ns1.example.org.".parse().unwrap();
    assert_eq!(
        addr,
        ServerAddr::Unresolved {
            hostname: "ns1.example.org".into(),
            port: 53
        }
    );
}

#[test]
fn test_display_roundtrip() {
    for input in ["192.0.2.1:53", "[2001:db8::1]:53", "ns1.example.org:5300"] {
        let addr: ServerAddr = input.parse().unwrap();
        let reparsed: ServerAddr = addr.to_string().parse().unwrap();
        assert_eq!(addr, reparsed, "display roundtrip failed for {}", input);
    }
}

#[test]
fn test_invalid_addresses() {
    for input in ["", "   ", "host name", "ns1.example.org:notaport", "tls://1.1.1.1:853"] {
        assert!(
            input.parse::<ServerAddr>().is_err(),
            "expected {:?} to be rejected",
            input
        );
    }
}
