#![allow(dead_code)]
use ferrous_nsupdate_domain::{Rcode, TsigKey};
use ferrous_nsupdate_infrastructure::dns::tsig::{self, TsigSigner};
use ferrous_nsupdate_infrastructure::dns::wire::{append_tsig, Header, Message, Opcode, TsigRecord};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;

/// How the mock answers an UPDATE.
#[derive(Clone)]
pub enum Behavior {
    /// Signed answer with this rcode.
    Respond(Rcode),
    /// Never answers.
    Silent,
    /// Empty TC answer over UDP, signed answer with this rcode over TCP.
    Truncate(Rcode),
    /// Empty TC answer over UDP, then no answer over TCP.
    TruncateThenSilent,
    /// Signed NOTAUTH whose TSIG carries this error code.
    TsigError(u16),
    /// NOTAUTH with a TSIG that carries this error code and no MAC, the way
    /// servers answer BADKEY and BADSIG (RFC 8945 §5.3.2).
    TsigErrorNoMac(u16),
    /// Signed NOERROR with one MAC byte flipped.
    TamperMac,
    /// NOERROR signed with a different key.
    SignWith(TsigKey),
    /// Answer without a TSIG record.
    Unsigned(Rcode),
    /// A datagram with the wrong id first, then the real signed answer.
    WrongIdFirst(Rcode),
    /// Bytes that do not decode.
    Garbage,
}

#[derive(Clone)]
pub struct ReceivedRequest {
    pub protocol: &'static str,
    pub message: Message,
    /// Whether the request's TSIG verified against the server's key.
    pub verified: bool,
}

pub struct MockUpdateServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    shutdown: CancellationToken,
}

impl MockUpdateServer {
    /// Listens on 127.0.0.1 over UDP and TCP on the same ephemeral port.
    pub async fn start(key: TsigKey, behavior: Behavior) -> std::io::Result<Self> {
        let udp = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = CancellationToken::new();

        {
            let (key, behavior, requests, shutdown) =
                (key.clone(), behavior.clone(), requests.clone(), shutdown.clone());
            tokio::spawn(async move {
                let mut buf = vec![0u8; 65535];
                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        result = udp.recv_from(&mut buf) => {
                            let Ok((len, peer)) = result else { break };
                            let replies = answer(&buf[..len], &key, &behavior, "UDP", &requests);
                            for reply in replies {
                                let _ = udp.send_to(&reply, peer).await;
                            }
                        }
                    }
                }
            });
        }

        {
            let (requests, shutdown) = (requests.clone(), shutdown.clone());
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        result = tcp.accept() => {
                            let Ok((stream, _)) = result else { break };
                            tokio::spawn(serve_tcp(
                                stream,
                                key.clone(),
                                behavior.clone(),
                                requests.clone(),
                                shutdown.clone(),
                            ));
                        }
                    }
                }
            });
        }

        Ok(Self {
            addr,
            requests,
            shutdown,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve_tcp(
    mut stream: TcpStream,
    key: TsigKey,
    behavior: Behavior,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    shutdown: CancellationToken,
) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut msg = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut msg).await.is_err() {
        return;
    }

    let replies = answer(&msg, &key, &behavior, "TCP", &requests);
    if replies.is_empty() {
        // Hold the connection open without answering.
        shutdown.cancelled().await;
        return;
    }
    for reply in replies {
        let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
        let _ = stream.write_all(&reply).await;
    }
}

impl Drop for MockUpdateServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn answer(
    bytes: &[u8],
    key: &TsigKey,
    behavior: &Behavior,
    protocol: &'static str,
    requests: &Mutex<Vec<ReceivedRequest>>,
) -> Vec<Vec<u8>> {
    let Ok(request) = Message::decode(bytes) else {
        return Vec::new();
    };
    let verified = tsig::verify(bytes, key, None).is_ok();
    let request_mac = request
        .tsig
        .as_ref()
        .map(|t| t.mac.clone())
        .unwrap_or_default();
    requests.lock().unwrap().push(ReceivedRequest {
        protocol,
        message: request.clone(),
        verified,
    });

    let mut header = Header::new(request.header.id, Opcode::Update);
    header.response = true;
    let mut response = Message::new(header);
    response.zones = request.zones.clone();

    let signed = |response: &Message, signer: TsigSigner<'_>| {
        signer.sign(response, Some(&request_mac)).unwrap().bytes
    };

    match behavior {
        Behavior::Silent => Vec::new(),
        Behavior::Respond(rcode) => {
            response.header.rcode = *rcode;
            vec![signed(&response, TsigSigner::new(key))]
        }
        Behavior::Truncate(_) | Behavior::TruncateThenSilent if protocol == "UDP" => {
            response.header.truncated = true;
            response.zones.clear();
            vec![response.encode().unwrap()]
        }
        Behavior::TruncateThenSilent => Vec::new(),
        Behavior::Truncate(rcode) => {
            response.header.rcode = *rcode;
            vec![signed(&response, TsigSigner::new(key))]
        }
        Behavior::TsigError(code) => {
            response.header.rcode = Rcode::NotAuth;
            vec![signed(&response, TsigSigner::new(key).error(*code))]
        }
        Behavior::TsigErrorNoMac(code) => {
            response.header.rcode = Rcode::NotAuth;
            let mut bytes = response.encode().unwrap();
            let tsig = TsigRecord {
                key_name: key.name.clone(),
                algorithm: key.algorithm.name(),
                time_signed: chrono::Utc::now().timestamp() as u64,
                fudge: 300,
                mac: Vec::new(),
                original_id: request.header.id,
                error: *code,
                other: Vec::new(),
            };
            append_tsig(&mut bytes, &tsig).unwrap();
            vec![bytes]
        }
        Behavior::TamperMac => {
            let mut bytes = signed(&response, TsigSigner::new(key));
            // MAC ends right before original id, error and other len (6 bytes).
            let at = bytes.len() - 7;
            bytes[at] ^= 0xFF;
            vec![bytes]
        }
        Behavior::SignWith(other) => vec![signed(&response, TsigSigner::new(other))],
        Behavior::Unsigned(rcode) => {
            response.header.rcode = *rcode;
            vec![response.encode().unwrap()]
        }
        Behavior::WrongIdFirst(rcode) => {
            response.header.rcode = *rcode;
            let mut decoy = response.clone();
            decoy.header.id = response.header.id.wrapping_add(1);
            vec![
                decoy.encode().unwrap(),
                signed(&response, TsigSigner::new(key)),
            ]
        }
        Behavior::Garbage => {
            let mut bytes = response.encode().unwrap();
            // Claim one more zone entry than is present.
            bytes[5] += 1;
            vec![bytes]
        }
    }
}
