//! Ferrous nsupdate infrastructure: wire codec, TSIG and the UDP/TCP client.
pub mod dns;
