// ctclient-rs/ctclient/src/transport/socket.rs

//! Unix-domain socket transport to the reader manager.
//!
//! Every request and reply is one packet:
//!
//! ```text
//! [xid(4)] [dest(4)] [error(2)] [count(2)] [payload(count)]
//! ```
//!
//! All header fields are big-endian. The reply echoes the request `xid`;
//! a negative `error` is a service status code.

#![cfg(all(unix, feature = "socket"))]

use std::io::{self, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

use log::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::constants::SOCKET_HEADER_LEN;
use crate::error::ServiceError;
use crate::transport::traits::{Connector, Transport};
use crate::utils::HexDisplay;
use crate::{Error, Result};

/// Fixed header preceding every packet payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketHeader {
    /// Transaction id; a reply echoes its request's
    pub xid: u32,
    /// Destination; always 0 from the client
    pub dest: u32,
    /// Service status, negative on failure
    pub error: i16,
    /// Payload length
    pub count: u16,
}

impl PacketHeader {
    /// Big-endian wire form
    pub fn encode(&self) -> [u8; SOCKET_HEADER_LEN] {
        let mut out = [0u8; SOCKET_HEADER_LEN];
        out[0..4].copy_from_slice(&self.xid.to_be_bytes());
        out[4..8].copy_from_slice(&self.dest.to_be_bytes());
        out[8..10].copy_from_slice(&self.error.to_be_bytes());
        out[10..12].copy_from_slice(&self.count.to_be_bytes());
        out
    }

    /// Inverse of `encode`
    pub fn decode(raw: &[u8; SOCKET_HEADER_LEN]) -> Self {
        Self {
            xid: u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
            dest: u32::from_be_bytes([raw[4], raw[5], raw[6], raw[7]]),
            error: i16::from_be_bytes([raw[8], raw[9]]),
            count: u16::from_be_bytes([raw[10], raw[11]]),
        }
    }

    /// Read one header and its payload from `r`.
    pub fn read_packet<R: Read>(r: &mut R) -> io::Result<(Self, Vec<u8>)> {
        let mut raw = [0u8; SOCKET_HEADER_LEN];
        r.read_exact(&mut raw)?;
        let header = Self::decode(&raw);
        let mut payload = vec![0u8; header.count as usize];
        r.read_exact(&mut payload)?;
        Ok((header, payload))
    }

    /// Write this header followed by `payload` as a single write.
    pub fn write_packet<W: Write>(&self, w: &mut W, payload: &[u8]) -> io::Result<()> {
        let mut packet = Vec::with_capacity(SOCKET_HEADER_LEN + payload.len());
        packet.extend_from_slice(&self.encode());
        packet.extend_from_slice(payload);
        w.write_all(&packet)?;
        w.flush()
    }
}

/// Blocking request/response connection to one reader's socket.
#[derive(Debug)]
pub struct SocketTransport {
    stream: Option<UnixStream>,
    next_xid: u32,
    max_packet: usize,
}

impl SocketTransport {
    /// Connect to the socket at `path` using the limits and timeout of
    /// `config`.
    pub fn connect(path: &Path, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        debug!("connecting to reader socket {}", path.display());
        let stream = UnixStream::connect(path)?;
        Self::from_stream(stream, config)
    }

    /// Wrap an already connected stream (e.g. one end of `UnixStream::pair`).
    pub fn from_stream(stream: UnixStream, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        stream.set_read_timeout(config.call_timeout)?;
        stream.set_write_timeout(config.call_timeout)?;
        Ok(Self {
            stream: Some(stream),
            next_xid: 1,
            max_packet: config.max_packet,
        })
    }

    fn stream(&mut self) -> Result<&mut UnixStream> {
        self.stream.as_mut().ok_or_else(|| {
            Error::TransportFailure(io::Error::new(
                io::ErrorKind::NotConnected,
                "socket transport closed",
            ))
        })
    }
}

impl Transport for SocketTransport {
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>> {
        if request.len() > self.max_packet {
            return Err(Error::BufferOverflow {
                capacity: self.max_packet,
                required: request.len(),
            });
        }

        let xid = self.next_xid;
        self.next_xid = self.next_xid.wrapping_add(1).max(1);

        let header = PacketHeader {
            xid,
            dest: 0,
            error: 0,
            count: request.len() as u16,
        };
        trace!("-> xid={} {}", xid, HexDisplay(request));

        // A half-finished exchange leaves the stream out of step with the
        // xid sequence, so it is dropped and later calls fail as NotConnected.
        let stream = self.stream()?;
        let exchanged = header
            .write_packet(stream, request)
            .and_then(|()| PacketHeader::read_packet(stream));
        let (reply, payload) = match exchanged {
            Ok(packet) => packet,
            Err(e) => {
                warn!("reader socket call xid={} failed, dropping connection: {}", xid, e);
                self.stream = None;
                return Err(e.into());
            }
        };
        trace!("<- xid={} error={} {}", reply.xid, reply.error, HexDisplay(&payload));

        if reply.xid != xid {
            self.stream = None;
            return Err(Error::MalformedResponse(format!(
                "reply xid {} does not match request xid {}",
                reply.xid, xid
            )));
        }
        if reply.error < 0 {
            return Err(Error::Service(ServiceError::from(reply.error)));
        }
        if payload.len() > capacity {
            return Err(Error::BufferOverflow {
                capacity,
                required: payload.len(),
            });
        }
        Ok(payload)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            match stream.shutdown(std::net::Shutdown::Both) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Opens `SocketTransport`s below `ClientConfig::socket_dir`.
#[derive(Debug, Clone, Default)]
pub struct SocketConnector {
    config: ClientConfig,
}

impl SocketConnector {
    /// Connector using `config` for every transport
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Configuration handed to each transport
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Connector for SocketConnector {
    fn open(&self, address: &str) -> Result<Box<dyn Transport>> {
        let path = self.config.socket_path(address);
        Ok(Box::new(SocketTransport::connect(&path, &self.config)?))
    }
}
