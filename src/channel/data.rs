//! Module `data`
//!
//! The active-mode data channel: a listening socket bound on the control
//! channel's local port + 1 that accepts one inbound server connection
//! per data-bearing command. The accepted peer is consumed by exactly
//! one read-to-EOF or one write, then closed. The listener itself is
//! bound lazily and reused across transfers within a session.

use log::debug;
use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Shutdown, TcpListener, TcpStream};

use crate::channel::ControlChannel;
use crate::error::{FtpClientError, Result};
use crate::protocol::Command;
use crate::utils::network;

/// Per-transfer data connection management for one client session.
pub struct DataChannel {
    listener: Option<TcpListener>,
    peer: Option<TcpStream>,
    buffer_size: usize,
}

impl DataChannel {
    /// Creates a data channel with no listener bound yet.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            listener: None,
            peer: None,
            buffer_size,
        }
    }

    /// Whether the listening socket is currently bound.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Binds the listening socket on the wildcard address at `data_port`.
    /// A no-op while already listening.
    pub fn open_socket(&mut self, data_port: u16) -> Result<()> {
        if self.listener.is_some() {
            return Ok(());
        }

        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, data_port))?;
        debug!("Data channel listening on port {}", data_port);
        self.listener = Some(listener);
        Ok(())
    }

    /// Advertises the data endpoint with EPRT and accepts the single
    /// inbound connection for the upcoming transfer.
    ///
    /// Returns the control-channel reply to EPRT; the server sends it
    /// ahead of the data phase and it must be captured before the
    /// transfer proceeds.
    pub fn open_connection(&mut self, control: &mut ControlChannel) -> Result<String> {
        let local = control.local_addr()?;
        let data_port = network::data_port(local.port());
        self.open_socket(data_port)?;

        control.send(&Command::Eprt(network::eprt_argument(&local, data_port)))?;

        let listener = match &self.listener {
            Some(listener) => listener,
            None => {
                return Err(FtpClientError::Io(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "data listener not bound",
                )));
            }
        };
        let (peer, peer_addr) = listener.accept()?;
        debug!("Data connection accepted from {}", peer_addr);
        self.peer = Some(peer);

        control.receive()
    }

    /// Reads the peer connection to EOF in fixed-size chunks, then
    /// closes it.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut peer = self.take_peer()?;

        let mut content = Vec::new();
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let n = peer.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            content.extend_from_slice(&buffer[..n]);
        }

        let _ = peer.shutdown(Shutdown::Both);
        debug!("Data phase read {} bytes", content.len());
        Ok(content)
    }

    /// Writes `content` to the peer connection in one call, then closes
    /// it.
    pub fn write_all(&mut self, content: &[u8]) -> Result<()> {
        let mut peer = self.take_peer()?;

        peer.write_all(content)?;
        let _ = peer.shutdown(Shutdown::Both);
        debug!("Data phase wrote {} bytes", content.len());
        Ok(())
    }

    /// Drops the listener and any unconsumed peer connection.
    pub fn reset(&mut self) {
        if let Some(peer) = self.peer.take() {
            let _ = peer.shutdown(Shutdown::Both);
        }
        self.listener = None;
    }

    fn take_peer(&mut self) -> Result<TcpStream> {
        self.peer.take().ok_or_else(|| {
            FtpClientError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "no data connection in progress",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_open_socket_is_idempotent() {
        let mut channel = DataChannel::new(4096);
        channel.open_socket(0).unwrap();
        assert!(channel.is_listening());

        // Second call must not rebind.
        channel.open_socket(0).unwrap();
        assert!(channel.is_listening());

        channel.reset();
        assert!(!channel.is_listening());
    }

    #[test]
    fn test_open_connection_accepts_server_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut control, _) = listener.accept().unwrap();
            let mut buffer = [0; 128];
            let n = control.read(&mut buffer).unwrap();
            let line = String::from_utf8_lossy(&buffer[..n]).into_owned();
            assert!(line.starts_with("EPRT |1|"));

            let port: u16 = line
                .trim_end()
                .trim_end_matches('|')
                .rsplit('|')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            control
                .write_all(b"200 EPRT command successful\r\n")
                .unwrap();

            let mut data = TcpStream::connect(("127.0.0.1", port)).unwrap();
            data.write_all(b"listing").unwrap();
        });

        let mut control = ControlChannel::new(Duration::from_secs(2), 4096, false);
        control.connect("127.0.0.1", addr.port()).unwrap();

        let mut channel = DataChannel::new(4096);
        let reply = channel.open_connection(&mut control).unwrap();

        assert!(reply.starts_with("200"));
        assert_eq!(channel.read_all().unwrap(), b"listing");

        server.join().unwrap();
    }

    #[test]
    fn test_read_without_peer_fails() {
        let mut channel = DataChannel::new(4096);
        assert!(channel.read_all().is_err());
        assert!(channel.write_all(b"data").is_err());
    }
}
