//! Module `control`
//!
//! The control channel: one long-lived TCP connection over which command
//! and reply text flows. A fixed timeout applies to connect, read, and
//! write; the channel never retries on its own.

use log::debug;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{FtpClientError, Result};
use crate::protocol::Command;

/// Wraps the command connection of one client session.
///
/// Created unconnected; `connect` establishes the stream. The channel is
/// replaced, never reused, whenever the owning session resets.
pub struct ControlChannel {
    stream: Option<TcpStream>,
    host: Option<String>,
    timeout: Duration,
    buffer_size: usize,
    debug: bool,
}

impl ControlChannel {
    /// Creates an unconnected control channel.
    pub fn new(timeout: Duration, buffer_size: usize, debug: bool) -> Self {
        Self {
            stream: None,
            host: None,
            timeout,
            buffer_size,
            debug,
        }
    }

    /// Resolves `host` and connects to `host:port` within the channel
    /// timeout.
    ///
    /// Resolution failure maps to `UnknownHost`, an expired connect to
    /// `Timeout`, and an actively refused connection to
    /// `ConnectionRefused`. Each resolved address is tried in turn.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|_| FtpClientError::UnknownHost(host.to_string()))?;

        let mut last_error: Option<std::io::Error> = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.timeout))?;
                    stream.set_write_timeout(Some(self.timeout))?;
                    debug!("Control channel connected to {}", addr);
                    self.stream = Some(stream);
                    self.host = Some(host.to_string());
                    return Ok(());
                }
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(classify_connect(e, host)),
            // An empty address list means resolution produced nothing.
            None => Err(FtpClientError::UnknownHost(host.to_string())),
        }
    }

    /// Whether the channel currently holds a connected stream.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Local address of the connected stream. The data port is derived
    /// from its port.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        match &self.stream {
            Some(stream) => Ok(stream.local_addr()?),
            None => Err(FtpClientError::NotConnected),
        }
    }

    /// Writes one command line to the server. A write that blocks past
    /// the channel timeout surfaces as `Timeout`.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        let host = self.host.clone().unwrap_or_default();
        let stream = match &mut self.stream {
            Some(stream) => stream,
            None => return Err(FtpClientError::NotConnected),
        };

        if self.debug {
            debug!("--> {}", command.verb());
        }
        stream
            .write_all(command.to_wire().as_bytes())
            .map_err(|e| classify_stream(e, &host))
    }

    /// Reads one buffer's worth of reply text.
    pub fn receive(&mut self) -> Result<String> {
        let host = self.host.clone().unwrap_or_default();
        let stream = match &mut self.stream {
            Some(stream) => stream,
            None => return Err(FtpClientError::NotConnected),
        };

        let mut buffer = vec![0u8; self.buffer_size];
        let n = stream
            .read(&mut buffer)
            .map_err(|e| classify_stream(e, &host))?;
        let reply = String::from_utf8_lossy(&buffer[..n]).into_owned();

        if self.debug {
            debug!("<-- {}", reply.trim_end());
        }
        Ok(reply)
    }

    /// Shuts the stream down and clears the channel.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.host = None;
    }
}

/// Maps a failed connect attempt onto the error taxonomy.
fn classify_connect(error: std::io::Error, host: &str) -> FtpClientError {
    match error.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => FtpClientError::Timeout(host.to_string()),
        ErrorKind::ConnectionRefused => FtpClientError::ConnectionRefused(host.to_string()),
        _ => FtpClientError::Io(error),
    }
}

/// Maps a socket error on an established stream: expired timeouts become
/// `Timeout`, everything else stays an I/O error.
fn classify_stream(error: std::io::Error, host: &str) -> FtpClientError {
    match error.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => FtpClientError::Timeout(host.to_string()),
        _ => FtpClientError::Io(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_send_writes_crlf_terminated_line() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut server, _) = listener.accept().unwrap();
            let mut buffer = [0; 64];
            let n = server.read(&mut buffer).unwrap();
            String::from_utf8_lossy(&buffer[..n]).into_owned()
        });

        let mut channel = ControlChannel::new(Duration::from_secs(2), 4096, false);
        channel.connect("127.0.0.1", addr.port()).unwrap();
        channel.send(&Command::Pwd).unwrap();

        assert_eq!(handle.join().unwrap(), "PWD\r\n");
        channel.close();
    }

    #[test]
    fn test_receive_returns_reply_text() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut server, _) = listener.accept().unwrap();
            server.write_all(b"200 Command okay\r\n").unwrap();
        });

        let mut channel = ControlChannel::new(Duration::from_secs(2), 4096, false);
        channel.connect("127.0.0.1", addr.port()).unwrap();

        assert_eq!(channel.receive().unwrap(), "200 Command okay\r\n");
    }

    #[test]
    fn test_refused_connection_maps_to_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut channel = ControlChannel::new(Duration::from_secs(2), 4096, false);
        match channel.connect("127.0.0.1", port) {
            Err(FtpClientError::ConnectionRefused(host)) => assert_eq!(host, "127.0.0.1"),
            other => panic!("expected ConnectionRefused, got {:?}", other),
        }
        assert!(!channel.is_connected());
    }

    #[test]
    fn test_send_without_connection_fails() {
        let mut channel = ControlChannel::new(Duration::from_secs(2), 4096, false);
        assert!(matches!(
            channel.send(&Command::Pwd),
            Err(FtpClientError::NotConnected)
        ));
        assert!(matches!(
            channel.receive(),
            Err(FtpClientError::NotConnected)
        ));
    }
}
