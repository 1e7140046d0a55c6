//! Client facade
//!
//! Owns the session state plus the control and data channels, and
//! exposes the connection lifecycle operations. The per-verb file and
//! directory operations live in `operations`.

pub mod operations;
pub mod session;

pub use session::Session;

use log::info;

use crate::channel::{ControlChannel, DataChannel};
use crate::config::ClientConfig;
use crate::error::{FtpClientError, Result};
use crate::protocol::{Command, replies};

/// FTP protocol client.
///
/// One long-lived control connection carries commands and replies; a
/// transient active-mode data channel is opened per data-bearing
/// command. All operations are strictly sequential: the client never
/// pipelines and supports no concurrent transfers.
pub struct FtpClient {
    config: ClientConfig,
    session: Session,
    control: ControlChannel,
    data: DataChannel,
}

impl Default for FtpClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl FtpClient {
    /// Creates a disconnected client.
    pub fn new(config: ClientConfig) -> Self {
        let control = ControlChannel::new(config.timeout(), config.buffer_size, config.debug);
        let data = DataChannel::new(config.buffer_size);
        Self {
            config,
            session: Session::default(),
            control,
            data,
        }
    }

    /// The connected host, if any.
    pub fn host(&self) -> Option<&str> {
        self.session.host()
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&str> {
        self.session.user()
    }

    /// Connects to `host` (defaulting to `localhost` when empty) and
    /// returns the server greeting.
    ///
    /// An existing session is fully reset first, so calling this while
    /// connected behaves as a reconnect. May change `host` and, through
    /// the reset, clear `user`.
    pub fn connect(&mut self, host: &str) -> Result<String> {
        let host = if host.is_empty() { "localhost" } else { host };

        if self.session.is_connected() {
            self.reset();
        }

        info!("Connecting to {}:{}", host, self.config.control_port);
        if let Err(e) = self.control.connect(host, self.config.control_port) {
            match e {
                FtpClientError::Timeout(_) | FtpClientError::UnknownHost(_) => self.reset(),
                // A refused connection established nothing to unwind.
                _ => {}
            }
            return Err(e);
        }

        self.session.set_host(Some(host.to_string()));
        self.receive()
    }

    /// Sends QUIT, reads the reply, and fully resets the session.
    /// Clears `host` and `user`.
    pub fn disconnect(&mut self) -> Result<String> {
        self.require_connected()?;

        self.send(&Command::Quit)?;
        let reply = self.receive()?;
        self.reset();
        Ok(reply)
    }

    /// Authenticates as `user`, returning the PASS reply verbatim.
    ///
    /// The USER reply is read and discarded. A reply starting with 230
    /// records `user`; one starting with 530 clears it. Failed
    /// authentication is not an error; callers inspect the reply
    /// prefix.
    pub fn login(&mut self, user: &str, password: &str) -> Result<String> {
        self.require_connected()?;

        self.send(&Command::User(user.to_string()))?;
        self.receive()?;

        self.send(&Command::Pass(password.to_string()))?;
        let reply = self.receive()?;

        if replies::has_code(&reply, replies::LOGIN_SUCCESS) {
            info!("Logged in as {}", user);
            self.session.set_user(Some(user.to_string()));
        } else if replies::has_code(&reply, replies::LOGIN_FAILURE) {
            self.session.set_user(None);
        }
        Ok(reply)
    }

    /// Clears the logged-in user locally. No command is sent to the
    /// server. Clears `user` only.
    pub fn logout(&mut self) -> Result<()> {
        self.require_authenticated()?;
        self.session.set_user(None);
        Ok(())
    }

    // --------------------
    // Session plumbing
    // --------------------

    /// Tears down both channels and clears all session state. The
    /// channels are replaced, never reused.
    fn reset(&mut self) {
        if let Some(host) = self.session.host() {
            info!(
                "Dropping existing connection to {}:{}",
                host, self.config.control_port
            );
        }
        self.control.close();
        self.control = ControlChannel::new(
            self.config.timeout(),
            self.config.buffer_size,
            self.config.debug,
        );
        self.data.reset();
        self.data = DataChannel::new(self.config.buffer_size);
        self.session.reset();
    }

    fn require_connected(&self) -> Result<()> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(FtpClientError::NotConnected)
        }
    }

    fn require_authenticated(&self) -> Result<()> {
        self.require_connected()?;
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(FtpClientError::NotAuthenticated)
        }
    }

    /// Control-channel send; a timed-out write resets the session before
    /// the error propagates.
    fn send(&mut self, command: &Command) -> Result<()> {
        let result = self.control.send(command);
        self.reset_on_timeout(result)
    }

    /// Control-channel receive with the same timeout handling as `send`.
    fn receive(&mut self) -> Result<String> {
        let result = self.control.receive();
        self.reset_on_timeout(result)
    }

    /// Opens the per-command data connection, capturing the immediate
    /// control-channel reply.
    fn open_data_connection(&mut self) -> Result<String> {
        let result = self.data.open_connection(&mut self.control);
        self.reset_on_timeout(result)
    }

    /// Reads the whole data phase of the current transfer.
    fn read_data(&mut self) -> Result<Vec<u8>> {
        self.data.read_all()
    }

    /// Writes the whole data phase of the current transfer.
    fn write_data(&mut self, content: &[u8]) -> Result<()> {
        self.data.write_all(content)
    }

    fn reset_on_timeout<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(FtpClientError::Timeout(_)) = &result {
            self.reset();
        }
        result
    }
}
