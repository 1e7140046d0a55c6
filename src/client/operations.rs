//! Module `operations`
//!
//! One method per FTP verb. The data-bearing operations (LIST, RETR,
//! STOR) coordinate the control channel with a per-command active-mode
//! data connection; the rest are single command/reply round trips. Every
//! operation requires a connected and authenticated session.

use log::info;
use std::fs::{self, File};
use std::io::Write;

use crate::error::{FtpClientError, Result};
use crate::protocol::{Command, replies};

use super::FtpClient;

impl FtpClient {
    /// Lists `path` (or the current directory) over a data connection.
    ///
    /// Returns the concatenation of the data-connection-open reply, the
    /// LIST reply, the transferred listing, and the completion reply.
    /// When the LIST reply reports 550, the data phase is skipped and
    /// only the replies read so far are returned.
    pub fn list(&mut self, path: Option<&str>) -> Result<String> {
        self.require_authenticated()?;

        let mut reply = self.open_data_connection()?;
        self.send(&Command::List(path.map(str::to_string)))?;
        let list_reply = self.receive()?;
        reply.push_str(&list_reply);

        if !replies::has_code(&list_reply, replies::NOT_FOUND) {
            let content = self.read_data()?;
            reply.push_str(&String::from_utf8_lossy(&content));
            reply.push_str(&self.receive()?);
        }
        Ok(reply)
    }

    /// Downloads `remote` into the local file `local`.
    ///
    /// When the RETR reply reports 550 no local file is created and the
    /// returned handle is `None`. A local open or write failure surfaces
    /// as `LocalIo` and discards the replies accumulated so far.
    pub fn retrieve(&mut self, remote: &str, local: &str) -> Result<(String, Option<File>)> {
        self.require_authenticated()?;

        let mut reply = self.open_data_connection()?;
        self.send(&Command::Retr(remote.to_string()))?;
        let retr_reply = self.receive()?;
        reply.push_str(&retr_reply);

        if replies::has_code(&retr_reply, replies::NOT_FOUND) {
            return Ok((reply, None));
        }

        let content = self.read_data()?;
        let mut file =
            File::create(local).map_err(|e| FtpClientError::LocalIo(e.to_string()))?;
        file.write_all(&content)
            .map_err(|e| FtpClientError::LocalIo(e.to_string()))?;
        info!("Retrieved {} into {} ({} bytes)", remote, local, content.len());

        reply.push_str(&self.receive()?);
        Ok((reply, Some(file)))
    }

    /// Uploads the local file `local` as `remote`.
    ///
    /// A local open or read failure surfaces as `LocalIo`. Returns the
    /// concatenation of every control-channel reply read.
    pub fn store(&mut self, local: &str, remote: &str) -> Result<String> {
        self.require_authenticated()?;

        let mut reply = self.open_data_connection()?;
        self.send(&Command::Stor(remote.to_string()))?;
        reply.push_str(&self.receive()?);

        let content = fs::read(local).map_err(|e| FtpClientError::LocalIo(e.to_string()))?;
        self.write_data(&content)?;
        info!("Stored {} as {} ({} bytes)", local, remote, content.len());

        reply.push_str(&self.receive()?);
        Ok(reply)
    }

    /// Prints the server-side working directory.
    pub fn pwd(&mut self) -> Result<String> {
        self.simple_command(Command::Pwd)
    }

    /// Changes the server-side working directory.
    pub fn cwd(&mut self, directory: &str) -> Result<String> {
        self.simple_command(Command::Cwd(directory.to_string()))
    }

    /// Moves to the parent directory.
    pub fn cdup(&mut self) -> Result<String> {
        self.simple_command(Command::Cdup)
    }

    /// Creates a directory.
    pub fn mkdir(&mut self, directory: &str) -> Result<String> {
        self.simple_command(Command::Mkd(directory.to_string()))
    }

    /// Deletes a file.
    pub fn rm(&mut self, filename: &str) -> Result<String> {
        self.simple_command(Command::Dele(filename.to_string()))
    }

    /// Deletes a directory.
    pub fn rmdir(&mut self, directory: &str) -> Result<String> {
        self.simple_command(Command::Rmd(directory.to_string()))
    }

    /// Renames `from` to `to`.
    ///
    /// The RNTO leg only runs when the RNFR reply did not report 550;
    /// the returned text concatenates the replies of both legs.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<String> {
        self.require_authenticated()?;

        self.send(&Command::Rnfr(from.to_string()))?;
        let mut reply = self.receive()?;

        if !replies::has_code(&reply, replies::NOT_FOUND) {
            self.send(&Command::Rnto(to.to_string()))?;
            reply.push_str(&self.receive()?);
        }
        Ok(reply)
    }

    fn simple_command(&mut self, command: Command) -> Result<String> {
        self.require_authenticated()?;
        self.send(&command)?;
        self.receive()
    }
}
