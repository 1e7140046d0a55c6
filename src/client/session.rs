//! Module `session`
//!
//! Tracks the mutable connection and authentication state of one client
//! session: which host we are connected to and which user is logged in.

/// Connection and authentication state owned by `FtpClient`.
///
/// `user` is only ever set while `host` is set: a session cannot be
/// authenticated without being connected. Clearing the host therefore
/// clears the user as well.
#[derive(Debug, Default)]
pub struct Session {
    host: Option<String>,
    user: Option<String>,
}

impl Session {
    /// Clears all session state, dropping host and user.
    pub fn reset(&mut self) {
        self.host = None;
        self.user = None;
    }

    /// Returns whether the session has an active host.
    pub fn is_connected(&self) -> bool {
        self.host.is_some()
    }

    /// Returns whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The connected host, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Sets or clears the connected host. Clearing it also clears the
    /// user.
    pub fn set_host(&mut self, host: Option<String>) {
        if host.is_none() {
            self.user = None;
        }
        self.host = host;
    }

    /// Sets or clears the logged-in user.
    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::default();
        assert!(!session.is_connected());
        assert!(!session.is_authenticated());
        assert_eq!(session.host(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_tracks_host_and_user() {
        let mut session = Session::default();
        session.set_host(Some("foo".to_string()));
        session.set_user(Some("john".to_string()));

        assert!(session.is_connected());
        assert!(session.is_authenticated());
        assert_eq!(session.host(), Some("foo"));
        assert_eq!(session.user(), Some("john"));
    }

    #[test]
    fn test_clearing_host_clears_user() {
        let mut session = Session::default();
        session.set_host(Some("foo".to_string()));
        session.set_user(Some("john".to_string()));

        session.set_host(None);

        assert_eq!(session.host(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::default();
        session.set_host(Some("foo".to_string()));
        session.set_user(Some("john".to_string()));

        session.reset();

        assert!(!session.is_connected());
        assert!(!session.is_authenticated());
    }
}
