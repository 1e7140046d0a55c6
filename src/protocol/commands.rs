//! FTP command set
//!
//! Client-side representation of the verbs this crate emits and their
//! wire rendering. Every command is a single `<VERB>[ <args>]\r\n` line.

/// Commands emitted on the control channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    User(String),
    Pass(String),
    List(Option<String>),
    Eprt(String),
    Quit,
    Retr(String),
    Stor(String),
    Pwd,
    Cwd(String),
    Cdup,
    Mkd(String),
    Dele(String),
    Rmd(String),
    Rnfr(String),
    Rnto(String),
}

impl Command {
    /// Renders the CRLF-terminated protocol line for this command.
    pub fn to_wire(&self) -> String {
        match self {
            Command::User(user) => format!("USER {}\r\n", user),
            Command::Pass(password) => format!("PASS {}\r\n", password),
            Command::List(None) => "LIST\r\n".to_string(),
            Command::List(Some(path)) => format!("LIST {}\r\n", path),
            Command::Eprt(endpoint) => format!("EPRT {}\r\n", endpoint),
            Command::Quit => "QUIT\r\n".to_string(),
            Command::Retr(filename) => format!("RETR {}\r\n", filename),
            Command::Stor(filename) => format!("STOR {}\r\n", filename),
            Command::Pwd => "PWD\r\n".to_string(),
            Command::Cwd(directory) => format!("CWD {}\r\n", directory),
            Command::Cdup => "CDUP\r\n".to_string(),
            Command::Mkd(directory) => format!("MKD {}\r\n", directory),
            Command::Dele(filename) => format!("DELE {}\r\n", filename),
            Command::Rmd(directory) => format!("RMD {}\r\n", directory),
            Command::Rnfr(from) => format!("RNFR {}\r\n", from),
            Command::Rnto(to) => format!("RNTO {}\r\n", to),
        }
    }

    /// The verb alone, safe for logging (no credentials).
    pub fn verb(&self) -> &'static str {
        match self {
            Command::User(_) => "USER",
            Command::Pass(_) => "PASS",
            Command::List(_) => "LIST",
            Command::Eprt(_) => "EPRT",
            Command::Quit => "QUIT",
            Command::Retr(_) => "RETR",
            Command::Stor(_) => "STOR",
            Command::Pwd => "PWD",
            Command::Cwd(_) => "CWD",
            Command::Cdup => "CDUP",
            Command::Mkd(_) => "MKD",
            Command::Dele(_) => "DELE",
            Command::Rmd(_) => "RMD",
            Command::Rnfr(_) => "RNFR",
            Command::Rnto(_) => "RNTO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_commands() {
        assert_eq!(Command::Quit.to_wire(), "QUIT\r\n");
        assert_eq!(Command::Pwd.to_wire(), "PWD\r\n");
        assert_eq!(Command::Cdup.to_wire(), "CDUP\r\n");
        assert_eq!(Command::List(None).to_wire(), "LIST\r\n");
    }

    #[test]
    fn test_render_commands_with_args() {
        assert_eq!(
            Command::User("john".to_string()).to_wire(),
            "USER john\r\n"
        );
        assert_eq!(
            Command::Retr("file.txt".to_string()).to_wire(),
            "RETR file.txt\r\n"
        );
        assert_eq!(
            Command::List(Some("/pub".to_string())).to_wire(),
            "LIST /pub\r\n"
        );
        assert_eq!(
            Command::Rnfr("a.txt".to_string()).to_wire(),
            "RNFR a.txt\r\n"
        );
        assert_eq!(
            Command::Rnto("b.txt".to_string()).to_wire(),
            "RNTO b.txt\r\n"
        );
        assert_eq!(
            Command::Mkd("incoming".to_string()).to_wire(),
            "MKD incoming\r\n"
        );
    }

    #[test]
    fn test_render_eprt_endpoint() {
        assert_eq!(
            Command::Eprt("|1|127.0.0.1|2122|".to_string()).to_wire(),
            "EPRT |1|127.0.0.1|2122|\r\n"
        );
    }

    #[test]
    fn test_verb_hides_arguments() {
        assert_eq!(Command::Pass("secret".to_string()).verb(), "PASS");
        assert_eq!(Command::Stor("upload.txt".to_string()).verb(), "STOR");
    }
}
