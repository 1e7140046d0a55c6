//! Reply-code interpretation
//!
//! Server replies are treated as opaque text. Only three numeric
//! prefixes are ever pattern-matched; everything else is handed back to
//! the caller verbatim.

/// Authentication accepted.
pub const LOGIN_SUCCESS: &str = "230";
/// Authentication rejected.
pub const LOGIN_FAILURE: &str = "530";
/// File or directory not found, or the requested action was refused.
pub const NOT_FOUND: &str = "550";

/// Whether `reply` begins with the given status-code prefix.
pub fn has_code(reply: &str, code: &str) -> bool {
    reply.starts_with(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_leading_code() {
        assert!(has_code("230 Login successful\r\n", LOGIN_SUCCESS));
        assert!(has_code("530 Login incorrect\r\n", LOGIN_FAILURE));
        assert!(has_code("550 File not found\r\n", NOT_FOUND));
    }

    #[test]
    fn test_rejects_other_codes() {
        assert!(!has_code("220 welcome\r\n", LOGIN_SUCCESS));
        assert!(!has_code("226 Transfer complete\r\n", NOT_FOUND));
        assert!(!has_code("", NOT_FOUND));
    }

    #[test]
    fn test_code_must_be_at_start() {
        assert!(!has_code("reply 550\r\n", NOT_FOUND));
    }
}
