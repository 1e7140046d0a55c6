//! Error handling
//!
//! Defines the error taxonomy of the FTP client.

pub mod types;

pub use types::*;
