//! FTP protocol surface
//!
//! Command rendering and minimal reply-code interpretation.

pub mod commands;
pub mod replies;

pub use commands::Command;
