//! Logging utilities
//!
//! Provides logging setup for front-ends embedding the client.

use env_logger;

/// Setup logging (env_logger picks up the RUST_LOG environment variable)
pub fn setup_logging() {
    env_logger::init();
}
