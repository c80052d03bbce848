//! Observability: tracing setup and log file management.

pub mod file_writer;
pub mod init;

pub use init::init_tracing;
