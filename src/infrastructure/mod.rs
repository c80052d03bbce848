//! Infrastructure utilities: sandbox paths.

pub mod paths;

pub use paths::{get_data_dir, log_file, store_file};
