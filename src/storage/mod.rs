//! Configuration file storage

pub mod config_file;

pub use config_file::{open, write_generated, write_template, TEMPLATE};
