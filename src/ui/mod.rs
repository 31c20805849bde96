//! # User Interface
//!
//! Colored, iconographic terminal output.

pub mod log;

pub use log::{debug, error, header, info, progress, prompt, success, summary, warn, Log};
