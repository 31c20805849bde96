//! # Command Implementations
//!
//! One submodule per binary.

pub mod clone;
pub mod scan;
