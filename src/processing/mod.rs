//! Repository discovery and configuration parsing

pub mod discover;
pub mod parse;

pub use discover::{enclosing_repository, exclude_nested, find_repository_roots, inspect, DiscoveredRepository};
pub use parse::{ConfigParser, LineError, ParseEvent, ParseStats};
