//! # reposync
//!
//! Records the GitHub repositories found on one machine into a plain text
//! file and replays that file to clone them onto another.
//!
//! `repo-scan` walks a directory tree and writes `REPO_URL|TARGET_PATH|BRANCH`
//! lines; `repo-clone` reads them back and clones each repository.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod ui;
pub mod vcs;
