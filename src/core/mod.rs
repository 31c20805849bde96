//! Core domain types

pub mod paths;
pub mod record;
pub mod url;

pub use record::RepositoryRecord;
pub use url::RepoUrl;
