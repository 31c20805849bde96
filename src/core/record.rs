//! One `REPO_URL|TARGET_PATH|BRANCH` line

use std::fmt;

use crate::config::FIELD_SEPARATOR;

/// A repository entry of the configuration file.
///
/// Fields carry no surrounding whitespace. A literal `|` inside a field
/// cannot be represented; the format has no escaping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RepositoryRecord {
	pub remote_url: String,
	pub target_path: String,
	pub branch: String,
}

impl RepositoryRecord {
	pub fn new(remote_url: impl Into<String>, target_path: impl Into<String>, branch: impl Into<String>) -> Self {
		Self {
			remote_url: remote_url.into().trim().to_string(),
			target_path: target_path.into().trim().to_string(),
			branch: branch.into().trim().to_string(),
		}
	}

	/// Serialized configuration line
	pub fn to_line(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for RepositoryRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}{sep}{}{sep}{}",
			self.remote_url,
			self.target_path,
			self.branch,
			sep = FIELD_SEPARATOR
		)
	}
}
