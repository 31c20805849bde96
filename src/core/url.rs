//! Remote URL normalization and validation
//!
//! Three shapes are accepted:
//! - `https://github.com/ORG/REPO.git`
//! - `https://github.com/ORG/REPO`
//! - `USER@github.com:ORG/REPO.git`

use crate::config::{GIT_SUFFIX, HOSTING_DOMAIN, HTTPS_PREFIX, SSH_HOST};

/// A URL in one of the accepted forms, split into its path segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
	pub org: String,
	pub repo: String,
}

impl RepoUrl {
	/// Match `url` against the accepted shapes
	pub fn parse(url: &str) -> Option<Self> {
		if let Some(rest) = url.strip_prefix(HTTPS_PREFIX) {
			if let Some(path) = rest.strip_suffix(GIT_SUFFIX) {
				if let Some((org, repo)) = split_segments(path) {
					return Some(Self::new(org, repo));
				}
			}
			if let Some((org, repo)) = split_segments(rest) {
				if repo != GIT_SUFFIX {
					return Some(Self::new(org, repo));
				}
			}
			return None;
		}

		let (user, rest) = url.split_once('@')?;
		if user.is_empty() || user.contains(['/', ':']) {
			return None;
		}
		let (host, path) = rest.split_once(':')?;
		if host != SSH_HOST {
			return None;
		}
		let (org, repo) = split_segments(path.strip_suffix(GIT_SUFFIX)?)?;
		Some(Self::new(org, repo))
	}

	fn new(org: &str, repo: &str) -> Self {
		Self {
			org: org.to_string(),
			repo: repo.to_string(),
		}
	}

	/// `ORG/REPO`, without any `.git` suffix
	pub fn slug(&self) -> String {
		format!("{}/{}", self.org, self.repo)
	}
}

/// `ORG/REPO` with both segments non-empty and slash-free
fn split_segments(path: &str) -> Option<(&str, &str)> {
	let (org, repo) = path.split_once('/')?;
	if org.is_empty() || repo.is_empty() || repo.contains('/') {
		return None;
	}
	Some((org, repo))
}

/// Append `.git` unless already present. Idempotent.
pub fn normalize(url: &str) -> String {
	if url.ends_with(GIT_SUFFIX) {
		url.to_string()
	} else {
		format!("{}{}", url, GIT_SUFFIX)
	}
}

pub fn is_valid(url: &str) -> bool {
	RepoUrl::parse(url).is_some()
}

/// Provider check used by the scanner to sort out foreign remotes. Looks
/// at the host only, in both `scheme://[user@]host[:port]/…` and
/// `[user@]host:path` forms.
pub fn is_hosted(url: &str) -> bool {
	host(url).is_some_and(|h| h.eq_ignore_ascii_case(HOSTING_DOMAIN))
}

fn host(url: &str) -> Option<&str> {
	let authority = match url.split_once("://") {
		Some((_, rest)) => rest.split('/').next()?,
		None => {
			let (authority, _) = url.split_once(':')?;
			if authority.contains('/') {
				return None;
			}
			authority
		}
	};
	let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
	let host = host.split(':').next()?;
	(!host.is_empty()).then_some(host)
}
