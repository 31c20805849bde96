//! # Version Control
//!
//! The handful of repository queries and the clone operation the scanner
//! and cloner need, behind a trait so both can run against a fake in tests.

pub mod git;

use anyhow::Result;
use std::path::Path;

use crate::config::{DEFAULT_BRANCH, PRIMARY_REMOTE};
use crate::ui;

pub use git::GitCli;

/// Ways of asking for the checked-out branch, tried in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchProbe {
	/// `git branch --show-current`
	ShowCurrent,
	/// `git symbolic-ref --short HEAD`
	SymbolicRef,
	/// `git rev-parse --abbrev-ref HEAD`
	RevParse,
}

pub const BRANCH_PROBES: [BranchProbe; 3] = [
	BranchProbe::ShowCurrent,
	BranchProbe::SymbolicRef,
	BranchProbe::RevParse,
];

pub trait Vcs {
	/// Remote names in configured order
	fn remotes(&self, repo: &Path) -> Result<Vec<String>>;

	fn remote_url(&self, repo: &Path, remote: &str) -> Result<String>;

	/// Branch name reported by one probe, `None` when it has no answer
	fn probe_branch(&self, repo: &Path, probe: BranchProbe) -> Option<String>;

	/// Single-branch clone of `branch` into `target`
	fn clone_branch(&self, url: &str, branch: &str, target: &Path) -> Result<()>;

	/// URL of the primary remote, else of the first remote listed
	fn find_remote_url(&self, repo: &Path) -> Result<Option<String>> {
		let remotes = self.remotes(repo)?;

		let remote = match remotes.iter().find(|r| r.as_str() == PRIMARY_REMOTE) {
			Some(primary) => primary,
			None => match remotes.first() {
				Some(first) => {
					ui::debug(&format!("No '{}' remote in {}, using '{}'", PRIMARY_REMOTE, repo.display(), first));
					first
				}
				None => return Ok(None),
			},
		};

		let url = self.remote_url(repo, remote)?;
		let url = url.trim();
		if url.is_empty() {
			Ok(None)
		} else {
			Ok(Some(url.to_string()))
		}
	}

	/// First probe with an answer wins; detached or branchless repos get `main`
	fn current_branch(&self, repo: &Path) -> String {
		for probe in BRANCH_PROBES {
			if let Some(branch) = self.probe_branch(repo, probe) {
				let branch = branch.trim();
				if !branch.is_empty() && branch != "HEAD" {
					return branch.to_string();
				}
			}
			ui::debug(&format!("{:?} gave no branch for {}", probe, repo.display()));
		}
		DEFAULT_BRANCH.to_string()
	}
}

#[cfg(test)]
pub mod fake {
	//! In-memory `Vcs` for tests

	use super::*;
	use std::cell::RefCell;
	use std::collections::HashMap;
	use std::path::PathBuf;

	#[derive(Default, Clone)]
	pub struct FakeRepo {
		pub remotes: Vec<(String, String)>,
		pub branches: HashMap<&'static str, String>,
		pub remote_error: bool,
	}

	#[derive(Default)]
	pub struct FakeVcs {
		pub repos: HashMap<PathBuf, FakeRepo>,
		/// URLs whose clone fails
		pub failing: Vec<String>,
		pub clones: RefCell<Vec<(String, String, PathBuf)>>,
	}

	impl FakeVcs {
		pub fn with_repo(mut self, path: impl Into<PathBuf>, repo: FakeRepo) -> Self {
			self.repos.insert(path.into(), repo);
			self
		}
	}

	impl FakeRepo {
		pub fn remote(mut self, name: &str, url: &str) -> Self {
			self.remotes.push((name.to_string(), url.to_string()));
			self
		}

		pub fn branch(mut self, probe: BranchProbe, name: &str) -> Self {
			self.branches.insert(probe_key(probe), name.to_string());
			self
		}
	}

	fn probe_key(probe: BranchProbe) -> &'static str {
		match probe {
			BranchProbe::ShowCurrent => "show-current",
			BranchProbe::SymbolicRef => "symbolic-ref",
			BranchProbe::RevParse => "rev-parse",
		}
	}

	impl Vcs for FakeVcs {
		fn remotes(&self, repo: &Path) -> Result<Vec<String>> {
			let Some(r) = self.repos.get(repo) else {
				anyhow::bail!("not a git repository: {}", repo.display());
			};
			if r.remote_error {
				anyhow::bail!("git remote failed");
			}
			Ok(r.remotes.iter().map(|(n, _)| n.clone()).collect())
		}

		fn remote_url(&self, repo: &Path, remote: &str) -> Result<String> {
			self.repos
				.get(repo)
				.and_then(|r| r.remotes.iter().find(|(n, _)| n == remote))
				.map(|(_, url)| url.clone())
				.ok_or_else(|| anyhow::anyhow!("no such remote '{}'", remote))
		}

		fn probe_branch(&self, repo: &Path, probe: BranchProbe) -> Option<String> {
			self.repos.get(repo)?.branches.get(probe_key(probe)).cloned()
		}

		fn clone_branch(&self, url: &str, branch: &str, target: &Path) -> Result<()> {
			if self.failing.iter().any(|f| f == url) {
				anyhow::bail!("Remote branch {} not found", branch);
			}
			std::fs::create_dir_all(target.join(".git"))?;
			self.clones
				.borrow_mut()
				.push((url.to_string(), branch.to_string(), target.to_path_buf()));
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::fake::{FakeRepo, FakeVcs};
	use super::*;

	#[test]
	fn prefers_origin_over_first_remote() {
		let vcs = FakeVcs::default().with_repo(
			"/r",
			FakeRepo::default()
				.remote("upstream", "https://github.com/up/r.git")
				.remote("origin", "https://github.com/me/r.git"),
		);
		let url = vcs.find_remote_url(Path::new("/r")).unwrap();
		assert_eq!(url.as_deref(), Some("https://github.com/me/r.git"));
	}

	#[test]
	fn falls_back_to_first_remote() {
		let vcs = FakeVcs::default().with_repo(
			"/r",
			FakeRepo::default()
				.remote("upstream", "https://github.com/up/r.git")
				.remote("fork", "https://github.com/me/r.git"),
		);
		let url = vcs.find_remote_url(Path::new("/r")).unwrap();
		assert_eq!(url.as_deref(), Some("https://github.com/up/r.git"));
	}

	#[test]
	fn no_remotes_means_no_url() {
		let vcs = FakeVcs::default().with_repo("/r", FakeRepo::default());
		assert_eq!(vcs.find_remote_url(Path::new("/r")).unwrap(), None);
	}

	#[test]
	fn branch_probes_run_in_order() {
		let vcs = FakeVcs::default().with_repo(
			"/r",
			FakeRepo::default()
				.branch(BranchProbe::SymbolicRef, "develop")
				.branch(BranchProbe::RevParse, "other"),
		);
		assert_eq!(vcs.current_branch(Path::new("/r")), "develop");
	}

	#[test]
	fn detached_head_defaults_to_main() {
		let vcs = FakeVcs::default().with_repo(
			"/r",
			FakeRepo::default()
				.branch(BranchProbe::ShowCurrent, "")
				.branch(BranchProbe::RevParse, "HEAD"),
		);
		assert_eq!(vcs.current_branch(Path::new("/r")), "main");
	}
}
