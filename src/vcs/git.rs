//! `git` command-line backend

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use super::{BranchProbe, Vcs};

pub const GIT_BIN_ENV_VAR: &str = "REPOSYNC_GIT";

/// Runs the `git` binary (or `$REPOSYNC_GIT`) as a subprocess
#[derive(Debug, Clone)]
pub struct GitCli {
	binary: String,
	available: OnceLock<bool>,
}

impl Default for GitCli {
	fn default() -> Self {
		Self::new()
	}
}

impl GitCli {
	pub fn new() -> Self {
		let binary = std::env::var(GIT_BIN_ENV_VAR)
			.ok()
			.filter(|b| !b.trim().is_empty())
			.unwrap_or_else(|| "git".to_string());
		Self::with_binary(binary)
	}

	pub fn with_binary(binary: impl Into<String>) -> Self {
		Self {
			binary: binary.into(),
			available: OnceLock::new(),
		}
	}

	/// Check if this instance's binary runs, probing once
	pub fn is_available(&self) -> bool {
		*self.available.get_or_init(|| {
			Command::new(&self.binary)
				.arg("--version")
				.stdout(Stdio::null())
				.stderr(Stdio::null())
				.status()
				.map(|s| s.success())
				.unwrap_or(false)
		})
	}

	/// Run a query inside `repo` and return trimmed stdout
	fn query(&self, repo: &Path, args: &[&str]) -> Result<String> {
		let output = Command::new(&self.binary)
			.arg("-C")
			.arg(repo)
			.args(args)
			.stdin(Stdio::null())
			.output()
			.with_context(|| format!("Failed to run git {}", args.join(" ")))?;

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
		}

		Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
	}
}

impl BranchProbe {
	fn args(self) -> &'static [&'static str] {
		match self {
			BranchProbe::ShowCurrent => &["branch", "--show-current"],
			BranchProbe::SymbolicRef => &["symbolic-ref", "--short", "HEAD"],
			BranchProbe::RevParse => &["rev-parse", "--abbrev-ref", "HEAD"],
		}
	}
}

impl Vcs for GitCli {
	fn remotes(&self, repo: &Path) -> Result<Vec<String>> {
		let out = self.query(repo, &["remote"])?;
		Ok(out.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
	}

	fn remote_url(&self, repo: &Path, remote: &str) -> Result<String> {
		self.query(repo, &["remote", "get-url", remote])
	}

	fn probe_branch(&self, repo: &Path, probe: BranchProbe) -> Option<String> {
		self.query(repo, probe.args()).ok()
	}

	fn clone_branch(&self, url: &str, branch: &str, target: &Path) -> Result<()> {
		// Inherit stdio so credential prompts and progress reach the operator
		let status = Command::new(&self.binary)
			.arg("clone")
			.arg("--single-branch")
			.arg("--branch")
			.arg(branch)
			.arg(url)
			.arg(target)
			.status()
			.context("Failed to execute git clone command")?;

		if !status.success() {
			anyhow::bail!("git clone exited with {}", status);
		}
		Ok(())
	}
}
