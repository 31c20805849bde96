//! Scan command - record local GitHub repositories

use anyhow::{Context, Result};
use colored::{Color, Colorize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config;
use crate::core::{url, RepositoryRecord};
use crate::processing::{self, DiscoveredRepository};
use crate::storage;
use crate::ui;
use crate::vcs::Vcs;

/// What a scan found, before anything is written
#[derive(Debug, Default)]
pub struct ScanReport {
	pub records: Vec<RepositoryRecord>,
	/// Repository roots found, nested ones included
	pub found: usize,
	pub nested: usize,
	pub non_hosted: Vec<PathBuf>,
	pub missing_remote: Vec<PathBuf>,
	/// Recorded, but in a URL form repo-clone rejects
	pub unsupported_url: Vec<PathBuf>,
}

/// Walk `base` and build one record per top-level GitHub repository
pub fn collect(base: &Path, vcs: &dyn Vcs, home: Option<&Path>) -> ScanReport {
	let roots = processing::find_repository_roots(base);
	let found = roots.len();
	let enclosing = processing::enclosing_repository(base);
	if let Some(outer) = &enclosing {
		ui::warn(&format!("Base path is inside repository {}", outer.display()));
	}
	let (roots, nested) = processing::exclude_nested(roots, enclosing.as_deref());

	let mut report = ScanReport {
		found,
		nested: nested.len(),
		..Default::default()
	};

	let total = roots.len();
	for (index, root) in roots.iter().enumerate() {
		let queue = ui::progress(index, total);
		let repo = processing::inspect(root, vcs, home);

		match classify(&repo) {
			Some(record) => {
				if url::is_valid(&url::normalize(&record.remote_url)) {
					ui::success(&format!("{} {} {}", queue, repo.display_path, repo.branch.dimmed()));
				} else {
					ui::warn(&format!(
						"{} {}: remote {} is not in a form repo-clone accepts",
						queue,
						repo.display_path,
						record.remote_url.dimmed()
					));
					report.unsupported_url.push(repo.path.clone());
				}
				report.records.push(record);
			}
			None if repo.remote_url.is_none() => {
				ui::warn(&format!("{} {}: no remote URL found", queue, repo.display_path));
				report.missing_remote.push(repo.path);
			}
			None => {
				ui::warn(&format!(
					"{} {}: non-GitHub remote {}",
					queue,
					repo.display_path,
					repo.remote_url.as_deref().unwrap_or_default().dimmed()
				));
				report.non_hosted.push(repo.path);
			}
		}
	}

	report.records.sort();
	report
}

/// Record for a repository with a GitHub remote, `None` otherwise
fn classify(repo: &DiscoveredRepository) -> Option<RepositoryRecord> {
	let remote = repo.remote_url.as_deref()?;
	if !url::is_hosted(remote) {
		return None;
	}
	Some(RepositoryRecord::new(remote, repo.display_path.as_str(), repo.branch.as_str()))
}

/// Scan `base`, write `output`. Fails only when `base` is unusable or the
/// output cannot be written.
pub fn run(base: &Path, output: &Path, vcs: &dyn Vcs) -> Result<ScanReport> {
	let start = Instant::now();

	let base = resolve_base(base)?;
	let home = config::home_dir();

	ui::info(&format!("Scanning: {}", base.display()));
	ui::info(&format!("Output: {}", output.display()));
	ui::header("Repositories");

	let report = collect(&base, vcs, home.as_deref());

	ui::summary(
		&[
			("Found", report.found, Color::BrightBlue),
			("Recorded", report.records.len(), Color::BrightGreen),
			("Nested", report.nested, Color::BrightBlack),
			("Non-GitHub", report.non_hosted.len(), Color::Yellow),
			("No remote", report.missing_remote.len(), Color::Red),
			("Unsupported URL", report.unsupported_url.len(), Color::Yellow),
		],
		start.elapsed(),
	);

	if report.records.is_empty() {
		ui::error("No GitHub repositories found, nothing written");
		return Ok(report);
	}

	storage::write_generated(output, &report.records, &base)?;
	ui::success(&format!("Wrote {} repositories to {}", report.records.len(), output.display()));

	Ok(report)
}

/// Absolute, readable base directory
fn resolve_base(base: &Path) -> Result<PathBuf> {
	let resolved = base
		.canonicalize()
		.with_context(|| format!("Base path does not exist: {}", base.display()))?;

	if !resolved.is_dir() {
		anyhow::bail!("Base path is not a directory: {}", resolved.display());
	}
	fs::read_dir(&resolved).with_context(|| format!("Base path is not readable: {}", resolved.display()))?;

	Ok(resolved)
}
