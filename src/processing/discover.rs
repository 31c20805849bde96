//! Repository discovery under a base directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::GIT_DIR;
use crate::core::paths;
use crate::ui;
use crate::vcs::Vcs;

/// A repository root found during a scan, with its metadata resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepository {
	pub path: PathBuf,
	/// `None` when no remote could be determined
	pub remote_url: Option<String>,
	pub branch: String,
	/// `path` with the home prefix shown as `~`
	pub display_path: String,
}

/// Directories under `base` that directly contain a `.git` directory.
/// Does not descend into the marker directories themselves.
pub fn find_repository_roots(base: &Path) -> Vec<PathBuf> {
	let mut roots = Vec::new();
	let mut walker = WalkDir::new(base).follow_links(false).into_iter();

	while let Some(entry) = walker.next() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				ui::debug(&format!("Skipping unreadable entry: {}", e));
				continue;
			}
		};

		if !entry.file_type().is_dir() || entry.file_name() != std::ffi::OsStr::new(GIT_DIR) {
			continue;
		}

		walker.skip_current_dir();
		if entry.depth() == 0 {
			continue;
		}
		if let Some(parent) = entry.path().parent() {
			roots.push(parent.to_path_buf());
		}
	}

	roots.sort();
	roots
}

/// Closest directory strictly above `base` that holds a `.git` directory
pub fn enclosing_repository(base: &Path) -> Option<PathBuf> {
	base.ancestors()
		.skip(1)
		.find(|dir| dir.join(GIT_DIR).is_dir())
		.map(Path::to_path_buf)
}

/// Split roots into top-level repositories and ones nested inside another
/// repository. With an `enclosing` repository every root is nested.
pub fn exclude_nested(mut roots: Vec<PathBuf>, enclosing: Option<&Path>) -> (Vec<PathBuf>, Vec<PathBuf>) {
	roots.sort();
	roots.dedup();

	let mut kept: Vec<PathBuf> = Vec::with_capacity(roots.len());
	let mut nested = Vec::new();

	for root in roots {
		let inside = enclosing.is_some_and(|outer| root.as_path() != outer && root.starts_with(outer))
			|| kept.iter().any(|outer| root != *outer && root.starts_with(outer));
		if inside {
			ui::debug(&format!("Nested repository excluded: {}", root.display()));
			nested.push(root);
		} else {
			kept.push(root);
		}
	}

	(kept, nested)
}

/// Resolve remote and branch for one root. A failing remote query is
/// reported as "no remote" instead of aborting.
pub fn inspect(path: &Path, vcs: &dyn Vcs, home: Option<&Path>) -> DiscoveredRepository {
	let remote_url = match vcs.find_remote_url(path) {
		Ok(url) => url,
		Err(e) => {
			ui::debug(&format!("Remote query failed for {}: {}", path.display(), e));
			None
		}
	};

	DiscoveredRepository {
		path: path.to_path_buf(),
		remote_url,
		branch: vcs.current_branch(path),
		display_path: paths::home_relative(path, home),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vcs::fake::{FakeRepo, FakeVcs};
	use crate::vcs::BranchProbe;
	use std::fs;
	use tempfile::TempDir;

	fn make_repo(base: &Path, rel: &str) -> PathBuf {
		let path = base.join(rel);
		fs::create_dir_all(path.join(GIT_DIR).join("objects")).unwrap();
		path
	}

	#[test]
	fn finds_roots_and_drops_nested_ones() {
		let tmp = TempDir::new().unwrap();
		let a = make_repo(tmp.path(), "a");
		make_repo(tmp.path(), "a/vendor/b");
		let c = make_repo(tmp.path(), "projects/c");
		fs::create_dir_all(tmp.path().join("plain/dir")).unwrap();

		let roots = find_repository_roots(tmp.path());
		assert_eq!(roots.len(), 3);

		let (kept, nested) = exclude_nested(roots, None);
		assert_eq!(kept, vec![a.clone(), c]);
		assert_eq!(nested, vec![a.join("vendor/b")]);
	}

	#[test]
	fn sibling_with_common_name_prefix_is_not_nested() {
		let roots = vec![PathBuf::from("/base/app"), PathBuf::from("/base/app-two")];
		let (kept, nested) = exclude_nested(roots, None);
		assert_eq!(kept.len(), 2);
		assert!(nested.is_empty());
	}

	#[test]
	fn base_inside_another_repository_has_only_nested_roots() {
		let tmp = TempDir::new().unwrap();
		let outer = make_repo(tmp.path(), "mono");
		let base = outer.join("vendor");
		let inner = make_repo(&base, "lib");

		assert_eq!(enclosing_repository(&base), Some(outer.clone()));
		assert_eq!(enclosing_repository(&outer), None);

		let (kept, nested) = exclude_nested(find_repository_roots(&base), Some(outer.as_path()));
		assert!(kept.is_empty());
		assert_eq!(nested, vec![inner]);
	}

	#[test]
	fn git_file_is_not_a_marker() {
		let tmp = TempDir::new().unwrap();
		let sub = tmp.path().join("worktree");
		fs::create_dir_all(&sub).unwrap();
		fs::write(sub.join(GIT_DIR), "gitdir: ../elsewhere").unwrap();

		assert!(find_repository_roots(tmp.path()).is_empty());
	}

	#[test]
	fn inspect_survives_remote_failure() {
		let home = PathBuf::from("/home/alice");
		let vcs = FakeVcs::default().with_repo(
			"/home/alice/src/app",
			FakeRepo { remote_error: true, ..Default::default() }.branch(BranchProbe::ShowCurrent, "dev"),
		);

		let repo = inspect(Path::new("/home/alice/src/app"), &vcs, Some(home.as_path()));
		assert_eq!(repo.remote_url, None);
		assert_eq!(repo.branch, "dev");
		assert_eq!(repo.display_path, "~/src/app");
	}
}
