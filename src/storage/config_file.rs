//! Writing configuration files

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use crate::config::FORMAT_LINE;
use crate::core::RepositoryRecord;
use crate::processing::ConfigParser;

/// Template written on first run when the config file is missing
pub const TEMPLATE: &str = "\
# Repository configuration
# Format: REPO_URL|TARGET_PATH|BRANCH
# Lines starting with # are ignored. `~` and $VARIABLES in paths are expanded.
#
# Examples:
# https://github.com/username/repo.git|~/projects/repo|main
# https://github.com/username/another-repo|~/projects/another-repo|main
# git@github.com:username/private-repo.git|~/work/private-repo|main
# https://github.com/organization/project.git|~/work/project|develop
";

/// Header + records sorted by their full line
pub fn render_generated(records: &[RepositoryRecord], base: &Path, generated_at: DateTime<Local>) -> String {
	let mut lines: Vec<String> = records.iter().map(RepositoryRecord::to_line).collect();
	lines.sort();
	lines.dedup();

	let mut out = String::new();
	out.push_str(&format!("# Generated by repo-scan on {}\n", generated_at.format("%Y-%m-%d %H:%M:%S")));
	out.push_str(&format!("# Format: {}\n", FORMAT_LINE));
	out.push_str(&format!("# Base path: {}\n", base.display()));
	out.push('\n');
	for line in lines {
		out.push_str(&line);
		out.push('\n');
	}
	out
}

pub fn write_generated(path: &Path, records: &[RepositoryRecord], base: &Path) -> Result<()> {
	let contents = render_generated(records, base, Local::now());
	write_file(path, &contents)
}

pub fn write_template(path: &Path) -> Result<()> {
	write_file(path, TEMPLATE)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create directory {}", parent.display()))?;
	}

	let mut file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
	file.write_all(contents.as_bytes())
		.with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

/// Open a config file for streaming through the parser
pub fn open(path: &Path) -> Result<ConfigParser<BufReader<File>>> {
	let file = File::open(path).with_context(|| format!("Failed to open config file {}", path.display()))?;
	Ok(ConfigParser::new(BufReader::new(file)))
}
