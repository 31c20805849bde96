use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::clone::{CloneOptions, PromptMode};
use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_FILE};

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

/// Find GitHub repositories under a directory and record them
#[derive(Parser, Debug)]
#[command(
	name = "repo-scan",
	author,
	version,
	about = "Record local GitHub repositories into a config file",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin}                          {d1}
  {bin} {a2}      {d2}
  {bin} {a3}  {d3}",
		title = "Examples:".bright_blue().bold(),
		bin = "repo-scan".bright_blue(),
		d1 = "Scan the current directory".dimmed(),
		a2 = "~/src".yellow(),
		d2 = "Scan ~/src into repos_generated.txt".dimmed(),
		a3 = "~/src repos.txt".yellow(),
		d3 = "Scan ~/src into repos.txt".dimmed(),
	),
)]
pub struct ScanCli {
	/// Directory to search for repositories
	#[arg(value_name = "BASE_PATH", default_value = ".")]
	pub base_path: PathBuf,

	/// File to write the configuration to
	#[arg(value_name = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
	pub output_file: PathBuf,

	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose")]
	pub verbose: bool,
}

/// Clone every repository listed in a config file
#[derive(Parser, Debug)]
#[command(
	name = "repo-clone",
	author,
	version,
	about = "Clone repositories listed in a config file",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin}                        {d1}
  {bin} {a2}        {d2}
  {bin} {a3}            {d3}

{fmt} REPO_URL|TARGET_PATH|BRANCH  (default file: {default})",
		title = "Examples:".bright_blue().bold(),
		bin = "repo-clone".bright_blue(),
		d1 = "Clone everything in repos.txt".dimmed(),
		a2 = "my.txt --dry-run".yellow(),
		d2 = "Show what would be cloned".dimmed(),
		a3 = "--per-item".yellow(),
		d3 = "Ask y/N for every existing directory".dimmed(),
		fmt = "Format:".bright_blue().bold(),
		default = DEFAULT_CONFIG_FILE,
	),
)]
pub struct CloneCli {
	/// Config file to read (default: $REPOSYNC_CONFIG or repos.txt)
	#[arg(value_name = "CONFIG_FILE")]
	pub config_file: Option<PathBuf>,

	/// Ask y/N for each existing directory instead of offering skip all / re-clone all
	#[arg(long = "per-item")]
	pub per_item: bool,

	/// Validate the file and list what would be cloned without cloning
	#[arg(short = 'n', long = "dry-run")]
	pub dry_run: bool,

	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose")]
	pub verbose: bool,
}

impl CloneCli {
	pub fn options(&self) -> CloneOptions {
		CloneOptions {
			mode: if self.per_item { PromptMode::PerItem } else { PromptMode::Batch },
			dry_run: self.dry_run,
		}
	}

	pub fn config_path(&self) -> PathBuf {
		self.config_file.clone().unwrap_or_else(crate::config::default_config_file)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn definitions_are_consistent() {
		ScanCli::command().debug_assert();
		CloneCli::command().debug_assert();
	}

	#[test]
	fn scan_defaults() {
		let cli = ScanCli::parse_from(["repo-scan"]);
		assert_eq!(cli.base_path, PathBuf::from("."));
		assert_eq!(cli.output_file, PathBuf::from("repos_generated.txt"));
	}

	#[test]
	fn clone_flags_map_to_options() {
		let cli = CloneCli::parse_from(["repo-clone", "list.txt", "--per-item", "-n"]);
		assert_eq!(cli.config_path(), PathBuf::from("list.txt"));
		let options = cli.options();
		assert_eq!(options.mode, PromptMode::PerItem);
		assert!(options.dry_run);
	}
}
