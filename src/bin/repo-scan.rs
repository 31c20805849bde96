//! repo-scan - record local GitHub repositories

use clap::Parser;
use colored::Colorize;

use reposync::cli::ScanCli;
use reposync::commands::scan;
use reposync::ui::{self, Log};
use reposync::vcs::GitCli;

fn main() {
	let cli = ScanCli::parse();
	Log::set_verbose(cli.verbose);

	print_header();

	let git = GitCli::new();
	if !git.is_available() {
		ui::warn("git not found in PATH, remotes cannot be read");
	}

	if let Err(e) = scan::run(&cli.base_path, &cli.output_file, &git) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── repo-scan v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
