//! repo-clone - clone repositories listed in a config file

use clap::Parser;
use colored::Colorize;

use reposync::cli::CloneCli;
use reposync::commands::clone::{self, TerminalPrompter};
use reposync::ui::{self, Log};
use reposync::vcs::GitCli;

fn main() {
	let cli = CloneCli::parse();
	Log::set_verbose(cli.verbose);

	print_header();

	let git = GitCli::new();
	if !git.is_available() && !cli.dry_run {
		ui::warn("git not found in PATH, every clone will fail");
	}

	let mut prompter = TerminalPrompter::open();
	if let Err(e) = clone::run(&cli.config_path(), cli.options(), &git, &mut prompter) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── repo-clone v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
