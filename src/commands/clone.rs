//! Clone command - restore repositories from a configuration file

use anyhow::{Context, Result};
use colored::{Color, Colorize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{RepoUrl, RepositoryRecord};
use crate::processing::{ParseEvent, ParseStats};
use crate::storage;
use crate::ui;
use crate::vcs::Vcs;

/// How to ask about a target directory that already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
	/// Re-clone / skip / skip all / re-clone all
	#[default]
	Batch,
	/// Plain `y/N` for every directory
	PerItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
	Reclone,
	Skip,
	SkipAll,
	RecloneAll,
}

impl Choice {
	/// Anything unrecognised means skip
	pub fn parse(answer: &str, mode: PromptMode) -> Self {
		let answer = answer.trim();
		match mode {
			PromptMode::Batch => match answer {
				"1" | "r" => Choice::Reclone,
				"3" | "S" => Choice::SkipAll,
				"4" | "R" => Choice::RecloneAll,
				_ => Choice::Skip,
			},
			PromptMode::PerItem => {
				if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
					Choice::Reclone
				} else {
					Choice::Skip
				}
			}
		}
	}
}

/// "Ask once, apply to the rest" decisions of one run. Never reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
	pub skip_all: bool,
	pub reclone_all: bool,
}

/// Source of operator answers. Must never be the config file's stream.
pub trait Prompter {
	fn ask(&mut self, question: &str) -> Result<String>;
}

/// Reads answers from the controlling terminal, or stdin when there is none
pub struct TerminalPrompter {
	input: Box<dyn BufRead>,
}

impl TerminalPrompter {
	pub fn open() -> Self {
		#[cfg(unix)]
		if let Ok(tty) = File::open("/dev/tty") {
			return Self { input: Box::new(BufReader::new(tty)) };
		}

		ui::debug("No controlling terminal, reading answers from stdin");
		Self { input: Box::new(BufReader::new(std::io::stdin())) }
	}
}

impl Prompter for TerminalPrompter {
	fn ask(&mut self, question: &str) -> Result<String> {
		ui::prompt(question);
		let mut answer = String::new();
		self.input.read_line(&mut answer).context("Failed to read answer")?;
		Ok(answer.trim().to_string())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Cloned,
	Recloned,
	Skipped,
	/// Dry run, would clone
	Planned,
	/// Dry run, target exists and the operator would be asked
	WouldPrompt,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloneStats {
	pub cloned: usize,
	pub recloned: usize,
	pub skipped: usize,
	pub planned: usize,
	pub would_prompt: usize,
	pub failed: usize,
	pub invalid: usize,
}

impl CloneStats {
	/// Records handled without a failure (skips included)
	pub fn succeeded(&self) -> usize {
		self.cloned + self.recloned + self.skipped + self.planned + self.would_prompt
	}

	fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::Cloned => self.cloned += 1,
			Outcome::Recloned => self.recloned += 1,
			Outcome::Skipped => self.skipped += 1,
			Outcome::Planned => self.planned += 1,
			Outcome::WouldPrompt => self.would_prompt += 1,
		}
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CloneOptions {
	pub mode: PromptMode,
	pub dry_run: bool,
}

/// State threaded through every record of one run
#[derive(Debug, Default)]
pub struct RunContext {
	pub options: CloneOptions,
	pub policy: BatchPolicy,
	pub stats: CloneStats,
}

impl RunContext {
	pub fn new(options: CloneOptions) -> Self {
		Self { options, ..Default::default() }
	}
}

#[derive(Debug, Default)]
pub struct CloneReport {
	pub stats: CloneStats,
	/// The config file was missing and a template was written instead
	pub bootstrapped: bool,
}

/// Make `record.target_path` a clone of `record.branch`
pub fn clone_record(
	record: &RepositoryRecord,
	ctx: &mut RunContext,
	vcs: &dyn Vcs,
	prompter: &mut dyn Prompter,
) -> Result<Outcome> {
	let target = PathBuf::from(&record.target_path);

	if ctx.options.dry_run {
		return Ok(match (target.is_dir(), ctx.policy) {
			(false, _) => Outcome::Planned,
			(true, BatchPolicy { skip_all: true, .. }) => Outcome::Skipped,
			(true, BatchPolicy { reclone_all: true, .. }) => Outcome::Planned,
			(true, _) => Outcome::WouldPrompt,
		});
	}

	if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
	}

	let mut replacing = false;
	if target.is_dir() {
		match decide(&target, ctx, prompter)? {
			Choice::Skip | Choice::SkipAll => return Ok(Outcome::Skipped),
			Choice::Reclone | Choice::RecloneAll => {
				fs::remove_dir_all(&target)
					.with_context(|| format!("Failed to remove {}", target.display()))?;
				replacing = true;
			}
		}
	}

	vcs.clone_branch(&record.remote_url, &record.branch, &target)?;

	Ok(if replacing { Outcome::Recloned } else { Outcome::Cloned })
}

/// Resolve a conflict with an existing directory, asking only when no
/// batch decision has been made yet
fn decide(target: &Path, ctx: &mut RunContext, prompter: &mut dyn Prompter) -> Result<Choice> {
	if ctx.policy.skip_all {
		ui::debug(&format!("Skip all: {}", target.display()));
		return Ok(Choice::Skip);
	}
	if ctx.policy.reclone_all {
		ui::debug(&format!("Re-clone all: {}", target.display()));
		return Ok(Choice::Reclone);
	}

	ui::warn(&format!("Directory already exists: {}", target.display()));
	let answer = match ctx.options.mode {
		PromptMode::Batch => {
			println!(
				"  {} Re-clone  {} Skip  {} Skip all  {} Re-clone all",
				"1)".bright_blue().bold(),
				"2)".bright_blue().bold(),
				"3)".bright_blue().bold(),
				"4)".bright_blue().bold()
			);
			prompter.ask("Choice [1-4, default 2]:")?
		}
		PromptMode::PerItem => prompter.ask("Re-clone? [y/N]:")?,
	};

	let choice = Choice::parse(&answer, ctx.options.mode);
	match choice {
		Choice::SkipAll => ctx.policy.skip_all = true,
		Choice::RecloneAll => ctx.policy.reclone_all = true,
		Choice::Reclone | Choice::Skip => {}
	}
	Ok(choice)
}

/// Clone everything listed in `config_path`. Only a missing-and-unwritable
/// or unreadable config file is an error; per-line and per-clone failures
/// are counted.
pub fn run(
	config_path: &Path,
	options: CloneOptions,
	vcs: &dyn Vcs,
	prompter: &mut dyn Prompter,
) -> Result<CloneReport> {
	if !config_path.exists() {
		storage::write_template(config_path)?;
		ui::success(&format!("Created example config: {}", config_path.display()));
		ui::info("Add your repositories to it and run again");
		return Ok(CloneReport { bootstrapped: true, ..Default::default() });
	}

	if config_path.is_dir() {
		anyhow::bail!("Config path is a directory: {}", config_path.display());
	}

	let start = Instant::now();
	let events: Vec<ParseEvent> = storage::open(config_path)?.collect();
	let mut parsed = ParseStats::default();
	events.iter().for_each(|e| parsed.observe(e));
	let total = parsed.records;

	ui::info(&format!("Config: {}", config_path.display()));
	ui::debug(&format!("Parsed {} records, {} invalid lines", parsed.records, parsed.errors));
	if options.dry_run {
		ui::info("Dry run, nothing will be cloned");
	}
	ui::header("Cloning");

	let mut ctx = RunContext::new(options);
	let mut index = 0;

	for event in events {
		match event {
			ParseEvent::Error { line, error } => {
				ui::error(&format!("Line {}: {}", line, error));
				ctx.stats.invalid += 1;
			}
			ParseEvent::Record { line, record } => {
				let queue = ui::progress(index, total);
				index += 1;
				let name = RepoUrl::parse(&record.remote_url)
					.map(|u| u.slug())
					.unwrap_or_else(|| record.remote_url.clone());
				ui::info(&format!(
					"{} {} {} {} {}",
					queue,
					name,
					"→".dimmed(),
					record.target_path,
					format!("({})", record.branch).dimmed()
				));
				ui::debug(&format!("URL: {}", record.remote_url));

				match clone_record(&record, &mut ctx, vcs, prompter) {
					Ok(outcome) => {
						report_outcome(outcome, &record);
						ctx.stats.record(outcome);
					}
					Err(e) => {
						ui::error(&format!("Line {}: {}: {:#}", line, record.target_path, e));
						ctx.stats.failed += 1;
					}
				}
			}
		}
	}

	let stats = ctx.stats;
	ui::summary(
		&[
			("Cloned", stats.cloned, Color::BrightGreen),
			("Re-cloned", stats.recloned, Color::BrightGreen),
			("Skipped", stats.skipped, Color::Yellow),
			("Planned", stats.planned, Color::BrightBlue),
			("Would prompt", stats.would_prompt, Color::Yellow),
			("Failed", stats.failed, Color::Red),
			("Invalid lines", stats.invalid, Color::Red),
		],
		start.elapsed(),
	);

	if stats.failed + stats.invalid > 0 {
		ui::warn(&format!(
			"Completed with {} succeeded, {} failed",
			stats.succeeded(),
			stats.failed + stats.invalid
		));
	} else {
		ui::success(&format!("All {} repositories processed", stats.succeeded()));
	}

	Ok(CloneReport { stats, bootstrapped: false })
}

fn report_outcome(outcome: Outcome, record: &RepositoryRecord) {
	match outcome {
		Outcome::Cloned => ui::success(&format!("Cloned {}", record.target_path)),
		Outcome::Recloned => ui::success(&format!("Re-cloned {}", record.target_path)),
		Outcome::Skipped => ui::info(&format!("Skipped {}", record.target_path)),
		Outcome::Planned => ui::info(&format!("Would clone {}", record.target_path)),
		Outcome::WouldPrompt => ui::warn(&format!("Exists, would ask: {}", record.target_path)),
	}
}

#[cfg(test)]
pub mod scripted {
	//! Canned answers for prompt tests

	use super::*;
	use std::collections::VecDeque;

	#[derive(Default)]
	pub struct ScriptedPrompter {
		pub answers: VecDeque<String>,
		pub asked: usize,
	}

	impl ScriptedPrompter {
		pub fn new(answers: &[&str]) -> Self {
			Self {
				answers: answers.iter().map(|a| a.to_string()).collect(),
				asked: 0,
			}
		}
	}

	impl Prompter for ScriptedPrompter {
		fn ask(&mut self, _question: &str) -> Result<String> {
			self.asked += 1;
			self.answers
				.pop_front()
				.ok_or_else(|| anyhow::anyhow!("unexpected prompt"))
		}
	}
}
