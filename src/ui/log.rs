//! Unified logging system

use colored::*;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!();
	println!("{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Question without trailing newline, flushed so the answer lands on the same line
pub fn prompt(msg: &str) {
	print!("{} {} ", "?".bright_magenta().bold(), msg.bright_white());
	let _ = std::io::stdout().flush();
}

/// Queue prefix like `[3/12]`
pub fn progress(index: usize, total: usize) -> String {
	format!("[{}/{}]", index + 1, total).bright_blue().bold().to_string()
}

/// Final tally block. Zero counts are hidden except the first row.
pub fn summary(rows: &[(&str, usize, Color)], elapsed: Duration) {
	header("Summary");

	for (i, (label, count, color)) in rows.iter().enumerate() {
		if i == 0 || *count > 0 {
			println!("  {} {}", format!("{}:", label).color(*color), count);
		}
	}

	println!("  {} {:.2}s", "Duration:".bright_blue(), elapsed.as_secs_f32());
	println!();
}
