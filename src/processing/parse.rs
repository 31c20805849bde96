//! Configuration file parser
//!
//! Reads `REPO_URL|TARGET_PATH|BRANCH` lines into records. Bad lines are
//! reported as events and skipped so one typo never stops the whole file.

use std::fmt;
use std::io::BufRead;

use crate::config::{COMMENT_PREFIX, FIELD_SEPARATOR};
use crate::core::{paths, url, RepositoryRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
	/// Fewer than two separators
	Malformed,
	/// A field is empty after trimming or expansion
	MissingField(&'static str),
	/// URL matches none of the accepted shapes (after normalization)
	InvalidUrl(String),
	/// Line could not be decoded
	Unreadable(String),
}

impl fmt::Display for LineError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LineError::Malformed => write!(f, "Malformed line (expected REPO_URL|TARGET_PATH|BRANCH)"),
			LineError::MissingField(field) => write!(f, "Missing {}", field),
			LineError::InvalidUrl(u) => write!(f, "Invalid URL: {}", u),
			LineError::Unreadable(e) => write!(f, "Unreadable line: {}", e),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
	Record { line: usize, record: RepositoryRecord },
	Error { line: usize, error: LineError },
}

/// Streams events from any buffered reader; `line` numbers are 1-based
pub struct ConfigParser<R> {
	lines: std::io::Lines<R>,
	line_no: usize,
	expand: Box<dyn Fn(&str) -> String>,
	done: bool,
}

impl<R: BufRead> ConfigParser<R> {
	pub fn new(reader: R) -> Self {
		Self::with_expander(reader, paths::expand)
	}

	/// Parser with a custom target path expander
	pub fn with_expander(reader: R, expand: impl Fn(&str) -> String + 'static) -> Self {
		Self {
			lines: reader.lines(),
			line_no: 0,
			expand: Box::new(expand),
			done: false,
		}
	}
}

impl<R: BufRead> Iterator for ConfigParser<R> {
	type Item = ParseEvent;

	fn next(&mut self) -> Option<ParseEvent> {
		while !self.done {
			let raw = self.lines.next()?;
			self.line_no += 1;
			let line = self.line_no;

			let text = match raw {
				Ok(text) => text,
				Err(e) => {
					// Bad encoding only spoils one line; any other read error ends the stream
					self.done = e.kind() != std::io::ErrorKind::InvalidData;
					return Some(ParseEvent::Error { line, error: LineError::Unreadable(e.to_string()) });
				}
			};

			let trimmed = text.trim_start();
			if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
				continue;
			}

			return Some(match parse_line(&text, &*self.expand) {
				Ok(record) => ParseEvent::Record { line, record },
				Err(error) => ParseEvent::Error { line, error },
			});
		}
		None
	}
}

/// Parse one non-comment line into a validated, normalized record
pub fn parse_line(text: &str, expand: &dyn Fn(&str) -> String) -> Result<RepositoryRecord, LineError> {
	let mut fields = text.splitn(3, FIELD_SEPARATOR);
	let (Some(raw_url), Some(raw_path), Some(raw_branch)) = (fields.next(), fields.next(), fields.next()) else {
		return Err(LineError::Malformed);
	};

	let remote_url = raw_url.trim();
	let target_path = expand(raw_path.trim());
	let target_path = target_path.trim();
	let branch = raw_branch.trim();

	if remote_url.is_empty() {
		return Err(LineError::MissingField("repository URL"));
	}
	if target_path.is_empty() {
		return Err(LineError::MissingField("target path"));
	}
	if branch.is_empty() {
		return Err(LineError::MissingField("branch"));
	}

	let remote_url = url::normalize(remote_url);
	if !url::is_valid(&remote_url) {
		return Err(LineError::InvalidUrl(remote_url));
	}

	Ok(RepositoryRecord::new(remote_url, target_path, branch))
}

/// Outcome counts of a full parse
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
	pub records: usize,
	pub errors: usize,
}

impl ParseStats {
	pub fn observe(&mut self, event: &ParseEvent) {
		match event {
			ParseEvent::Record { .. } => self.records += 1,
			ParseEvent::Error { .. } => self.errors += 1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn parse(text: &str) -> Vec<ParseEvent> {
		let expand = |p: &str| paths::expand_with(p, Some(std::path::Path::new("/home/alice")), |_| None);
		ConfigParser::with_expander(Cursor::new(text.to_string()), expand).collect()
	}

	#[test]
	fn skips_comments_and_blank_lines() {
		let events = parse("# header\n\n   \n  # indented comment\nhttps://github.com/foo/bar.git|/src/bar|main\n");
		assert_eq!(
			events,
			vec![ParseEvent::Record {
				line: 5,
				record: RepositoryRecord::new("https://github.com/foo/bar.git", "/src/bar", "main"),
			}]
		);
	}

	#[test]
	fn expands_home_and_normalizes_url() {
		let events = parse("https://github.com/foo/bar|~/work/bar|main");
		let ParseEvent::Record { record, .. } = &events[0] else {
			panic!("expected a record, got {:?}", events);
		};
		assert_eq!(record.remote_url, "https://github.com/foo/bar.git");
		assert_eq!(record.target_path, "/home/alice/work/bar");
		assert_eq!(record.branch, "main");
	}

	#[test]
	fn lines_without_two_separators_are_malformed() {
		let events = parse("https://github.com/foo/bar.git\nhttps://github.com/foo/bar.git|/x\n");
		assert_eq!(
			events,
			vec![
				ParseEvent::Error { line: 1, error: LineError::Malformed },
				ParseEvent::Error { line: 2, error: LineError::Malformed },
			]
		);
	}

	#[test]
	fn empty_fields_are_rejected() {
		let events = parse(" |/x|main\nhttps://github.com/a/b|  |main\nhttps://github.com/a/b|/x| \n");
		let errors: Vec<_> = events
			.into_iter()
			.map(|e| match e {
				ParseEvent::Error { error, .. } => error,
				other => panic!("unexpected {:?}", other),
			})
			.collect();
		assert_eq!(
			errors,
			vec![
				LineError::MissingField("repository URL"),
				LineError::MissingField("target path"),
				LineError::MissingField("branch"),
			]
		);
	}

	#[test]
	fn invalid_url_is_distinct_from_malformed() {
		let events = parse("https://gitlab.com/org/repo|/x|main");
		assert_eq!(
			events,
			vec![ParseEvent::Error {
				line: 1,
				error: LineError::InvalidUrl("https://gitlab.com/org/repo.git".to_string()),
			}]
		);
	}

	#[test]
	fn extra_separators_stay_in_branch_field() {
		let events = parse("git@github.com:a/b.git|/x|feature|odd");
		let ParseEvent::Record { record, .. } = &events[0] else {
			panic!("expected a record");
		};
		assert_eq!(record.branch, "feature|odd");
	}

	#[test]
	fn parsing_continues_past_errors() {
		let text = "bad line\nhttps://github.com/a/one|/one|main\nhttps://gitlab.com/a/b|/x|main\ngit@github.com:a/two|/two|dev\n";
		let mut stats = ParseStats::default();
		for event in parse(text) {
			stats.observe(&event);
		}
		assert_eq!(stats, ParseStats { records: 2, errors: 2 });
	}

	#[test]
	fn invalid_utf8_is_reported_and_skipped() {
		let mut bytes = b"\xff\xfe|/x|main\n".to_vec();
		bytes.extend_from_slice(b"https://github.com/a/b|/b|main\n");
		let events: Vec<_> = ConfigParser::new(Cursor::new(bytes)).collect();
		assert!(matches!(events[0], ParseEvent::Error { line: 1, error: LineError::Unreadable(_) }));
		assert!(matches!(events[1], ParseEvent::Record { line: 2, .. }));
	}
}
