//! Target path expansion and home-relative rendering

use std::path::Path;

use crate::config::{self, HOME_MARKER};

/// Expand a leading `~` and `$VAR` / `${VAR}` references using the real
/// home directory and process environment.
pub fn expand(raw: &str) -> String {
	let home = config::home_dir();
	expand_with(raw, home.as_deref(), |name| std::env::var(name).ok())
}

/// Expansion with explicit inputs. Unset variables become empty strings;
/// a lone `$` or an unterminated `${` is kept literally.
pub fn expand_with<F>(raw: &str, home: Option<&Path>, lookup: F) -> String
where
	F: Fn(&str) -> Option<String>,
{
	let mut input = raw;
	let mut out = String::with_capacity(raw.len());

	if let Some(home) = home {
		let home = home.to_string_lossy();
		if input == HOME_MARKER {
			return home.into_owned();
		}
		if let Some(rest) = input.strip_prefix("~/") {
			out.push_str(home.trim_end_matches('/'));
			out.push('/');
			input = rest;
		}
	}

	let mut chars = input.char_indices();
	while let Some((i, c)) = chars.next() {
		if c != '$' {
			out.push(c);
			continue;
		}

		let rest = &input[i + 1..];
		if let Some(braced) = rest.strip_prefix('{') {
			match braced.find('}') {
				Some(end) if end > 0 => {
					out.push_str(&lookup(&braced[..end]).unwrap_or_default());
					// skip `{NAME}`
					for _ in 0..braced[..=end].chars().count() + 1 {
						chars.next();
					}
				}
				_ => out.push(c),
			}
			continue;
		}

		let name_len = rest
			.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
			.unwrap_or(rest.len());
		if name_len == 0 {
			out.push(c);
			continue;
		}
		out.push_str(&lookup(&rest[..name_len]).unwrap_or_default());
		for _ in 0..name_len {
			chars.next();
		}
	}

	out
}

/// Render `path` with the home prefix replaced by `~` when it lies under home
pub fn home_relative(path: &Path, home: Option<&Path>) -> String {
	if let Some(home) = home {
		if let Ok(rest) = path.strip_prefix(home) {
			if rest.as_os_str().is_empty() {
				return HOME_MARKER.to_string();
			}
			return format!("{}/{}", HOME_MARKER, rest.display());
		}
	}
	path.display().to_string()
}
