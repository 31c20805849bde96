//! Application configuration and constants

use std::path::PathBuf;

// === Version Control ===
pub const GIT_DIR: &str = ".git";
pub const PRIMARY_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";

// === Hosting Provider ===
pub const HOSTING_DOMAIN: &str = "github.com";
pub const HTTPS_PREFIX: &str = "https://github.com/";
pub const SSH_HOST: &str = "github.com";
pub const GIT_SUFFIX: &str = ".git";

// === Configuration File Format ===
pub const FIELD_SEPARATOR: char = '|';
pub const COMMENT_PREFIX: char = '#';
pub const HOME_MARKER: &str = "~";
pub const FORMAT_LINE: &str = "REPO_URL|TARGET_PATH|BRANCH";

// === Defaults ===
pub const DEFAULT_CONFIG_FILE: &str = "repos.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "repos_generated.txt";
pub const CONFIG_ENV_VAR: &str = "REPOSYNC_CONFIG";

/// Config file for the cloner (REPOSYNC_CONFIG env var, or `repos.txt`)
pub fn default_config_file() -> PathBuf {
	if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
		if !env_path.trim().is_empty() {
			crate::ui::debug(&format!("Using {}: {}", CONFIG_ENV_VAR, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Current user's home directory
pub fn home_dir() -> Option<PathBuf> {
	dirs::home_dir()
}
