//! Boundary configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.

use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "QUOTEBOOK_DB_PATH";
pub const USERNAME_ENV: &str = "QUOTEBOOK_USERNAME";
pub const PASSWORD_ENV: &str = "QUOTEBOOK_PASSWORD";

const DEFAULT_DB_FILE_NAME: &str = "quotebook.sqlite3";
const DEFAULT_USERNAME: &str = "Davide";
const DEFAULT_PASSWORD: &str = "Ferrari";

/// Settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// SQLite database file opened once per request.
    pub db_path: PathBuf,
    /// Login name accepted by [`crate::QuoteApi::login`].
    pub username: String,
    pub password: String,
}

impl ApiConfig {
    /// Builds a config from explicit values.
    pub fn new(
        db_path: impl Into<PathBuf>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            db_path: db_path.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolves `QUOTEBOOK_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            username: read(USERNAME_ENV).unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: read(PASSWORD_ENV).unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(default_db_path(), DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, DB_PATH_ENV, PASSWORD_ENV, USERNAME_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_values_override_defaults() {
        let vars = HashMap::from([
            (DB_PATH_ENV, " /srv/quotes.db "),
            (USERNAME_ENV, "admin"),
            (PASSWORD_ENV, "secret"),
        ]);
        let config = ApiConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/srv/quotes.db"));
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ApiConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, ApiConfig::default());
    }
}
