//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from an explicit path or the default XDG
//! location. When the default location has no file, returns
//! `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `path`, or from the default XDG location.
    ///
    /// An explicit path must exist (`ConfigError::NotFound` otherwise). The
    /// default location may be absent, in which case `Config::default()` is
    /// returned. Other I/O failures are `ConfigError::ReadError`.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (xdg::config_path(), false),
        };
        match Self::read(&path)? {
            Some(content) => Self::parse_toml(&content, &path),
            None if required => Err(ConfigError::NotFound { path }),
            None => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                Ok(Config::default())
            }
        }
    }

    /// Reads `path`, mapping a missing file to `None`.
    fn read(path: &Path) -> Result<Option<String>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Parse a TOML string into `Config` with position-aware error reporting.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| {
                    let line = content[..span.start].matches('\n').count() + 1;
                    let last_newline = content[..span.start]
                        .rfind('\n')
                        .map(|p| p + 1)
                        .unwrap_or(0);
                    let column = span.start - last_newline + 1;
                    (line, column)
                })
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;
    use serial_test::serial;
    use std::path::PathBuf;

    /// Run a closure with `XDG_CONFIG_HOME` temporarily set, then restore.
    fn with_xdg_config<F: FnOnce()>(value: &Path, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", value);
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // -----------------------------------------------------------------------
    // parse_toml
    // -----------------------------------------------------------------------

    #[test]
    fn parse_valid_full_config() {
        let toml_str = r#"
[dashboard]
widgets = ["news", "finance"]

[finance]
symbol = "NVDA"
time_range = "1Y"

[log]
level = "debug"
"#;
        let path = PathBuf::from("test.toml");
        let config = ConfigLoader::parse_toml(toml_str, &path).expect("valid TOML should parse");
        assert_eq!(config.dashboard.widgets, vec!["news", "finance"]);
        assert_eq!(config.finance.symbol, "NVDA");
        assert_eq!(config.log.level, LogLevel::Debug);
    }

    #[test]
    fn parse_empty_string_returns_defaults() {
        let path = PathBuf::from("empty.toml");
        let config =
            ConfigLoader::parse_toml("", &path).expect("empty string should parse to defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let toml_str = r#"
[log]
level = "debug"
"#;
        let path = PathBuf::from("partial.toml");
        let config = ConfigLoader::parse_toml(toml_str, &path).expect("partial config should parse");
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.feed.interval, "2s");
        assert_eq!(config.tui.tick_rate, "250ms");
    }

    #[test]
    fn parse_invalid_toml_returns_parse_error_with_position() {
        let toml_str = "key = \ninvalid";
        let path = PathBuf::from("bad.toml");
        let err = ConfigLoader::parse_toml(toml_str, &path).expect_err("should fail");
        match err {
            ConfigError::ParseError {
                path: p,
                line,
                column,
                message,
            } => {
                assert_eq!(p, path);
                assert!(line > 0, "line should be > 0 for known span");
                assert!(column > 0, "column should be > 0 for known span");
                assert!(!message.is_empty(), "message should not be empty");
            }
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn parse_error_points_at_bad_value() {
        let toml_str = "[finance]\ntime_range = \"2D\"\n";
        let path = PathBuf::from("range.toml");
        match ConfigLoader::parse_toml(toml_str, &path) {
            Err(ConfigError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // load with an explicit path
    // -----------------------------------------------------------------------

    #[test]
    fn load_explicit_valid_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join("config.toml");
        fs::write(&file, "[log]\nlevel = \"trace\"\n").expect("failed to write temp file");
        let config = ConfigLoader::load(Some(&file)).expect("should load");
        assert_eq!(config.log.level, LogLevel::Trace);
    }

    #[test]
    fn load_explicit_missing_file_returns_not_found() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("absent.toml");
        let err = ConfigLoader::load(Some(&path)).expect_err("should fail");
        match err {
            ConfigError::NotFound { path: p } => assert_eq!(p, path),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn load_explicit_directory_returns_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = ConfigLoader::load(Some(dir.path())).expect_err("should fail");
        match err {
            ConfigError::ReadError { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected ReadError, got: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // load from the default location
    // -----------------------------------------------------------------------

    #[test]
    #[serial]
    fn load_default_with_no_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(dir.path(), || {
            let config = ConfigLoader::load(None).expect("should return defaults");
            assert_eq!(config, Config::default());
        });
    }

    #[test]
    #[serial]
    fn load_default_with_existing_file_parses_it() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config_dir = dir.path().join("pulse-dashboard");
        fs::create_dir_all(&config_dir).expect("failed to create config dir");
        fs::write(config_dir.join("config.toml"), "[log]\nlevel = \"warn\"\n")
            .expect("failed to write config");
        with_xdg_config(dir.path(), || {
            let config = ConfigLoader::load(None).expect("should load");
            assert_eq!(config.log.level, LogLevel::Warn);
        });
    }

    #[test]
    fn load_with_explicit_path_does_not_fall_back() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            ConfigLoader::load(Some(&path)),
            Err(ConfigError::NotFound { .. })
        ));
    }
}
