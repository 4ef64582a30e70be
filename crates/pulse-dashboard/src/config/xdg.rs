//! Platform-aware path resolution for pulse-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/pulse-dashboard` or `~/.config/pulse-dashboard`
//!
//! On **macOS**, uses Apple conventions with the XDG env var override:
//! - Config: `$XDG_CONFIG_HOME/pulse-dashboard` or `~/Library/Application Support/pulse-dashboard`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "pulse-dashboard";

/// Returns the configuration directory for pulse-dashboard.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/pulse-dashboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/pulse-dashboard`
///    - macOS: `~/Library/Application Support/pulse-dashboard`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
///
/// Falls back to the working directory when no home directory is known.
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    let base = dirs::config_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::home_dir().map(|home| home.join(".config"));

    base.unwrap_or_else(|| {
        tracing::warn!("could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, or no home directory is known, it is
/// returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else if path == "~" {
        home
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the parent directory of `file` if it does not exist.
pub fn ensure_parent_dir(file: &Path) -> std::io::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper: run a closure with env vars temporarily set, then restore.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        f();

        for (k, original) in &originals {
            match original {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_path_with_xdg_override() {
        with_env(&[("XDG_CONFIG_HOME", Some("/custom/config"))], || {
            let path = config_path();
            assert_eq!(
                path,
                PathBuf::from("/custom/config/pulse-dashboard/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_path_without_xdg_uses_platform_default() {
        with_env(&[("XDG_CONFIG_HOME", None)], || {
            let path = config_path();
            let expected = platform_config_dir().join("pulse-dashboard/config.toml");
            assert_eq!(path, expected);
        });
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    #[serial]
    fn test_linux_config_default_is_dot_config() {
        with_env(&[("XDG_CONFIG_HOME", None)], || {
            let dir = config_dir();
            let home = dirs::home_dir().expect("could not determine home directory");
            assert_eq!(dir, home.join(".config/pulse-dashboard"));
        });
    }

    #[test]
    fn test_expand_tilde_with_home_prefix() {
        let home = dirs::home_dir().expect("could not determine home directory");
        assert_eq!(expand_tilde("~/pulse.log"), home.join("pulse.log"));
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        assert_eq!(expand_tilde("/var/log/pulse.log"), PathBuf::from("/var/log/pulse.log"));
    }

    #[test]
    fn test_expand_tilde_bare_tilde() {
        let home = dirs::home_dir().expect("could not determine home directory");
        assert_eq!(expand_tilde("~"), home);
    }

    #[test]
    fn test_ensure_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).expect("ensure_dir failed");
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let dir = tmp.path().join("secure");
        ensure_dir(&dir).expect("ensure_dir failed");
        let mode = fs::metadata(&dir)
            .expect("failed to read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_ensure_parent_dir() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let file = tmp.path().join("nested/dir/config.toml");
        ensure_parent_dir(&file).expect("ensure_parent_dir failed");
        assert!(tmp.path().join("nested/dir").is_dir());
        ensure_parent_dir(Path::new("bare.toml")).expect("no parent is fine");
    }
}
