//! Config file discovery and loading for `.pambase.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.pambase.toml` (project-local)
//! 2. `~/.config/pambase.toml` (user-global)
//!
//! An explicit `--config <FILE>` bypasses discovery.

use std::path::{Path, PathBuf};

use super::CliConfig;

const CONFIG_FILENAME: &str = ".pambase.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "pambase.toml";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load CLI config from the first discovered location, or return defaults.
///
/// A discovered file that cannot be used is logged and ignored.
pub(crate) fn load_cli_config() -> CliConfig {
    if let Some(path) = find_config_file() {
        match load_cli_config_from(&path) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring CLI config, using defaults");
            }
        }
    }
    CliConfig::default()
}

/// Load CLI config from an explicit path.
pub(crate) fn load_cli_config_from(path: &Path) -> Result<CliConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "Loaded CLI config");
    Ok(config)
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand a configured path, resolving `~` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/pam/templates");
        assert!(expanded.to_str().unwrap().ends_with("pam/templates"));
        assert!(!expanded.to_str().unwrap().starts_with('~'));
    }

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/etc/pam.d"), PathBuf::from("/etc/pam.d"));
    }

    #[test]
    fn test_expand_path_relative() {
        assert_eq!(expand_path("./stack"), PathBuf::from("./stack"));
    }

    #[test]
    fn test_parse_config_toml() {
        let config: CliConfig = toml::from_str(
            r#"
output-dir = "/var/tmp/pam.d"
template-dir = "~/pambase/templates"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir.as_deref(), Some("/var/tmp/pam.d"));
        assert_eq!(config.template_dir.as_deref(), Some("~/pambase/templates"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(toml::from_str::<CliConfig>("outputdir = \"x\"").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pambase.toml");
        fs::write(&path, "output-dir = \"out\"\n").unwrap();

        let config = load_cli_config_from(&path).unwrap();
        assert_eq!(config.output_dir.as_deref(), Some("out"));
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cli_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pambase.toml");
        fs::write(&path, "output-dir = [").unwrap();

        let err = load_cli_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("pambase.toml"));
    }
}
