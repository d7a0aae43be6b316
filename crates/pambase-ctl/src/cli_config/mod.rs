//! CLI configuration for default locations.
//!
//! Lets a system keep its output and template directories in a file instead of
//! repeating `--output-dir`/`--template-dir` on every run. Flags always win.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config, load_cli_config_from, ConfigError};

use serde::Deserialize;

/// Settings read from `.pambase.toml`.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Directory generated stacks are written to.
    pub output_dir: Option<String>,

    /// Directory holding `<stack>.tera` templates, replacing the built-in set.
    pub template_dir: Option<String>,
}
