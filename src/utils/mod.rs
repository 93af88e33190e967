pub mod csv {
    /// Split a comma-separated flag value, dropping empty entries.
    #[must_use]
    pub fn split_list(s: &str) -> Vec<String> {
        s.split(',').filter(|p| !p.is_empty()).map(str::to_string).collect()
    }

    /// `split_list` over an optional flag value.
    #[must_use]
    pub fn split_opt(s: Option<&str>) -> Vec<String> {
        s.map(split_list).unwrap_or_default()
    }
}

pub mod config {
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::DepGraphError;

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct FilterSection {
        pub ignore_stdlib: Option<bool>,
        #[serde(default)]
        pub ignore_prefixes: Vec<String>,
        #[serde(default)]
        pub ignore_packages: Vec<String>,
        #[serde(default)]
        pub only_prefixes: Vec<String>,
        pub max_level: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct WalkSection {
        pub delve_goroot: Option<bool>,
        pub include_tests: Option<bool>,
        #[serde(default)]
        pub tags: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct RewriteSection {
        /// prefix -> replacement
        #[serde(default)]
        pub names: BTreeMap<String, String>,
        /// prefix -> color
        #[serde(default)]
        pub colors: BTreeMap<String, String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct OutputSection {
        pub horizontal: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct Config {
        pub filter: Option<FilterSection>,
        pub walk: Option<WalkSection>,
        pub rewrite: Option<RewriteSection>,
        pub output: Option<OutputSection>,
    }

    pub const DEFAULT_CONFIG_NAME: &str = "godepgraph.toml";

    fn default_config_path(root: &Path) -> PathBuf {
        root.join(DEFAULT_CONFIG_NAME)
    }

    /// Load and parse a TOML config file.
    ///
    /// # Errors
    /// Returns `DepGraphError::Configuration` if the file cannot be read or parsed.
    pub fn load_config_at(path: &Path) -> Result<Config, DepGraphError> {
        let data = fs::read_to_string(path).map_err(|e| {
            DepGraphError::Configuration(format!("cannot read config {}: {e}", path.display()))
        })?;
        toml::from_str::<Config>(&data).map_err(|e| {
            DepGraphError::Configuration(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// Load `godepgraph.toml` from `root` if it exists.
    ///
    /// # Errors
    /// Returns `DepGraphError::Configuration` if the file exists but is invalid.
    pub fn load_config_near(root: &Path) -> Result<Option<Config>, DepGraphError> {
        let p = default_config_path(root);
        if p.is_file() {
            load_config_at(&p).map(Some)
        } else {
            Ok(None)
        }
    }
}
