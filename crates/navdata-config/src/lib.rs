//! Configuration management for navdata.
//!
//! Parses `navdata.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [tree]
//! source = "html/_ccoding_stds_main.js"
//! name = "_ccoding_stds_main"
//!
//! [output]
//! format = "json"
//! pretty = true
//!
//! [site]
//! dir = "html"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `tree.source`, `tree.name` and `site.dir` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use navdata_tree::{Format, is_valid_identifier};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the navigation data source file.
    pub source: Option<PathBuf>,
    /// Override the navtree variable name.
    pub name: Option<String>,
    /// Override the output format.
    pub format: Option<Format>,
    /// Override pretty printing.
    pub pretty: Option<bool>,
    /// Override the rendered site directory.
    pub site_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navdata.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Navigation data settings (paths are relative strings from TOML).
    tree: TreeConfigRaw,
    /// Output settings.
    pub output: OutputConfig,
    /// Rendered site settings (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved navigation data settings (set after loading).
    #[serde(skip)]
    pub tree_resolved: TreeConfig,
    /// Resolved site settings (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TreeConfigRaw {
    source: Option<String>,
    name: Option<String>,
}

/// Resolved navigation data settings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Navigation data file, absolute when loaded from a config file.
    pub source: Option<PathBuf>,
    /// Navtree variable name used when writing the navtree format.
    pub name: Option<String>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format when neither `--to` nor the output
    /// extension decides.
    pub format: Option<Format>,
    /// Indent JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            pretty: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SiteConfigRaw {
    dir: Option<String>,
}

/// Resolved rendered-site settings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory holding the rendered pages that targets point at.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tree.source`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navdata.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source) = &settings.source {
            self.tree_resolved.source = Some(source.clone());
        }
        if let Some(name) = &settings.name {
            self.tree_resolved.name = Some(name.clone());
        }
        if let Some(format) = settings.format {
            self.output.format = Some(format);
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
        }
        if let Some(site_dir) = &settings.site_dir {
            self.site_resolved.dir = Some(site_dir.clone());
        }
    }

    /// Get the navigation data source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no source is configured.
    pub fn require_source(&self) -> Result<&Path, ConfigError> {
        self.tree_resolved.source.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "no navigation data source: pass INPUT or set [tree] source".to_owned(),
            )
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.tree_resolved.name
            && !is_valid_identifier(name)
        {
            return Err(ConfigError::Validation(format!(
                "tree.name `{name}` must be a valid JavaScript identifier"
            )));
        }
        if let Some(source) = &self.tree_resolved.source
            && source.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "tree.source cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(source) = &self.tree.source {
            self.tree.source = Some(expand::expand_env(source, "tree.source")?);
        }
        if let Some(name) = &self.tree.name {
            self.tree.name = Some(expand::expand_env(name, "tree.name")?);
        }
        if let Some(dir) = &self.site.dir {
            self.site.dir = Some(expand::expand_env(dir, "site.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.tree_resolved = TreeConfig {
            source: self.tree.source.as_deref().map(|s| config_dir.join(s)),
            name: self.tree.name.clone(),
        };
        self.site_resolved = SiteConfig {
            dir: self.site.dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.tree_resolved, TreeConfig::default());
        assert_eq!(config.site_resolved, SiteConfig::default());
        assert_eq!(config.output.format, None);
        assert!(config.output.pretty);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.tree.source.is_none());
        assert!(config.output.pretty);
    }

    #[test]
    fn test_parse_output_config() {
        let toml = r#"
[output]
format = "yaml"
pretty = false
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.output.format, Some(Format::Yaml));
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_parse_unknown_format_is_error() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"xml\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_key_is_error() {
        let result: Result<Config, _> = toml::from_str("[tree]\nsrc = \"nav.js\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[tree]
source = "html/_ccoding_stds_main.js"
name = "_ccoding_stds_main"

[site]
dir = "html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.tree_resolved.source,
            Some(PathBuf::from("/project/html/_ccoding_stds_main.js"))
        );
        assert_eq!(
            config.tree_resolved.name,
            Some("_ccoding_stds_main".to_owned())
        );
        assert_eq!(config.site_resolved.dir, Some(PathBuf::from("/project/html")));
    }

    #[test]
    fn test_validate_rejects_invalid_name() {
        let mut config = Config::default();
        config.tree_resolved.name = Some("nav-tree".to_owned());

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("tree.name"));
    }

    #[test]
    fn test_apply_cli_settings_overrides_only_given_fields() {
        let mut config: Config = toml::from_str("[tree]\nsource = \"nav.js\"\nname = \"nav\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));
        let settings = CliSettings {
            source: Some(PathBuf::from("/other/nav.json")),
            pretty: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.tree_resolved.source,
            Some(PathBuf::from("/other/nav.json"))
        );
        assert_eq!(config.tree_resolved.name, Some("nav".to_owned()));
        assert!(!config.output.pretty);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_require_source_missing() {
        let err = Config::default().require_source().unwrap_err();

        assert!(err.to_string().contains("[tree] source"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/navdata.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navdata.toml");
        std::fs::write(
            &path,
            "[tree]\nsource = \"html/nav.js\"\n\n[site]\ndir = \"html\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.tree_resolved.source,
            Some(dir.path().join("html/nav.js"))
        );
        assert_eq!(config.site_resolved.dir, Some(dir.path().join("html")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_settings_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navdata.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
        let settings = CliSettings {
            format: Some(Format::Navtree),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.output.format, Some(Format::Navtree));
    }

    #[test]
    fn test_load_invalid_cli_name_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navdata.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            name: Some("1nav".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&settings));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
