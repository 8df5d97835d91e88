//! Configuration management.
//!
//! Configuration is optional; every key has a default. Sources, later ones
//! winning:
//! 1. Built-in defaults
//! 2. `config.toml` (explicit path, `RTEMPLATE_CONFIG_PATH`, or the platform
//!    config dir)
//! 3. `RTEMPLATE_MISSING_VARIABLES` environment variable
//!
//! Invalid values are errors rather than warnings: configuration is resolved
//! before logging is initialised.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "RTEMPLATE_CONFIG_PATH";

/// Environment variable overriding the missing-variable policy.
pub const MISSING_VARIABLES_ENV: &str = "RTEMPLATE_MISSING_VARIABLES";

/// What a render does with a reference that has no binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingVariablePolicy {
    /// Fail with `UndefinedVariable`.
    #[default]
    Error,
    /// Render empty text.
    Empty,
}

impl MissingVariablePolicy {
    /// Parses a policy string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" | "strict" => Some(Self::Error),
            "empty" | "lenient" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for MissingVariablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `rtemplate=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Main configuration for rtemplate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RtemplateConfig {
    /// Policy for undefined variable references.
    pub missing_variables: MissingVariablePolicy,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Missing-variable policy name.
    pub missing_variables: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl RtemplateConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown
    /// policy.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Loads configuration from the first available source: `explicit`, then
    /// the file named by `RTEMPLATE_CONFIG_PATH`, then the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from_sources(explicit, env_path.as_deref(), Self::load_default)
    }

    fn load_from_sources(
        explicit: Option<&Path>,
        env_path: Option<&str>,
        default: impl FnOnce() -> crate::Result<Self>,
    ) -> crate::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match env_path.map(str::trim).filter(|path| !path.is_empty()) {
            Some(path) => Self::load_from_file(Path::new(path)),
            None => default(),
        }
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/rtemplate/` on macOS)
    /// 2. XDG config dir (`~/.config/rtemplate/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or parsed.
    pub fn load_default() -> crate::Result<Self> {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Ok(Self::default());
        };

        let candidates = [
            base_dirs.config_dir().join("rtemplate").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("rtemplate")
                .join("config.toml"),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Converts a `ConfigFile` to `RtemplateConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(policy) = file.missing_variables {
            config.missing_variables = MissingVariablePolicy::parse(&policy).ok_or_else(|| {
                crate::Error::InvalidInput(format!(
                    "unknown missing_variables policy '{policy}': expected 'error' or 'empty'"
                ))
            })?;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }

    /// Applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if `RTEMPLATE_MISSING_VARIABLES`
    /// names an unknown policy.
    pub fn with_env_overrides(self) -> crate::Result<Self> {
        let policy = std::env::var(MISSING_VARIABLES_ENV).ok();
        self.with_policy_override(policy.as_deref())
    }

    fn with_policy_override(mut self, value: Option<&str>) -> crate::Result<Self> {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return Ok(self);
        };
        self.missing_variables = MissingVariablePolicy::parse(value).ok_or_else(|| {
            crate::Error::InvalidInput(format!(
                "invalid {MISSING_VARIABLES_ENV} '{value}': expected 'error' or 'empty'"
            ))
        })?;
        Ok(self)
    }

    /// Sets the missing-variable policy.
    #[must_use]
    pub const fn with_missing_variables(mut self, policy: MissingVariablePolicy) -> Self {
        self.missing_variables = policy;
        self
    }

    /// Renders the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::OperationFailed {
            operation: "serialize_config".to_string(),
            cause: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RtemplateConfig::new();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Error);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(MissingVariablePolicy::parse("Error"), Some(MissingVariablePolicy::Error));
        assert_eq!(MissingVariablePolicy::parse("strict"), Some(MissingVariablePolicy::Error));
        assert_eq!(MissingVariablePolicy::parse(" empty "), Some(MissingVariablePolicy::Empty));
        assert_eq!(MissingVariablePolicy::parse("lenient"), Some(MissingVariablePolicy::Empty));
        assert_eq!(MissingVariablePolicy::parse("ignore"), None);
    }

    #[test]
    fn test_from_toml() {
        let config = RtemplateConfig::from_toml_str(
            "missing_variables = \"empty\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Empty);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = RtemplateConfig::from_toml_str("missing_variables = \"maybe\"").unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(RtemplateConfig::from_toml_str("missing_variables = ").is_err());
    }

    #[test]
    fn test_policy_override() {
        let config = RtemplateConfig::new().with_policy_override(Some("lenient")).unwrap();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Empty);

        let config = config.with_policy_override(Some("error")).unwrap();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Error);
    }

    #[test]
    fn test_policy_override_unset_keeps_value() {
        let base = RtemplateConfig::new().with_missing_variables(MissingVariablePolicy::Empty);
        assert_eq!(base.clone().with_policy_override(None).unwrap(), base);
        assert_eq!(base.clone().with_policy_override(Some("  ")).unwrap(), base);
    }

    #[test]
    fn test_policy_override_invalid_is_error() {
        let err = RtemplateConfig::new()
            .with_policy_override(Some("bogus"))
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
        assert!(err.to_string().contains(MISSING_VARIABLES_ENV));
        assert!(err.to_string().contains("bogus"));
    }

    fn write_config(dir: &Path, name: &str, policy: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("missing_variables = \"{policy}\"\n")).unwrap();
        path
    }

    fn default_marker() -> crate::Result<RtemplateConfig> {
        let mut config = RtemplateConfig::new();
        config.logging.level = Some("default".to_string());
        Ok(config)
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let explicit = write_config(dir.path(), "explicit.toml", "empty");
        let from_env = write_config(dir.path(), "env.toml", "error");

        let config = RtemplateConfig::load_from_sources(
            Some(&explicit),
            from_env.to_str(),
            default_marker,
        )
        .unwrap();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Empty);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_env_path_beats_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let from_env = write_config(dir.path(), "env.toml", "empty");

        let config =
            RtemplateConfig::load_from_sources(None, from_env.to_str(), default_marker).unwrap();
        assert_eq!(config.missing_variables, MissingVariablePolicy::Empty);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_default_when_no_path() {
        for env_path in [None, Some(""), Some("   ")] {
            let config = RtemplateConfig::load_from_sources(None, env_path, default_marker).unwrap();
            assert_eq!(config.logging.level.as_deref(), Some("default"));
        }
    }

    #[test]
    fn test_bad_config_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad = write_config(dir.path(), "bad.toml", "maybe");

        let err = RtemplateConfig::load_from_sources(None, bad.to_str(), default_marker).unwrap_err();
        assert!(err.to_string().contains("maybe"));

        let missing = dir.path().join("missing.toml");
        assert!(RtemplateConfig::load_from_sources(Some(&missing), None, default_marker).is_err());
    }

    #[test]
    fn test_toml_roundtrip_of_effective_config() {
        let config = RtemplateConfig::new().with_missing_variables(MissingVariablePolicy::Empty);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("missing_variables = \"empty\""));
    }
}
