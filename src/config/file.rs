//! File and environment configuration sources

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{AuditError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".model-audit.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "MODEL_AUDIT";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(AuditError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_TEMPLATES_DIR`, `_WHITELIST`, `_REPORT`, `_SAVE`,
/// `_EXCLUDE` (comma separated), `_OUTPUT_FORMAT` and `_PARALLEL`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    overrides: Option<BTreeMap<String, String>>,
}

const ENV_KEYS: [&str; 7] = [
    "TEMPLATES_DIR",
    "WHITELIST",
    "REPORT",
    "SAVE",
    "EXCLUDE",
    "OUTPUT_FORMAT",
    "PARALLEL",
];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            overrides: None,
        }
    }

    /// Read variables from a fixed map instead of the process environment
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::new(prefix);
        config.overrides = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        config
    }

    fn var(&self, key: &str) -> Option<String> {
        let name = format!("{}_{}", self.prefix, key);
        match &self.overrides {
            Some(vars) => vars.get(&name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn invalid(&self, key: &str, value: &str) -> AuditError {
        AuditError::config_error(format!(
            "Invalid value '{}' for {}_{}",
            value, self.prefix, key
        ))
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        settings.templates_dir = self.var("TEMPLATES_DIR").map(PathBuf::from);
        settings.whitelist_path = self.var("WHITELIST").map(PathBuf::from);
        settings.report_path = self.var("REPORT").map(PathBuf::from);
        settings.save_path = self.var("SAVE").map(PathBuf::from);

        if let Some(exclude) = self.var("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let parsed = format.parse().map_err(|_| self.invalid("OUTPUT_FORMAT", &format))?;
            settings.output_format = Some(parsed);
        }

        if let Some(parallel) = self.var("PARALLEL") {
            let parsed = match parallel.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(self.invalid("PARALLEL", &parallel)),
            };
            settings.parallel = Some(parsed);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
