//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{AuditError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AuditError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| AuditError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| AuditError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn reject_empty_path(value: &Option<PathBuf>, key: &str, path: &Path) -> Result<()> {
    match value {
        Some(value) if value.as_os_str().is_empty() => Err(AuditError::config_error(format!(
            "Invalid empty {} in config file: {}",
            key,
            path.display()
        ))),
        _ => Ok(()),
    }
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    reject_empty_path(&settings.templates_dir, "templates_dir", path)?;
    reject_empty_path(&settings.whitelist_path, "whitelist_path", path)?;
    reject_empty_path(&settings.report_path, "report_path", path)?;
    reject_empty_path(&settings.save_path, "save_path", path)?;

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(AuditError::config_error(format!(
                    "Empty exclude pattern in config file: {}",
                    path.display()
                )));
            }

            glob::Pattern::new(pattern).map_err(|e| {
                AuditError::config_error(format!(
                    "Invalid exclude pattern '{}' in config file: {}: {}",
                    pattern,
                    path.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Locations searched for a config file, in order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("model-audit").join("config.toml"));
    }

    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!(path = %location.display(), "using config file");
            return parse_config_file(location).map(Some);
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(AuditError::io_error)?;
        }
    }

    fs::write(path, include_str!("default_config.toml")).map_err(|e| AuditError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OutputFormat;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
        templates_dir = "/srv/templates"
        exclude_patterns = ["index.*", "draft-*"]
        output_format = "json"
        parallel = true
    "#;

    #[test]
    fn test_parse_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, CONFIG).unwrap();

        let settings = parse_config_file(&config_path).unwrap();
        assert_eq!(settings.templates_dir, Some(PathBuf::from("/srv/templates")));
        assert_eq!(
            settings.exclude_patterns,
            Some(vec!["index.*".to_string(), "draft-*".to_string()])
        );
        assert_eq!(settings.output_format, Some(OutputFormat::Json));
        assert_eq!(settings.parallel, Some(true));
        assert_eq!(settings.report_path, None);
    }

    #[test]
    fn test_parse_config_file_missing() {
        let err = parse_config_file("/nonexistent/model-audit.toml").unwrap_err();
        assert!(matches!(err, AuditError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_config_content("scan_path = \"/x\"", "virtual.toml").unwrap_err();
        assert!(matches!(err, AuditError::ConfigParse { .. }));
    }

    #[test]
    fn test_validate_partial_settings() {
        let valid = PartialSettings {
            templates_dir: Some(PathBuf::from("templates")),
            exclude_patterns: Some(vec!["index.*".to_string()]),
            ..Default::default()
        };
        assert!(validate_partial_settings(&valid, "test.toml").is_ok());

        let empty_pattern = PartialSettings {
            exclude_patterns: Some(vec!["".to_string()]),
            ..Default::default()
        };
        assert!(validate_partial_settings(&empty_pattern, "test.toml").is_err());

        let bad_pattern = PartialSettings {
            exclude_patterns: Some(vec!["[".to_string()]),
            ..Default::default()
        };
        assert!(validate_partial_settings(&bad_pattern, "test.toml").is_err());

        let empty_path = PartialSettings {
            report_path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(validate_partial_settings(&empty_path, "test.toml").is_err());
    }

    #[test]
    fn test_create_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join(".model-audit.toml");

        create_default_config(&config_path).unwrap();

        // The template only documents the defaults
        let settings = parse_config_file(&config_path).unwrap();
        assert_eq!(settings, PartialSettings::default());
    }

    #[test]
    fn test_default_locations_start_with_current_directory() {
        let locations = default_config_locations();
        assert_eq!(locations[0], PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
