use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validation;

/// Console configuration (YAML).
///
/// ```yaml
/// root_directory: /srv/app
/// default_command: status
/// log_level: info
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Application root. PID records live under `<root>/.tmp/`. Defaults to
    /// the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,

    /// Command to run when none is named on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_command: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            root_directory: None,
            default_command: None,
            log_level: default_log_level(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::load_from_string(&content)
    }

    /// Load configuration from a YAML string
    pub fn load_from_string(content: &str) -> Result<Self> {
        let config: ConsoleConfig = serde_yaml::from_str(content)
            .context("Failed to parse YAML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// The configured root, or the current directory.
    pub fn resolve_root_directory(&self) -> std::io::Result<PathBuf> {
        match &self.root_directory {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let config = ConsoleConfig::load_from_string(
            "root_directory: /srv/app\ndefault_command: status\nlog_level: debug\n",
        )
        .unwrap();

        assert_eq!(config.root_directory.as_deref(), Some("/srv/app"));
        assert_eq!(config.default_command.as_deref(), Some("status"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.resolve_root_directory().unwrap(), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::load_from_string("default_command: spawn\n").unwrap();

        assert_eq!(config.root_directory, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.resolve_root_directory().unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ConsoleConfig::load_from_string("log_level: [unclosed").unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "root_directory: /srv/app").unwrap();

        let config = ConsoleConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.root_directory.as_deref(), Some("/srv/app"));
    }

    #[test]
    fn test_missing_file() {
        let err = ConsoleConfig::load_from_file("/nonexistent/bgproc.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
