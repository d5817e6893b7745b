use super::*;
use anyhow::{anyhow, Result};

/// Validate the complete configuration
pub fn validate_config(config: &ConsoleConfig) -> Result<()> {
    validate_log_level(&config.log_level)?;

    if let Some(ref root) = config.root_directory {
        if root.trim().is_empty() {
            return Err(anyhow!("root_directory cannot be empty"));
        }
    }

    if let Some(ref name) = config.default_command {
        validate_command_name(name)?;
    }

    Ok(())
}

fn validate_log_level(level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(anyhow!(
            "Invalid log level: {}, must be one of: trace, debug, info, warn, error",
            level
        )),
    }
}

fn validate_command_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("default_command cannot be empty"));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(anyhow!("default_command cannot contain whitespace: {}", name));
    }

    Ok(())
}
