//! # CmdRS Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module implements the configuration system for CmdRS, handling
//! loading, merging, validation, and access to configuration data. It
//! supports a multi-level configuration approach that combines defaults,
//! user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! The configuration system follows these principles:
//! - Configuration is loaded from multiple sources in order of precedence
//! - Paths are validated and expanded (e.g., `~` to home directory)
//! - Configuration is validated for correctness before use
//! - Structured data models ensure type safety
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.cmdrs.toml` in current directory or ancestors
//! 2. User-specific `~/.config/cmdrs/config.toml`
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! Loading and using configuration:
//!
//! ```rust
//! let cfg = config::load_config()?;
//!
//! // Default environment overlay applied to every dispatched command
//! let overlay = &cfg.execution.env_vars;
//!
//! // Shell-string policy gate
//! if cfg.execution.deny_unconfirmed_shell { /* reject unconfirmed --shell */ }
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the handlers that need it.
//!
use crate::core::error::{CmdrsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Configuration governing how commands are dispatched.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Environment variables overlaid onto every dispatched command.
    #[serde(default)]
    pub env_vars: HashMap<String, String>,
    /// Default working directory for dispatched commands (can use ~).
    /// Will be expanded.
    #[serde(default)]
    pub default_workdir: Option<String>,
    /// Require interactive confirmation for every dispatched command.
    #[serde(default)]
    pub always_confirm: bool,
    /// Reject shell-string invocations that are not confirmation-gated.
    #[serde(default)]
    pub deny_unconfirmed_shell: bool,
    /// Sentinel argument values dropped during normalization.
    #[serde(default = "default_blocked_args")]
    pub blocked_args: Vec<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            env_vars: HashMap::new(),
            default_workdir: None,
            always_confirm: false,
            deny_unconfirmed_shell: false,
            blocked_args: default_blocked_args(),
        }
    }
}

fn default_blocked_args() -> Vec<String> {
    vec![String::new()]
}

const PROJECT_CONFIG_FILENAME: &str = ".cmdrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CmdRS", "cmdrs") {
        let config_dir = proj_dirs.config_dir();
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file (.cmdrs.toml) found in current directory or ancestors."
        );
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        let git_dir = path.join(".git");
        if project_config.exists() && project_config.is_file() {
            return Ok(Some(project_config));
        }
        if git_dir.exists() && git_dir.is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.execution.env_vars = if !project_cfg.execution.env_vars.is_empty() {
        project_cfg.execution.env_vars
    } else {
        user.execution.env_vars
    };
    merged.execution.default_workdir = project_cfg
        .execution
        .default_workdir
        .or(user.execution.default_workdir);
    merged.execution.always_confirm =
        project_cfg.execution.always_confirm || user.execution.always_confirm;
    merged.execution.deny_unconfirmed_shell =
        project_cfg.execution.deny_unconfirmed_shell || user.execution.deny_unconfirmed_shell;
    merged.execution.blocked_args = if project_cfg.execution.blocked_args != default_blocked_args()
    {
        project_cfg.execution.blocked_args
    } else {
        user.execution.blocked_args
    };
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    if let Some(workdir) = &config.execution.default_workdir {
        let expanded = shellexpand::tilde(workdir).into_owned();
        debug!("Expanded default workdir: {}", expanded);
        config.execution.default_workdir = Some(expanded);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(workdir) = &config.execution.default_workdir {
        let dir = PathBuf::from(workdir);
        if !dir.exists() {
            warn!(
                "Configured default workdir '{}' does not exist.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(CmdrsError::Config(format!(
                "Configured default workdir '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    for key in config.execution.env_vars.keys() {
        if key.is_empty() {
            return Err(anyhow!(CmdrsError::Config(
                "Environment overlay cannot contain an empty variable name.".to_string()
            )));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_from_path() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
                [execution]
                deny_unconfirmed_shell = true
            "#,
        )?;

        let config = load_config_from_path(&config_path)?;
        assert!(config.execution.deny_unconfirmed_shell);
        assert!(!config.execution.always_confirm);
        Ok(())
    }

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [execution]
            default_workdir = "~/builds"
            always_confirm = true

            [execution.env_vars]
            RUST_LOG = "debug"
            CI = "1"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(
            config.execution.default_workdir,
            Some("~/builds".to_string()) // Not yet expanded
        );
        assert!(config.execution.always_confirm);
        assert!(!config.execution.deny_unconfirmed_shell); // Default
        assert_eq!(config.execution.blocked_args, default_blocked_args()); // Default
        assert_eq!(
            config.execution.env_vars.get("RUST_LOG").map(String::as_str),
            Some("debug")
        );
        assert_eq!(
            config.execution.env_vars.get("CI").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml_content = r#"
            [execution]
            no_such_option = true
        "#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            execution: ExecutionConfig {
                default_workdir: Some("~/cmdrs_test".to_string()),
                ..Default::default()
            },
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.execution.default_workdir.as_deref(),
            Some(home_dir.join("cmdrs_test").to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            execution: ExecutionConfig {
                env_vars: HashMap::from([("FROM".to_string(), "user".to_string())]),
                default_workdir: Some("/user".to_string()),
                always_confirm: true,
                ..Default::default()
            },
        };
        let project = Config {
            execution: ExecutionConfig {
                env_vars: HashMap::from([("FROM".to_string(), "project".to_string())]),
                default_workdir: Some("/project".to_string()),
                blocked_args: vec![String::new(), "none".to_string()],
                ..Default::default()
            },
        };

        let merged = merge_configs(user, Some(project));

        assert_eq!(
            merged.execution.env_vars.get("FROM").map(String::as_str),
            Some("project")
        );
        assert_eq!(
            merged.execution.default_workdir.as_deref(),
            Some("/project")
        );
        // Booleans accumulate: either level may demand confirmation.
        assert!(merged.execution.always_confirm);
        assert_eq!(
            merged.execution.blocked_args,
            vec![String::new(), "none".to_string()]
        );
    }

    #[test]
    fn test_merge_without_project_config() {
        let user = Config {
            execution: ExecutionConfig {
                default_workdir: Some("/user".to_string()),
                ..Default::default()
            },
        };
        let merged = merge_configs(user, None);
        assert_eq!(merged.execution.default_workdir.as_deref(), Some("/user"));
    }

    #[test]
    fn test_validate_rejects_empty_env_key() {
        let config = Config {
            execution: ExecutionConfig {
                env_vars: HashMap::from([(String::new(), "value".to_string())]),
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("empty variable name"));
    }
}
