//! Tracker configuration stored as TOML (by default `pm-tracker.toml`).
//!
//! Every field has a default, so a missing file or a partial file is valid.
//!
//! ```toml
//! data_dir = ".pm-tracker"
//! channel_buffer = 32
//! log_filter = "info"
//!
//! [ledger]
//! enforce_capacity_on_update = false
//! prune_empty_allocations = false
//!
//! [projects]
//! on_delete = "cascade"
//! ```

use crate::project_actor::DeletionPolicy;
use crate::resource_actor::LedgerPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "pm-tracker.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory holding one `<key>.json` file per collection.
    pub data_dir: PathBuf,

    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    pub ledger: LedgerPolicy,

    pub projects: ProjectsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectsConfig {
    pub on_delete: DeletionPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".pm-tracker"),
            channel_buffer: 32,
            log_filter: "info".to_string(),
            ledger: LedgerPolicy::default(),
            projects: ProjectsConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be > 0".into()));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TrackerConfig::default()`.
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    if !path.exists() {
        let cfg = TrackerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: TrackerConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TrackerConfig) -> Result<(), ConfigError> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg)?;
    buf.push('\n');

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf).map_err(write_err)?;
    fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, TrackerConfig::default());
        assert_eq!(cfg.projects.on_delete, DeletionPolicy::Cascade);
        assert!(!cfg.ledger.enforce_capacity_on_update);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("pm-tracker.toml");
        let mut cfg = TrackerConfig::default();
        cfg.projects.on_delete = DeletionPolicy::Orphan;
        cfg.ledger.prune_empty_allocations = true;
        write_config(&path, &cfg).expect("write");
        assert_eq!(load_config(&path).expect("load"), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("pm-tracker.toml");
        fs::write(&path, "[ledger]\nenforce_capacity_on_update = true\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert!(cfg.ledger.enforce_capacity_on_update);
        assert!(!cfg.ledger.prune_empty_allocations);
        assert_eq!(cfg.channel_buffer, 32);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("pm-tracker.toml");

        fs::write(&path, "channel_buffer = 0\n").expect("write");
        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

        fs::write(&path, "[projects]\non_delete = \"explode\"\n").expect("write");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
