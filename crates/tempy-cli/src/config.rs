//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config` path or the default location)
//! 3. Built-in defaults (always present)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template directory, overriding the built-in `~/.tempy`.
    pub tempydir: Option<PathBuf>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; `None` reads
    /// the default location.  A missing file yields the defaults, a present
    /// but unparseable file is an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("parsing config file '{}'", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tempy.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tempy", "tempy")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".tempy.toml"))
    }

    /// Resolve the template directory: flag, then config file, then
    /// `~/.tempy`.
    pub fn template_root(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.tempydir {
            return dir.clone();
        }
        directories::UserDirs::new()
            .map(|d| d.home_dir().join(".tempy"))
            .unwrap_or_else(|| PathBuf::from(".tempy"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_without_file_returns_defaults() {
        // Point at a path that certainly does not exist.
        let missing = PathBuf::from("/nonexistent/tempy-config.toml");
        let cfg = AppConfig::load(Some(&missing)).unwrap();
        assert!(cfg.tempydir.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_reads_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tempydir = '/srv/templates'\n[output]\nno_color = true").unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(cfg.tempydir.as_deref(), Some(Path::new("/srv/templates")));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn broken_config_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tempydir = [not toml").unwrap();
        assert!(AppConfig::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn flag_beats_config_beats_default() {
        let cfg = AppConfig {
            tempydir: Some(PathBuf::from("/from-config")),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.template_root(Some(Path::new("/from-flag"))),
            PathBuf::from("/from-flag")
        );
        assert_eq!(cfg.template_root(None), PathBuf::from("/from-config"));

        let bare = AppConfig::default();
        assert!(bare.template_root(None).ends_with(".tempy"));
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
