//! Application configuration loaded from a TOML file.
//!
//! All fields have sensible defaults so Morph works without a config file.
//! Call [`Config::load`] to read from a TOML path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::soffice::SofficeConfig;
use crate::error::{ConvertError, ConvertResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::NotFound`] if the file does not exist.
    /// - [`ConvertError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::NotFound(path.to_path_buf()),
            _ => ConvertError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| ConvertError::ConfigParse(e.to_string()))
    }
}

/// Office-suite backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Binary name or path of the headless office suite.
    #[serde(default = "default_soffice_path")]
    pub soffice_path: PathBuf,
    /// Upper bound in seconds for one external conversion call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            soffice_path: default_soffice_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Converts into the soffice backend's own settings type.
    pub fn to_soffice(&self) -> SofficeConfig {
        SofficeConfig {
            binary: self.soffice_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Output-file policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Overwrite an existing target file (default) or fail.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            overwrite: default_true(),
        }
    }
}

fn default_soffice_path() -> PathBuf {
    PathBuf::from("soffice")
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.backend.soffice_path, PathBuf::from("soffice"));
        assert_eq!(config.backend.timeout_secs, 120);
        assert!(config.output.overwrite);
    }

    #[test]
    fn load_empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("morph.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend.timeout_secs, 120);
        assert!(config.output.overwrite);
    }

    #[test]
    fn load_partial_file_fills_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("morph.toml");
        std::fs::write(
            &path,
            "[backend]\nsoffice_path = \"/opt/libreoffice/program/soffice\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.backend.soffice_path,
            PathBuf::from("/opt/libreoffice/program/soffice")
        );
        assert_eq!(config.backend.timeout_secs, 120);
    }

    #[test]
    fn load_full_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("morph.toml");
        std::fs::write(
            &path,
            "[backend]\ntimeout_secs = 30\n\n[output]\noverwrite = false\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(!config.output.overwrite);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConvertError::NotFound(_))));
    }

    #[test]
    fn load_malformed_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[backend\ntimeout_secs = ").unwrap();
        let result = Config::load(&path);
        assert!(matches!(result, Err(ConvertError::ConfigParse(_))));
    }

    #[test]
    fn to_soffice_carries_timeout() {
        let config = BackendConfig {
            soffice_path: PathBuf::from("soffice"),
            timeout_secs: 5,
        };
        let soffice = config.to_soffice();
        assert_eq!(soffice.timeout, Duration::from_secs(5));
    }
}
