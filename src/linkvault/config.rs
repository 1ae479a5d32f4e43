//! # Configuration
//!
//! Configuration lives in a `config.json` file inside a config directory.
//! Two directories are consulted by the CLI:
//!
//! 1. **Vault config**: `<vault>/.linkvault/config.json`, settings for that vault.
//! 2. **User config**: the OS config directory (via the `directories` crate),
//!    used for `default_vault`.
//!
//! A missing file means defaults. Unknown keys are rejected by `set`.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file_ext` | `.md` | Extension that marks a file as a note |
//! | `default_vault` | unset | Vault used when `--vault` is not given |

use crate::error::{Result, VaultError};
use crate::store::fs::DEFAULT_FILE_EXT;
use crate::store::normalize_ext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
/// Per-vault config directory, relative to the vault root.
pub const VAULT_CONFIG_DIR: &str = ".linkvault";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Extension for note files (e.g. ".md", ".txt")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Vault to open when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_vault: Option<PathBuf>,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            default_vault: None,
        }
    }
}

impl Config {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let mut config: Config =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        config.file_ext = normalize_ext(&config.file_ext);
        Ok(config)
    }

    /// Load the config stored inside a vault.
    pub fn load_for_vault<P: AsRef<Path>>(vault_root: P) -> Result<Self> {
        Self::load(vault_root.as_ref().join(VAULT_CONFIG_DIR))
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        self.file_ext = normalize_ext(ext);
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "file_ext" => Ok(Some(self.file_ext.clone())),
            "default_vault" => Ok(self
                .default_vault
                .as_ref()
                .map(|p| p.display().to_string())),
            _ => Err(VaultError::Config(format!("Unknown config key: {}", key))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file_ext" => {
                if value.trim_start_matches('.').is_empty() {
                    return Err(VaultError::Config("file_ext cannot be empty".to_string()));
                }
                self.set_file_ext(value);
            }
            "default_vault" => {
                self.default_vault = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(VaultError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All keys with their current values, for display.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("file_ext", Some(self.file_ext.clone())),
            (
                "default_vault",
                self.default_vault.as_ref().map(|p| p.display().to_string()),
            ),
        ]
    }
}
