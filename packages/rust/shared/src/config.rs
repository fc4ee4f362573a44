//! Application configuration for merchimport.
//!
//! User config lives at `~/.merchimport/merchimport.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MerchImportError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "merchimport.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".merchimport";

// ---------------------------------------------------------------------------
// Config structs (matching merchimport.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV parsing behaviour.
    #[serde(default)]
    pub parser: ParserConfig,

    /// File upload limits.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Template asset location.
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// `[parser]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Let quoted fields span line breaks. Off by default: each physical
    /// line is one row.
    #[serde(default)]
    pub multiline_quotes: bool,
}

/// `[upload]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Accepted file extensions, without the dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}
fn default_allowed_extensions() -> Vec<String> {
    vec!["csv".into()]
}

/// `[templates]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// URL path the dashboard serves blank templates from.
    #[serde(default = "default_template_base")]
    pub base_path: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            base_path: default_template_base(),
        }
    }
}

fn default_template_base() -> String {
    "/templates".into()
}

// ---------------------------------------------------------------------------
// Import config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime import configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Let quoted fields span line breaks.
    pub multiline_quotes: bool,
    /// Largest accepted file, in bytes.
    pub max_file_bytes: u64,
    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ImportConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            multiline_quotes: config.parser.multiline_quotes,
            max_file_bytes: config.upload.max_file_bytes,
            allowed_extensions: config
                .upload
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.merchimport/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MerchImportError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.merchimport/merchimport.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MerchImportError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        MerchImportError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MerchImportError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MerchImportError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MerchImportError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
