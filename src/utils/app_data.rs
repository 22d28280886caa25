use crate::index::types::IndexConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "docdex";
const CONFIG_FILE: &str = "config.json";
const ARTIFACT_FILE: &str = "index.txt";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Worker threads for full builds. 0 uses the number of CPU cores.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Show a progress bar while building from scratch
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_worker_count() -> usize {
    0
}

fn default_show_progress() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            show_progress: default_show_progress(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Indexer settings derived from this config (artifact at the default location)
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            worker_count: self.worker_count,
            artifact_path: None,
            show_progress: self.show_progress,
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory for storing indexes
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the index directory for a specific document directory
pub fn get_index_dir(root_path: &Path) -> Result<PathBuf> {
    let app_data = get_app_data_dir()?;
    Ok(app_data.join("indexes").join(hash_path(root_path)))
}

/// Default location of the index artifact for a document directory
pub fn get_artifact_path(root_path: &Path) -> Result<PathBuf> {
    Ok(get_index_dir(root_path)?.join(ARTIFACT_FILE))
}

/// Hash a path to create a unique folder name
/// Format: first 16 chars of dir name + hash
fn hash_path(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let path_str = canonical.to_string_lossy();

    let dir_name = canonical
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let sanitized: String = dir_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(16)
        .collect();

    let mut hasher = DefaultHasher::new();
    path_str.hash(&mut hasher);
    let hash = hasher.finish();

    format!("{}-{:016x}", sanitized, hash)
}

/// Remove the stored index for a document directory.
/// Returns whether anything was removed.
pub fn remove_index(root_path: &Path) -> Result<bool> {
    let index_dir = get_index_dir(root_path)?;
    if index_dir.exists() {
        fs::remove_dir_all(&index_dir)
            .with_context(|| format!("Failed to remove {}", index_dir.display()))?;
        return Ok(true);
    }
    Ok(false)
}
