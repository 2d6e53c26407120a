//! Configuration management for vidfolio using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;
use crate::storage::{BlobStore, FsBlobStore, MemoryBlobStore};

/// Default server port.
pub const DEFAULT_PORT: u16 = 3030;

/// Default `s-maxage` for public read endpoints.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 10;

/// Blobs subdirectory name.
const BLOBS_SUBDIR: &str = "blobs";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Directory for the filesystem blob store.
    pub blobs_dir: PathBuf,
    /// Base URL used to build public blob URLs.
    pub public_base_url: String,
    /// Default bind address for `serve`.
    pub bind: Option<String>,
    /// Shared secret for admin endpoints. Admin requests are refused when unset.
    pub admin_password: Option<String>,
    /// `s-maxage` for public read endpoints.
    pub cache_max_age_secs: u64,
    /// Brief generator configuration.
    pub llm: LlmConfig,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidfolio");

        Self {
            blobs_dir: data_dir.join(BLOBS_SUBDIR),
            data_dir,
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            bind: None,
            admin_password: None,
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            llm: LlmConfig::default(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            blobs_dir: data_dir.join(BLOBS_SUBDIR),
            data_dir,
            ..Default::default()
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for (label, dir) in [("data", &self.data_dir), ("blobs", &self.blobs_dir)] {
            tracing::debug!("Ensuring {} directory {}", label, dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create {} directory '{}': {}",
                        label,
                        dir.display(),
                        e
                    ),
                )
            })?;
        }
        Ok(())
    }

    /// Build the blob store. `ephemeral` keeps everything in memory.
    pub fn blob_store(&self, ephemeral: bool) -> std::io::Result<Arc<dyn BlobStore>> {
        if ephemeral {
            tracing::warn!("Using in-memory blob store; data is lost on exit");
            return Ok(Arc::new(MemoryBlobStore::new(self.public_base_url.clone())));
        }
        self.ensure_directories()?;
        Ok(Arc::new(FsBlobStore::new(
            self.blobs_dir.clone(),
            self.public_base_url.clone(),
        )))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply variable overrides looked up through `var`. Empty values are
    /// ignored.
    ///
    /// Supported variables:
    /// - `VIDFOLIO_DATA_DIR`: data directory
    /// - `VIDFOLIO_PUBLIC_URL`: public base URL for blob links
    /// - `ADMIN_PASSWORD`: admin shared secret
    /// - the brief generator variables of [`LlmConfig::apply_overrides`]
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| var(name).filter(|s| !s.is_empty());

        if let Some(dir) = non_empty("VIDFOLIO_DATA_DIR") {
            tracing::debug!("Using VIDFOLIO_DATA_DIR from environment: {}", dir);
            self.data_dir = PathBuf::from(dir);
            self.blobs_dir = self.data_dir.join(BLOBS_SUBDIR);
        }
        if let Some(url) = non_empty("VIDFOLIO_PUBLIC_URL") {
            self.public_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(password) = non_empty("ADMIN_PASSWORD") {
            self.admin_password = Some(password);
        }
        self.llm.apply_overrides(&var);
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Public base URL for blob links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    /// Default bind address for `serve`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Admin shared secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    /// `s-maxage` for public read endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_max_age_secs: Option<u64>,
    /// Brief generator configuration.
    #[serde(default, skip_serializing_if = "LlmConfig::is_default")]
    pub llm: LlmConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers vidfolio config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("vidfolio").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        let config: Config = match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
            settings.blobs_dir = settings.data_dir.join(BLOBS_SUBDIR);
        }
        if let Some(ref url) = self.public_base_url {
            settings.public_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(ref bind) = self.bind {
            settings.bind = Some(bind.clone());
        }
        if let Some(ref password) = self.admin_password {
            settings.admin_password = Some(password.clone()).filter(|p| !p.is_empty());
        }
        if let Some(max_age) = self.cache_max_age_secs {
            settings.cache_max_age_secs = max_age;
        }
        settings.llm = self.llm.clone();
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            admin_password: self.admin_password.as_ref().map(|_| "********".to_string()),
            llm: self.llm.redacted(),
            ..self.clone()
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Data directory (--data flag).
    pub data_dir: Option<PathBuf>,
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    // Priority 1: explicit --config flag; priority 2: auto-discovery
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await.unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Config::default()
        }),
        None => Config::load().await,
    };

    let mut settings = Settings::default();

    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd()
    } else {
        config.base_dir().unwrap_or_else(cwd)
    };

    config.apply_to_settings(&mut settings, &base_dir);
    settings.apply_env_overrides();

    // --data takes precedence over everything
    if let Some(data_dir) = options.data_dir {
        settings.data_dir = if data_dir.is_absolute() {
            data_dir
        } else {
            cwd().join(data_dir)
        };
        settings.blobs_dir = settings.data_dir.join(BLOBS_SUBDIR);
    }

    (settings, config)
}
