//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lastfm-lens\config.toml
//! - macOS: ~/Library/Application Support/lastfm-lens/config.toml
//! - Linux: ~/.config/lastfm-lens/config.toml
//!
//! The config file is human-readable and editable. Command-line flags and
//! their environment variables override what is stored here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Enrichment cache settings
    pub cache: CacheConfig,

    /// Outbound HTTP settings
    pub http: HttpConfig,

    /// yt-dlp settings
    pub youtube: YouTubeConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Last.fm API key (https://www.last.fm/api/account/create)
    pub lastfm_api_key: Option<String>,

    /// Whose listening data to show
    pub lastfm_username: Option<String>,
}

impl Credentials {
    /// API key, or [`ConfigError::MissingCredential`] when unset or blank.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        non_blank(&self.lastfm_api_key).ok_or(ConfigError::MissingCredential("lastfm_api_key"))
    }

    /// Username, or [`ConfigError::MissingCredential`] when unset or blank.
    pub fn username(&self) -> Result<&str, ConfigError> {
        non_blank(&self.lastfm_username).ok_or(ConfigError::MissingCredential("lastfm_username"))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Enrichment cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file location (None = OS cache directory)
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::enrichment::store::default_path)
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout_secs: u64,

    /// User-Agent sent to every service
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!(
                "lastfm-lens/{} (https://github.com/lastfm-lens/lastfm-lens)",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// HTTP client shared by all services.
    pub fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout())
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))
    }
}

/// yt-dlp settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// yt-dlp executable (name on PATH or absolute path)
    pub ytdlp_path: PathBuf,

    /// Passed to yt-dlp as `--socket-timeout`
    pub socket_timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from("yt-dlp"),
            socket_timeout_secs: 15,
        }
    }
}

impl YouTubeConfig {
    pub fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout_secs.max(1))
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lastfm-lens"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file, atomically.
pub fn save_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Missing credential `{0}`: set it in config.toml or pass it on the command line")]
    MissingCredential(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[http]"));
        assert!(toml.contains("[youtube]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.lastfm_api_key = Some("test-key-123".to_string());
        config.credentials.lastfm_username = Some("rj".to_string());
        config.cache.path = Some(PathBuf::from("/var/cache/lens.json"));
        config.http.timeout_secs = 30;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(
            parsed.credentials.lastfm_api_key,
            Some("test-key-123".to_string())
        );
        assert_eq!(parsed.credentials.username().unwrap(), "rj");
        assert_eq!(parsed.cache.resolved_path(), PathBuf::from("/var/cache/lens.json"));
        assert_eq!(parsed.http.timeout_secs, 30);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
lastfm_api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.api_key().unwrap(), "my-key");

        // Other fields use defaults
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.youtube.ytdlp_path, PathBuf::from("yt-dlp"));
        assert!(config.cache.path.is_none());
    }

    #[test]
    fn test_missing_credentials() {
        let mut creds = Credentials::default();
        assert!(matches!(
            creds.api_key(),
            Err(ConfigError::MissingCredential("lastfm_api_key"))
        ));

        creds.lastfm_username = Some("   ".to_string());
        assert!(matches!(
            creds.username(),
            Err(ConfigError::MissingCredential("lastfm_username"))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.youtube.socket_timeout_secs = 5;
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.youtube.socket_timeout(), Duration::from_secs(5));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_garbled_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[credentials\nlastfm_api_key = ").unwrap();

        let config = load_from(&path);
        assert!(config.credentials.lastfm_api_key.is_none());
    }

    #[test]
    fn test_http_client_builds() {
        assert!(HttpConfig::default().build_client().is_ok());
    }
}
