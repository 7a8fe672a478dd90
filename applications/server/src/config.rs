/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_extractor")]
    pub extractor: ExtractorSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorSettings {
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    #[serde(default = "default_flat_timeout_secs")]
    pub flat_timeout_secs: u64,

    #[serde(default = "default_full_timeout_secs")]
    pub full_timeout_secs: u64,

    #[serde(default = "default_min_duration_coverage_pct")]
    pub min_duration_coverage_pct: f64,

    #[serde(default)]
    pub cookies_file: Option<PathBuf>,
}

impl ExtractorSettings {
    pub fn to_extractor_config(&self) -> watchplan_extractor::ExtractorConfig {
        watchplan_extractor::ExtractorConfig {
            binary: self.ytdlp_path.clone(),
            flat_timeout: Duration::from_secs(self.flat_timeout_secs),
            full_timeout: Duration::from_secs(self.full_timeout_secs),
            min_duration_coverage_pct: self.min_duration_coverage_pct,
            cookies_file: self.cookies_file.clone(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with WATCHPLAN_)
        settings = settings.add_source(
            config::Environment::with_prefix("WATCHPLAN")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set WATCHPLAN_AUTH_JWT_SECRET)".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.extractor.min_duration_coverage_pct) {
            return Err(ServerError::Config(
                "extractor.min_duration_coverage_pct must be within 0..=100".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/watchplan.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_extractor() -> ExtractorSettings {
    ExtractorSettings {
        ytdlp_path: default_ytdlp_path(),
        flat_timeout_secs: default_flat_timeout_secs(),
        full_timeout_secs: default_full_timeout_secs(),
        min_duration_coverage_pct: default_min_duration_coverage_pct(),
        cookies_file: None,
    }
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_flat_timeout_secs() -> u64 {
    30
}

fn default_full_timeout_secs() -> u64 {
    90
}

fn default_min_duration_coverage_pct() -> f64 {
    80.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            extractor: default_extractor(),
        }
    }
}
