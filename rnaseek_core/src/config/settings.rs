use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "RNASEEK";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where and how selected FASTQ files are forwarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub endpoint: String,
    pub field_name: String,
    pub max_file_size_mb: u64,
    pub request_timeout_seconds: u64,
    pub decompress_gzip: bool,
}

/// Static identity settings for the local provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub session_restore_delay_ms: u64,
    pub restore_on_start: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/process-fastq".to_string(),
            field_name: "file".to_string(),
            max_file_size_mb: 512,
            request_timeout_seconds: 300,
            decompress_gzip: true,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            uid: "local-user".to_string(),
            display_name: "Local Researcher".to_string(),
            email: None,
            session_restore_delay_ms: 50,
            restore_on_start: false,
        }
    }
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> usize {
        (self.max_file_size_mb as usize).saturating_mul(1024 * 1024)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` when present, then `RNASEEK_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let file = Path::new(DEFAULT_CONFIG_FILE);
        Self::load_from(file.exists().then_some(file))
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.upload.endpoint.trim().is_empty() {
            return Err(ConfigError::Message(
                "Upload endpoint cannot be empty".to_string(),
            ));
        }

        if !self.upload.endpoint.starts_with("http://") && !self.upload.endpoint.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "Upload endpoint must be an http(s) URL: {}",
                self.upload.endpoint
            )));
        }

        if self.upload.field_name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Upload field name cannot be empty".to_string(),
            ));
        }

        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::Message(
                "Max file size must be greater than 0".to_string(),
            ));
        }

        if self.identity.display_name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Identity display name cannot be empty".to_string(),
            ));
        }

        if self.upload.endpoint.contains("your-backend-api") {
            tracing::warn!("Upload endpoint is still a placeholder - set upload.endpoint");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
