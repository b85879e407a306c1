use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `NUTRIMOOD_` prefix.
/// For example: `NUTRIMOOD_ARTIFACTS__DIR=/srv/models`, `NUTRIMOOD_SERVER__PORT=8097`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model artifact locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Recommendation settings
    #[serde(default)]
    pub recommend: RecommendConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding the artifact files
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,

    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,

    #[serde(default = "default_encoder_file")]
    pub encoder_file: String,

    #[serde(default = "default_recommender_file")]
    pub recommender_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            classifier_file: default_classifier_file(),
            scaler_file: default_scaler_file(),
            encoder_file: default_encoder_file(),
            recommender_file: default_recommender_file(),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_classifier_file() -> String {
    "mood_classifier_model.json".to_string()
}

fn default_scaler_file() -> String {
    "mood_feature_scaler.json".to_string()
}

fn default_encoder_file() -> String {
    "mood_encoder.json".to_string()
}

fn default_recommender_file() -> String {
    "food_recommender.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    /// Number of foods to recommend per prediction
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    crate::recommend::DEFAULT_TOP_N
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8097
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `NUTRIMOOD_` and use
    /// double underscores for nested values:
    /// - `NUTRIMOOD_ARTIFACTS__DIR` -> artifacts.dir
    /// - `NUTRIMOOD_RECOMMEND__TOP_N` -> recommend.top_n
    /// - `NUTRIMOOD_SERVER__PORT` -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NUTRIMOOD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
