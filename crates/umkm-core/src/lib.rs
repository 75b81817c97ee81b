pub mod app_config;
pub mod config;
pub mod directory;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{
    load_directory, parse_directory, BusinessRecord, BusinessStatus, Contact, Coordinates,
    DirectoryFile, DirectoryFormat, Ratings, MAX_RATING,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read directory file {path}: {source}")]
    DirectoryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML directory file: {0}")]
    DirectoryYamlParse(#[from] serde_yaml::Error),

    #[error("failed to parse JSON directory file: {0}")]
    DirectoryJsonParse(#[from] serde_json::Error),

    #[error("unsupported directory file extension: {0}")]
    UnsupportedFormat(String),

    #[error("directory validation failed: {0}")]
    Validation(String),
}
