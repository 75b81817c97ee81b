use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Dataset file, `.yaml`/`.yml` or `.json`.
    pub data_path: PathBuf,
    /// Fallback log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Initial page size for a fresh listing session.
    pub page_size: NonZeroUsize,
    /// Zoom level for the single-marker map view.
    pub map_zoom: u8,
}
