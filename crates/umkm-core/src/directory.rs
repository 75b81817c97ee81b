use std::collections::HashSet;
use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Highest value an average rating may take.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Active,
    Inactive,
    Pending,
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessStatus::Active => write!(f, "active"),
            BusinessStatus::Inactive => write!(f, "inactive"),
            BusinessStatus::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Instagram handle, with or without the leading `@`.
    pub instagram: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub average: f64,
    pub review_count: u32,
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One row of the business directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Stable row key; also the detail-view path segment.
    pub id: u32,
    pub name: String,
    pub owner_name: String,
    pub business_type: String,
    pub category: String,
    #[serde(default)]
    pub founding_year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub contact: Contact,
    pub ratings: Ratings,
    #[serde(default)]
    pub payment_methods: Vec<String>,
    #[serde(default)]
    pub delivery_methods: Vec<String>,
    pub status: BusinessStatus,
    #[serde(default)]
    pub location: Option<Coordinates>,
}

impl BusinessRecord {
    /// Path of the detail view for this record, e.g. `"/umkm/7"`.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("/umkm/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryFile {
    pub businesses: Vec<BusinessRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryFormat {
    Yaml,
    Json,
}

impl DirectoryFormat {
    /// Pick a format from a file extension (`yaml`, `yml`, `json`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load and validate the business directory from a YAML or JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_directory(path: &Path) -> Result<DirectoryFile, ConfigError> {
    let format = DirectoryFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DirectoryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let directory = parse_directory(&content, format)?;
    tracing::info!(
        path = %path.display(),
        businesses = directory.businesses.len(),
        "loaded business directory"
    );
    Ok(directory)
}

/// Parse and validate directory content that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the content cannot be parsed or fails validation.
pub fn parse_directory(content: &str, format: DirectoryFormat) -> Result<DirectoryFile, ConfigError> {
    let directory: DirectoryFile = match format {
        DirectoryFormat::Yaml => serde_yaml::from_str(content)?,
        DirectoryFormat::Json => serde_json::from_str(content)?,
    };

    validate_directory(&directory, chrono::Utc::now().year())?;

    Ok(directory)
}

fn validate_directory(directory: &DirectoryFile, current_year: i32) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for record in &directory.businesses {
        if !seen_ids.insert(record.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate business id {}",
                record.id
            )));
        }

        if record.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "business {} has an empty name",
                record.id
            )));
        }

        let average = record.ratings.average;
        if !(0.0..=MAX_RATING).contains(&average) {
            return Err(ConfigError::Validation(format!(
                "business '{}' has rating {average} outside 0..={MAX_RATING}",
                record.name
            )));
        }

        if let Some(year) = record.founding_year {
            if year > current_year {
                return Err(ConfigError::Validation(format!(
                    "business '{}' has founding year {year} in the future",
                    record.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
