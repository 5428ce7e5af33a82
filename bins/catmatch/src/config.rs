//! Configuration file loading
//!
//! ```toml
//! [taxonomy]
//! path = "taxonomy-with-ids.en-US.txt"
//!
//! [matcher]
//! max_node_distance = 5
//! min_node_length = 6
//! min_score = 0.75
//!
//! [logging]
//! log_level = "info"
//! json = false
//! ```

use anyhow::{Context, Result};
use catmatch_matcher::MatcherConfig;
use catmatch_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard configuration file locations, in lookup order
const CANDIDATES: &[&str] = &[".catmatch.toml", "catmatch.toml", ".config/catmatch.toml"];

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub taxonomy: TaxonomySection,

    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub logging: TelemetryConfig,
}

/// Taxonomy source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomySection {
    /// Path to a `<id> - <path>` taxonomy file
    pub path: Option<PathBuf>,
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations,
    /// falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Taxonomy file, relative paths resolved against the config file
    pub fn taxonomy_path(&self) -> Option<PathBuf> {
        let path = self.schema.taxonomy.path.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        let base = self.path.as_deref().and_then(Path::parent);
        Some(base.map_or_else(|| path.clone(), |dir| dir.join(path)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
