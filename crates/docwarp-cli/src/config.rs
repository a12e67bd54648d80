use std::path::Path;

use serde::{Deserialize, Serialize};

use docwarp::{capture::CaptureConfig, pipeline::PipelineConfig};

/// Settings loaded from the optional JSON configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub capture: CaptureConfig,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
