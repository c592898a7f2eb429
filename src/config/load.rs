use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::QuadsheetConfig;

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: QuadsheetConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: QuadsheetConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve the source directory relative to the config file directory.
    pub fn resolve_source(&self) -> Option<PathBuf> {
        self.config.source.as_ref().map(|s| self.config_dir.join(s))
    }

    /// Resolve the atlas output path relative to the config file directory.
    pub fn resolve_output(&self) -> Option<PathBuf> {
        self.config.output.as_ref().map(|s| self.config_dir.join(s))
    }

    /// Resolve the descriptor output path relative to the config file directory.
    pub fn resolve_descriptor(&self) -> Option<PathBuf> {
        self.config
            .descriptor
            .as_ref()
            .map(|s| self.config_dir.join(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::RotationSlot;

    #[test]
    fn test_parse_minimal_config() {
        let json = r#"{
            "version": 1,
            "source": "renders",
            "output": "sheets/ride.png",
            "se": { "prefix": "cars_se", "id_offset": 128 },
            "frames": 8
        }"#;
        let config: QuadsheetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.frames, Some(8));
        assert_eq!(
            config.se,
            Some(RotationSlot {
                prefix: "cars_se".to_string(),
                id_offset: 128,
            })
        );
        assert!(config.ne.is_none());
        assert!(config.algorithm.is_none());
    }

    #[test]
    fn test_slot_offset_defaults_to_zero() {
        let json = r#"{ "se": { "prefix": "cars_se" } }"#;
        let config: QuadsheetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.se.map(|s| s.id_offset), Some(0));
    }
}
