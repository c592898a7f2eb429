use serde::{Deserialize, Serialize};

use crate::sheet::RotationSlot;

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Quadsheet configuration file structure.
///
/// Every setting mirrors a command-line flag and is optional here;
/// the CLI value wins when both are present. Paths are relative to
/// the config file location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadsheetConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Directory containing the rendered source images
    pub source: Option<String>,
    /// Output path for the spritesheet PNG
    pub output: Option<String>,
    /// South-east rotation slot (rotation 0)
    pub se: Option<RotationSlot>,
    /// North-east rotation slot (rotation 1)
    pub ne: Option<RotationSlot>,
    /// North-west rotation slot (rotation 2)
    pub nw: Option<RotationSlot>,
    /// South-west rotation slot (rotation 3)
    pub sw: Option<RotationSlot>,
    /// Number of animation frames to render into the sheet
    pub frames: Option<u32>,
    /// Frames counted in the source numbering, including skipped ones
    pub padded_frames: Option<u32>,
    /// Grid width in tiles
    pub grid_x: Option<u32>,
    /// Grid height in tiles
    pub grid_y: Option<u32>,
    /// Tile width in pixels
    pub tile_width: Option<u32>,
    /// Tile height in pixels
    pub tile_height: Option<u32>,
    /// Coordinate-to-index mapping: "tima" or "plain"
    pub algorithm: Option<String>,
    /// Layout descriptor output path (optional)
    pub descriptor: Option<String>,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}
