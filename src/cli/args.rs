use clap::Parser;
use std::path::PathBuf;

use crate::index::IndexingAlgorithm;
use crate::sheet::RotationSlot;

#[derive(Parser, Debug)]
#[command(name = "quadsheet")]
#[command(
    version,
    about = "Merge per-rotation animation renders into one spritesheet",
    long_about = None
)]
pub struct CliArgs {
    /// Directory containing the rendered source images
    #[arg(required_unless_present = "config")]
    pub source: Option<PathBuf>,

    /// Output path for the spritesheet PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// South-east rotation slot (rotation 0)
    #[arg(long, value_name = "PREFIX[:OFFSET]")]
    pub se: Option<RotationSlot>,

    /// North-east rotation slot (rotation 1)
    #[arg(long, value_name = "PREFIX[:OFFSET]")]
    pub ne: Option<RotationSlot>,

    /// North-west rotation slot (rotation 2)
    #[arg(long, value_name = "PREFIX[:OFFSET]")]
    pub nw: Option<RotationSlot>,

    /// South-west rotation slot (rotation 3)
    #[arg(long, value_name = "PREFIX[:OFFSET]")]
    pub sw: Option<RotationSlot>,

    /// Number of animation frames to render into the sheet
    #[arg(short, long)]
    pub frames: Option<u32>,

    /// Frames counted in the source numbering, including skipped ones
    /// [default: --frames]
    #[arg(long, value_name = "N")]
    pub padded_frames: Option<u32>,

    /// Grid width in tiles
    #[arg(long, value_name = "TILES")]
    pub grid_x: Option<u32>,

    /// Grid height in tiles
    #[arg(long, value_name = "TILES")]
    pub grid_y: Option<u32>,

    /// Tile width in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_width: Option<u32>,

    /// Tile height in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_height: Option<u32>,

    /// Coordinate-to-index mapping [default: tima]
    #[arg(short, long, value_enum)]
    pub algorithm: Option<IndexingAlgorithm>,

    /// Also write a layout descriptor for the data compiler to this path
    #[arg(short, long, value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
