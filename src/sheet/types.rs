use serde::{Deserialize, Serialize};

use crate::index::IndexingAlgorithm;

/// Slot names in rotation order 0-3. The order matches the vertical
/// banding of the canvas and the downstream compiler's view order; it
/// must never be changed.
pub const ROTATION_NAMES: [&str; 4] = ["se", "ne", "nw", "sw"];

/// One of the four fixed rotation slots: the filename prefix of its
/// renders and the image id the numbering starts at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSlot {
    pub prefix: String,
    /// Image id of the slot's first frame
    #[serde(default)]
    pub id_offset: i64,
}

impl std::str::FromStr for RotationSlot {
    type Err = String;

    /// Parses `PREFIX` or `PREFIX:OFFSET` as given on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("rotation slot prefix may not be empty".to_string());
        }
        match s.rsplit_once(':') {
            Some((prefix, offset)) => {
                if prefix.is_empty() {
                    return Err("rotation slot prefix may not be empty".to_string());
                }
                let id_offset = offset
                    .parse::<i64>()
                    .map_err(|_e| format!("invalid rotation slot offset: {offset}"))?;
                Ok(RotationSlot {
                    prefix: prefix.to_string(),
                    id_offset,
                })
            }
            None => Ok(RotationSlot {
                prefix: s.to_string(),
                id_offset: 0,
            }),
        }
    }
}

/// Full layout configuration for one spritesheet run.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Number of frames rendered into the sheet
    pub frames: u32,
    /// Frames counted in the source numbering, including skipped ones
    pub frames_with_padding: u32,
    /// Grid width in tiles
    pub sprites_x: u32,
    /// Grid height in tiles
    pub sprites_y: u32,
    /// Tile width in pixels
    pub sprite_w: u32,
    /// Tile height in pixels
    pub sprite_h: u32,
    /// The four rotation slots, indexed by rotation 0-3
    pub rotations: [RotationSlot; 4],
    pub algorithm: IndexingAlgorithm,
}

impl SheetConfig {
    /// Width of the output canvas in pixels
    pub fn canvas_width(&self) -> u32 {
        self.frames * self.sprite_w * self.sprites_x
    }

    /// Height of the output canvas in pixels (four stacked rotation bands)
    pub fn canvas_height(&self) -> u32 {
        self.sprite_h * self.sprites_y * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_slot_parsing() {
        let slot: RotationSlot = "cars_se:128".parse().unwrap();
        assert_eq!(slot.prefix, "cars_se");
        assert_eq!(slot.id_offset, 128);

        let slot: RotationSlot = "cars_se".parse().unwrap();
        assert_eq!(slot.prefix, "cars_se");
        assert_eq!(slot.id_offset, 0);
    }

    #[test]
    fn test_rotation_slot_parse_errors() {
        assert!("".parse::<RotationSlot>().is_err());
        assert!(":12".parse::<RotationSlot>().is_err());
        assert!("cars_se:twelve".parse::<RotationSlot>().is_err());
    }

    #[test]
    fn test_canvas_dimensions() {
        let config = SheetConfig {
            frames: 3,
            frames_with_padding: 3,
            sprites_x: 2,
            sprites_y: 4,
            sprite_w: 64,
            sprite_h: 64,
            rotations: std::array::from_fn(|_| RotationSlot {
                prefix: "p".to_string(),
                id_offset: 0,
            }),
            algorithm: IndexingAlgorithm::Tima,
        };
        assert_eq!(config.canvas_width(), 3 * 64 * 2);
        assert_eq!(config.canvas_height(), 64 * 4 * 4);
    }
}
