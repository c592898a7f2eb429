use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Mapping from output-grid coordinates to the rendering tool's scan order.
///
/// Source frames are numbered in the external renderer's raster scan order
/// while the atlas is laid out in isometric display order; the tile index
/// computed here is the exact inverse mapping between the two. An off-by-one
/// here shifts whole tiles to the wrong position, so the arithmetic must not
/// be "simplified".
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingAlgorithm {
    /// Isometric scan order used by timed animation (TIMA) renders
    #[default]
    #[value(name = "tima")]
    Tima,
    /// Plain row-major scan order
    #[value(name = "plain")]
    Plain,
}

impl IndexingAlgorithm {
    /// Tile index of the sprite at grid cell (x, y) for the given rotation.
    ///
    /// Within one rotation band and a fixed frame this is a bijection over
    /// `0..sprites_x * sprites_y`; the algorithm changes the bijection but
    /// not its range.
    pub fn tile_index(self, sprites_x: u32, sprites_y: u32, rotation: usize, x: u32, y: u32) -> u32 {
        match self {
            IndexingAlgorithm::Tima => match rotation {
                0 | 1 => x * sprites_y + sprites_y - y - 1,
                _ => y + sprites_y * (sprites_x - x - 1),
            },
            IndexingAlgorithm::Plain => y * sprites_x + x,
        }
    }
}

/// Numeric id of the source image holding one (frame, tile) cell.
///
/// Padding frames are counted in the source numbering but not rendered,
/// which is why the stride is `frames_with_padding` rather than the
/// rendered frame count.
pub fn image_id(
    prefix: &str,
    id_offset: i64,
    frame: u32,
    frames_with_padding: u32,
    tile_index: u32,
) -> Result<i64, SheetError> {
    let id = id_offset + i64::from(frame) + i64::from(frames_with_padding) * i64::from(tile_index);
    if id < 0 {
        return Err(SheetError::InvalidIndex {
            prefix: prefix.to_string(),
            frame,
            tile_index,
            image_id: id,
        });
    }
    Ok(id)
}

/// File name of the source image for one cell: the rotation's prefix
/// followed by the zero-padded image id. Ids wider than four digits keep
/// all their digits.
pub fn source_filename(
    prefix: &str,
    id_offset: i64,
    frame: u32,
    frames_with_padding: u32,
    tile_index: u32,
) -> Result<String, SheetError> {
    let id = image_id(prefix, id_offset, frame, frames_with_padding, tile_index)?;
    Ok(format!("{prefix}{id:04}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_tima_2x2_unrotated() {
        let alg = IndexingAlgorithm::Tima;
        assert_eq!(alg.tile_index(2, 2, 0, 0, 0), 1);
        assert_eq!(alg.tile_index(2, 2, 0, 0, 1), 0);
        assert_eq!(alg.tile_index(2, 2, 0, 1, 0), 3);
        assert_eq!(alg.tile_index(2, 2, 0, 1, 1), 2);
    }

    #[test]
    fn test_tima_rotation_pairs_share_mapping() {
        let alg = IndexingAlgorithm::Tima;
        for x in 0..3 {
            for y in 0..4 {
                assert_eq!(alg.tile_index(3, 4, 0, x, y), alg.tile_index(3, 4, 1, x, y));
                assert_eq!(alg.tile_index(3, 4, 2, x, y), alg.tile_index(3, 4, 3, x, y));
            }
        }
    }

    #[test]
    fn test_tima_column_covers_band() {
        // For a fixed column x under rotation 0, the indices over y are
        // exactly x*sprites_y .. x*sprites_y + sprites_y - 1.
        let alg = IndexingAlgorithm::Tima;
        let (sx, sy) = (3, 5);
        for x in 0..sx {
            let got: BTreeSet<u32> = (0..sy).map(|y| alg.tile_index(sx, sy, 0, x, y)).collect();
            let want: BTreeSet<u32> = (x * sy..(x + 1) * sy).collect();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_tima_bijection_rotated() {
        let alg = IndexingAlgorithm::Tima;
        let (sx, sy) = (4, 3);
        let got: BTreeSet<u32> = (0..sx)
            .flat_map(|x| (0..sy).map(move |y| (x, y)))
            .map(|(x, y)| alg.tile_index(sx, sy, 2, x, y))
            .collect();
        assert_eq!(got.len() as u32, sx * sy);
        assert_eq!(got.iter().copied().max(), Some(sx * sy - 1));
    }

    #[test]
    fn test_plain_row_major() {
        let alg = IndexingAlgorithm::Plain;
        assert_eq!(alg.tile_index(3, 2, 0, 2, 1), 5);
        // Rotation does not affect the plain mapping
        assert_eq!(alg.tile_index(3, 2, 3, 2, 1), 5);
    }

    #[test]
    fn test_plain_bijection() {
        let alg = IndexingAlgorithm::Plain;
        let (sx, sy) = (5, 4);
        let got: BTreeSet<u32> = (0..sx)
            .flat_map(|x| (0..sy).map(move |y| (x, y)))
            .map(|(x, y)| alg.tile_index(sx, sy, 1, x, y))
            .collect();
        assert_eq!(got.len() as u32, sx * sy);
        assert_eq!(got.iter().copied().max(), Some(sx * sy - 1));
    }

    #[test]
    fn test_image_id_and_filename() {
        assert_eq!(image_id("cars_se", 100, 2, 5, 3).unwrap(), 117);
        assert_eq!(
            source_filename("cars_se", 100, 2, 5, 3).unwrap(),
            "cars_se0117.png"
        );
    }

    #[test]
    fn test_filename_keeps_wide_ids() {
        assert_eq!(
            source_filename("p", 10000, 0, 1, 0).unwrap(),
            "p10000.png"
        );
    }

    #[test]
    fn test_negative_image_id_is_rejected() {
        let err = image_id("p", -10, 2, 5, 0).unwrap_err();
        match err {
            SheetError::InvalidIndex { image_id, .. } => assert_eq!(image_id, -8),
            other => panic!("unexpected error: {other}"),
        }
    }
}
