use std::path::Path;

use anyhow::Result;
use image::{ImageReader, RgbaImage, imageops};
use log::{debug, info};

use super::SheetConfig;
use crate::error::SheetError;
use crate::index;

/// Fills the output canvas cell by cell from the per-rotation renders.
///
/// The canvas is the only mutable state of a run. Every source image is
/// opened, validated, copied from and dropped within its own cell; nothing
/// is retained across cells, and the canvas is handed out only once every
/// cell has been written.
pub struct SheetComposer<'a> {
    config: &'a SheetConfig,
}

impl<'a> SheetComposer<'a> {
    pub fn new(config: &'a SheetConfig) -> Self {
        Self { config }
    }

    /// Compose the full atlas from the images in `src_dir`.
    ///
    /// Fails atomically: any missing file, decode failure or tile size
    /// mismatch aborts before a canvas is returned, so no output is ever
    /// derived from a partially filled sheet.
    pub fn compose(&self, src_dir: &Path) -> Result<RgbaImage> {
        let cfg = self.config;
        let mut canvas = RgbaImage::new(cfg.canvas_width(), cfg.canvas_height());

        for frame in 0..cfg.frames {
            for rotation in 0u32..4 {
                let slot = &cfg.rotations[rotation as usize];
                for x in 0..cfg.sprites_x {
                    for y in 0..cfg.sprites_y {
                        let tile_index = cfg.algorithm.tile_index(
                            cfg.sprites_x,
                            cfg.sprites_y,
                            rotation as usize,
                            x,
                            y,
                        );
                        let filename = index::source_filename(
                            &slot.prefix,
                            slot.id_offset,
                            frame,
                            cfg.frames_with_padding,
                            tile_index,
                        )?;
                        let tile = self.load_tile(&src_dir.join(filename))?;

                        let xpos = frame * cfg.sprite_w * cfg.sprites_x + x * cfg.sprite_w;
                        let ypos = rotation * cfg.sprite_h * cfg.sprites_y + y * cfg.sprite_h;
                        // Straight copy of all channels, alpha included
                        imageops::replace(&mut canvas, &tile, i64::from(xpos), i64::from(ypos));
                    }
                }
            }
        }

        info!(
            "Composed {} cells into a {}x{} sheet",
            cfg.frames * 4 * cfg.sprites_x * cfg.sprites_y,
            canvas.width(),
            canvas.height()
        );

        Ok(canvas)
    }

    /// Load one source image and verify it matches the configured tile size.
    fn load_tile(&self, path: &Path) -> Result<RgbaImage> {
        debug!("Loading {}", path.display());

        if !path.is_file() {
            return Err(SheetError::SourceNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let tile = ImageReader::open(path)
            .map_err(|e| SheetError::ImageLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })?
            .decode()
            .map_err(|e| SheetError::ImageLoad {
                path: path.to_path_buf(),
                source: e,
            })?
            .into_rgba8();

        let (actual_w, actual_h) = tile.dimensions();
        if actual_w != self.config.sprite_w || actual_h != self.config.sprite_h {
            return Err(SheetError::DimensionMismatch {
                path: path.to_path_buf(),
                expected_w: self.config.sprite_w,
                expected_h: self.config.sprite_h,
                actual_w,
                actual_h,
            }
            .into());
        }

        Ok(tile)
    }
}
