use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{ImageFormat, RgbaImage};

use crate::cli::CompressionLevel;
use crate::error::SheetError;

/// Save the composed sheet as PNG, optionally with compression.
///
/// The image is encoded in memory first so nothing is written to `path`
/// unless the whole encode (and optional optimization) succeeded.
pub fn save_sheet_image(
    sheet: &RgbaImage,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let mut png_data = Cursor::new(Vec::new());
    sheet
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SheetError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    fs::write(path, output_data).map_err(|e| SheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
