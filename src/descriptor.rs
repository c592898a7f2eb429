use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::error::SheetError;
use crate::sheet::{ROTATION_NAMES, SheetConfig};

/// Emits the layout descriptor consumed by the downstream data compiler.
///
/// The descriptor tells the compiler how to slice the finished sheet back
/// into per-frame, per-rotation sprites: one `frame_N` group per rendered
/// frame, each holding four fixed-shape `sheet` blocks keyed by rotation
/// slot. Numeric fields are left as arithmetic expressions over the
/// configuration values; the consumer folds constants itself, and the
/// unfolded form keeps the emitted file reviewable.
///
/// The vertical step sign is a fixed contract with the consumer: the two
/// rotations whose scan order runs bottom-up in the sheet (slots 0 and 1)
/// are cut with a negative row step starting from the bottom row of their
/// band, the other two with a positive step from the top.
pub fn emit(config: &SheetConfig, atlas_file: &str) -> String {
    let (w, h) = (config.sprite_w, config.sprite_h);
    let (sx, sy) = (config.sprites_x, config.sprites_y);
    let recolour = mask_filename(atlas_file);

    let mut out = String::new();
    for frame in 0..config.frames {
        out.push_str(&format!("frame_{frame} {{\n"));
        for (rotation, name) in ROTATION_NAMES.iter().enumerate() {
            let y_band = format!("{rotation} * {h} * {sy}");
            let (y_base, y_step) = if rotation < 2 {
                (format!("{y_band} + ({sy} - 1) * {h}"), format!("-{h}"))
            } else {
                (y_band, format!("{h}"))
            };

            out.push_str(&format!(
                "\t{name}: sheet {{\n\
                 \t\tfile: \"{atlas_file}\";\n\
                 \t\trecolour: \"{recolour}\";\n\
                 \t\tx_base: {frame} * {w} * {sx};\n\
                 \t\ty_base: {y_base};\n\
                 \t\tx_step: {w};\n\
                 \t\ty_step: {y_step};\n\
                 \t\tx_offset: -{w} / 2;\n\
                 \t\ty_offset: {h} / 2 - {h};\n\
                 \t\twidth: {w};\n\
                 \t\theight: {h};\n\
                 \t}}\n"
            ));
        }
        out.push_str("}\n");
    }
    out
}

/// Write the descriptor for `atlas_path` to `descriptor_path`.
pub fn write_descriptor(
    config: &SheetConfig,
    atlas_path: &Path,
    descriptor_path: &Path,
) -> Result<()> {
    let content = emit(config, &atlas_path.to_string_lossy());
    fs::write(descriptor_path, content).map_err(|e| SheetError::OutputWrite {
        path: descriptor_path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Companion recolour-mask file of an atlas: `_masked` inserted before
/// the extension, following the sprite masking scripts' naming.
pub fn mask_filename(atlas_file: &str) -> String {
    match atlas_file.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_masked.{ext}"),
        None => format!("{atlas_file}_masked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexingAlgorithm;
    use crate::sheet::RotationSlot;

    fn test_config(frames: u32) -> SheetConfig {
        SheetConfig {
            frames,
            frames_with_padding: frames,
            sprites_x: 2,
            sprites_y: 3,
            sprite_w: 64,
            sprite_h: 64,
            rotations: std::array::from_fn(|_| RotationSlot {
                prefix: "p".to_string(),
                id_offset: 0,
            }),
            algorithm: IndexingAlgorithm::Tima,
        }
    }

    #[test]
    fn test_mask_filename() {
        assert_eq!(mask_filename("ride.png"), "ride_masked.png");
        assert_eq!(mask_filename("out/ride.png"), "out/ride_masked.png");
        assert_eq!(mask_filename("ride"), "ride_masked");
    }

    #[test]
    fn test_four_blocks_per_frame() {
        let text = emit(&test_config(2), "ride.png");
        assert_eq!(text.matches("frame_0 {").count(), 1);
        assert_eq!(text.matches("frame_1 {").count(), 1);
        assert_eq!(text.matches(": sheet {").count(), 8);
        for name in ["se", "ne", "nw", "sw"] {
            assert_eq!(text.matches(&format!("\t{name}: sheet {{")).count(), 2);
        }
    }

    #[test]
    fn test_step_signs_per_rotation_pair() {
        let text = emit(&test_config(1), "ride.png");
        // Slots se and ne run bottom-up, nw and sw top-down
        assert_eq!(text.matches("y_step: -64;").count(), 2);
        assert_eq!(text.matches("y_step: 64;").count(), 2);
        assert!(text.contains("y_base: 0 * 64 * 3 + (3 - 1) * 64;"));
        assert!(text.contains("y_base: 1 * 64 * 3 + (3 - 1) * 64;"));
        assert!(text.contains("y_base: 2 * 64 * 3;"));
        assert!(text.contains("y_base: 3 * 64 * 3;"));
    }

    #[test]
    fn test_expressions_are_unfolded() {
        let text = emit(&test_config(3), "ride.png");
        assert!(text.contains("x_base: 2 * 64 * 2;"));
        assert!(text.contains("x_offset: -64 / 2;"));
        assert!(text.contains("y_offset: 64 / 2 - 64;"));
        assert!(text.contains("x_step: 64;"));
        assert!(text.contains("width: 64;"));
        assert!(text.contains("height: 64;"));
    }

    #[test]
    fn test_file_references() {
        let text = emit(&test_config(1), "sheets/ride.png");
        assert!(text.contains("file: \"sheets/ride.png\";"));
        assert!(text.contains("recolour: \"sheets/ride_masked.png\";"));
    }
}
