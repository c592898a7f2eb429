use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use quadsheet::cli::{CliArgs, CompressionLevel};
use quadsheet::config::{CompressConfig, LoadedConfig};
use quadsheet::descriptor::write_descriptor;
use quadsheet::error::SheetError;
use quadsheet::index::IndexingAlgorithm;
use quadsheet::output::save_sheet_image;
use quadsheet::sheet::{ROTATION_NAMES, RotationSlot, SheetComposer, SheetConfig};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(&cli)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Quadsheet spritesheet generator v{}", env!("CARGO_PKG_VERSION"));

    // Compose the whole sheet in memory before any output byte is written
    let composer = SheetComposer::new(&merged.sheet);
    let canvas = composer.compose(&merged.source)?;

    save_sheet_image(&canvas, &merged.output, merged.compress)?;
    info!("Saved {}", merged.output.display());

    if let Some(descriptor_path) = &merged.descriptor {
        write_descriptor(&merged.sheet, &merged.output, descriptor_path)?;
        info!("Generated {}", descriptor_path.display());
    }

    info!("Done!");

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    source: PathBuf,
    output: PathBuf,
    descriptor: Option<PathBuf>,
    sheet: SheetConfig,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CliArgs) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Source directory: CLI > config
    let source = args
        .source
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(LoadedConfig::resolve_source))
        .ok_or(SheetError::MissingConfig { field: "source" })?;

    // Output path: CLI > config
    let output = args
        .output
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(LoadedConfig::resolve_output))
        .ok_or(SheetError::MissingConfig { field: "output" })?;

    // Descriptor path is optional: CLI > config
    let descriptor = args.descriptor.clone().or_else(|| {
        loaded_config
            .as_ref()
            .and_then(LoadedConfig::resolve_descriptor)
    });

    // The four rotation slots, each required: CLI > config
    let cli_slots = [
        args.se.clone(),
        args.ne.clone(),
        args.nw.clone(),
        args.sw.clone(),
    ];
    let config_slots = loaded_config.as_ref().map_or([None, None, None, None], |lc| {
        [
            lc.config.se.clone(),
            lc.config.ne.clone(),
            lc.config.nw.clone(),
            lc.config.sw.clone(),
        ]
    });
    let mut rotations: Vec<RotationSlot> = Vec::with_capacity(4);
    for (i, name) in ROTATION_NAMES.into_iter().enumerate() {
        let slot = cli_slots[i]
            .clone()
            .or_else(|| config_slots[i].clone())
            .ok_or(SheetError::MissingConfig { field: name })?;
        rotations.push(slot);
    }
    // Exactly four slots were collected above
    #[expect(clippy::expect_used, reason = "rotations holds exactly four slots")]
    let rotations: [RotationSlot; 4] = rotations
        .try_into()
        .expect("one slot per rotation name");

    let frames = required_number(
        args.frames,
        config_number(&loaded_config, |c| c.frames),
        "frames",
    )?;
    let sprites_x = required_number(
        args.grid_x,
        config_number(&loaded_config, |c| c.grid_x),
        "grid-x",
    )?;
    let sprites_y = required_number(
        args.grid_y,
        config_number(&loaded_config, |c| c.grid_y),
        "grid-y",
    )?;
    let sprite_w = required_number(
        args.tile_width,
        config_number(&loaded_config, |c| c.tile_width),
        "tile-width",
    )?;
    let sprite_h = required_number(
        args.tile_height,
        config_number(&loaded_config, |c| c.tile_height),
        "tile-height",
    )?;

    // Padding frames default to the rendered frame count
    let frames_with_padding = args
        .padded_frames
        .or_else(|| config_number(&loaded_config, |c| c.padded_frames))
        .unwrap_or(frames);
    if frames_with_padding == 0 {
        return Err(SheetError::InvalidConfig {
            field: "padded-frames",
            value: "0".to_string(),
        }
        .into());
    }

    // Algorithm: CLI > config > default
    let algorithm = if let Some(a) = args.algorithm {
        a
    } else if let Some(name) = loaded_config.as_ref().and_then(|lc| lc.config.algorithm.clone()) {
        parse_algorithm(&name).ok_or(SheetError::InvalidConfig {
            field: "algorithm",
            value: name,
        })?
    } else {
        IndexingAlgorithm::default()
    };

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.config.compress.as_ref().map(|c| match c {
            CompressConfig::Level(n) => CompressionLevel::Level(*n),
            CompressConfig::Max(_) => CompressionLevel::Max,
        })
    } else {
        None
    };

    Ok(MergedConfig {
        source,
        output,
        descriptor,
        sheet: SheetConfig {
            frames,
            frames_with_padding,
            sprites_x,
            sprites_y,
            sprite_w,
            sprite_h,
            rotations,
            algorithm,
        },
        compress,
        verbose: args.verbose,
    })
}

fn config_number(
    loaded: &Option<LoadedConfig>,
    get: impl Fn(&quadsheet::config::QuadsheetConfig) -> Option<u32>,
) -> Option<u32> {
    loaded.as_ref().and_then(|lc| get(&lc.config))
}

/// Resolve a required numeric setting; zero is as fatal as absence since
/// every one of them sizes the canvas or the iteration space.
fn required_number(
    cli: Option<u32>,
    config: Option<u32>,
    field: &'static str,
) -> Result<u32> {
    let value = cli
        .or(config)
        .ok_or(SheetError::MissingConfig { field })?;
    if value == 0 {
        return Err(SheetError::InvalidConfig {
            field,
            value: "0".to_string(),
        }
        .into());
    }
    Ok(value)
}

fn parse_algorithm(s: &str) -> Option<IndexingAlgorithm> {
    match s {
        "tima" => Some(IndexingAlgorithm::Tima),
        "plain" => Some(IndexingAlgorithm::Plain),
        _ => None,
    }
}
