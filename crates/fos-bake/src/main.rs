//! fOS Bake - Command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fos_bake::{
    bake, AtlasWriter, BakeConfig, PngEncoder, DEFAULT_ATLAS_SIZE, DEFAULT_FONT_SIZE,
    DEFAULT_OUTPUT_DIR,
};
use fos_text::FontFace;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fos-bake",
    version,
    about = "Bake a font into a glyph atlas and binary glyph index"
)]
struct Args {
    /// Input font file (.ttf/.otf)
    #[arg(value_name = "FONT")]
    font: PathBuf,

    /// Font size in pixels
    #[arg(short, long, default_value_t = DEFAULT_FONT_SIZE)]
    size: f64,

    /// Atlas side length in pixels
    #[arg(short, long, default_value_t = DEFAULT_ATLAS_SIZE)]
    atlas_size: u32,

    /// Directory the .png/.bin pair is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,

    /// Log every glyph placement
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = BakeConfig::new(args.size, args.atlas_size);
    config.validate()?;

    let writer = AtlasWriter::for_font(&args.output_dir, &args.font)?;
    tracing::info!(
        "Baking: {} -> {}",
        args.font.display(),
        writer.output_dir().display()
    );

    let data = std::fs::read(&args.font)
        .with_context(|| format!("failed to read {}", args.font.display()))?;
    let face = FontFace::parse(&data, args.face_index)
        .with_context(|| format!("failed to load {}", args.font.display()))?;

    let atlas = bake(&face, &face, &config)?;
    let report = atlas.report;
    if report.missing_metrics > 0 || report.too_wide > 0 {
        tracing::warn!(
            "Skipped {} glyphs without metrics and {} wider than the atlas",
            report.missing_metrics,
            report.too_wide
        );
    }

    let paths = writer
        .write(&atlas, &PngEncoder)
        .context("failed to write baked font")?;

    tracing::info!(
        "Success! Baked {} glyphs to {} and {}",
        report.baked,
        paths.image.display(),
        paths.index.display()
    );
    Ok(())
}
