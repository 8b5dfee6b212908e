//! Map image loading.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use jailgame_core::layout::{MAP_HEIGHT, MAP_WIDTH};
use std::path::Path;

/// Loads the background map and scales it to the 800x600 map space.
///
/// A missing or unreadable image is fatal; there is no fallback map.
pub fn load_map(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to load map image {}", path.display()))?
        .to_rgba8();

    let (w, h) = (MAP_WIDTH as u32, MAP_HEIGHT as u32);
    if img.dimensions() == (w, h) {
        return Ok(img);
    }
    log::debug!(
        "Scaling map from {}x{} to {}x{}",
        img.width(),
        img.height(),
        w,
        h
    );
    Ok(image::imageops::resize(&img, w, h, FilterType::Triangle))
}
