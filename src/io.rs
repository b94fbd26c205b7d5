//! Conversions between `image` buffers and grids, plus file output helpers.

use image::{DynamicImage, GrayImage};
use std::fs;
use std::path::Path;

use crate::error::HoughError;
use crate::grid::{Grid, IntensityGrid};

/// Errors from the file and rendering side of the tools.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Hough(#[from] HoughError),
}

/// 8-bit luma intensities as a real-valued grid.
pub fn grid_from_luma(gray: &GrayImage) -> IntensityGrid {
    let (w, h) = gray.dimensions();
    let mut grid = Grid::new(w as usize, h as usize);
    for (dst, &src) in grid.data_mut().iter_mut().zip(gray.as_raw()) {
        *dst = src as f32;
    }
    grid
}

pub fn intensity_from_image(img: &DynamicImage) -> IntensityGrid {
    grid_from_luma(&img.to_luma8())
}

/// Open any format `image` understands and convert it to luma intensities.
pub fn load_grayscale(path: &Path) -> Result<IntensityGrid, OutputError> {
    let img = image::open(path)?;
    Ok(intensity_from_image(&img))
}

/// Min-max normalisation to 0-255; a flat grid maps to all zeros.
pub fn normalize_u8<T: Copy + Into<f64>>(grid: &Grid<T>) -> Grid<u8> {
    let value = |v: T| -> f64 { v.into() };
    let (min, max) = grid
        .data()
        .iter()
        .map(|&v| value(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if grid.is_empty() || max - min < 1e-9 {
        return Grid::new(grid.width(), grid.height());
    }
    let scale = 255.0 / (max - min);
    grid.map(|&v| ((value(v) - min) * scale) as u8)
}

pub fn write_text_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Creates the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
