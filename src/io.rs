//! PNG and JSON persistence for tiles, palettes and reports.

use std::fs;
use std::path::Path;

use image::{ImageBuffer, RgbaImage};
use serde::Serialize;

use crate::error::{PxTileError, Result};
use crate::types::{Palette, PixelBuffer};

/// Convert a buffer into an `image` RGBA image.
pub fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage> {
    let (w, h) = buffer.size();
    ImageBuffer::from_raw(w as u32, h as u32, buffer.to_rgba_bytes()).ok_or_else(|| {
        PxTileError::config(format!("{}x{} buffer does not fit an RGBA image", w, h))
    })
}

/// Convert an `image` RGBA image into a buffer.
pub fn from_rgba_image(img: &RgbaImage) -> Result<PixelBuffer> {
    PixelBuffer::from_rgba_bytes(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Load any image the `image` crate can decode as an RGBA buffer.
pub fn load_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| PxTileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?
        .to_rgba8();
    from_rgba_image(&img)
}

/// Write a buffer as PNG, creating parent directories as needed.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    to_rgba_image(buffer)?.save(path).map_err(|e| PxTileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PxTileError::Parse {
        message: format!("Failed to serialize {}: {}", path.display(), e),
        help: None,
    })?;
    write_text(&json, path)
}

/// Read a palette JSON file.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let content = fs::read_to_string(path).map_err(|e| PxTileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read palette: {}", e),
    })?;
    Palette::from_json(&content)
}

/// Write a palette JSON file.
pub fn save_palette(palette: &Palette, path: &Path) -> Result<()> {
    write_text(&palette.to_json()?, path)
}

fn write_text(content: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| PxTileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| PxTileError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create directory: {}", e),
            })
        }
        _ => Ok(()),
    }
}
