//! Palette extraction, remapping and HSV recolouring.

mod stats;

use std::collections::BTreeSet;

use crate::error::{PxTileError, Result};
use crate::types::{distance_sq, luminance, manhattan, quantize_rgb, Colour, Palette, PixelBuffer};

pub use stats::{compare_palettes, ColourCount, ComparisonDetails, PaletteComparisonReport, PaletteStats};

/// Default palette size for extraction.
pub const DEFAULT_MAX_COLORS: usize = 16;

/// Pixels below this alpha are ignored by extraction, swapping and normalization.
pub const MIN_ALPHA: u8 = 50;

/// Default Manhattan RGB tolerance for [`palette_swap`].
pub const DEFAULT_TOLERANCE: u32 = 24;

/// Pixels below this alpha are left alone by [`color_shift`].
const SHIFT_MIN_ALPHA: u8 = 10;

/// Extract a luminance-sorted palette of at most `max_colors` colours.
///
/// Colours are 5-bit quantized and deduplicated before sorting. When more
/// colours remain than requested, evenly spaced entries of the sorted list
/// are kept so the result still spans dark to light. A tile with no pixel at
/// or above `min_alpha` yields an empty palette.
pub fn extract_palette(tile: &PixelBuffer, max_colors: usize, min_alpha: u8) -> Palette {
    if max_colors == 0 {
        return Palette::default();
    }

    // BTreeSet gives RGB order, which the stable sort keeps for equal luminance.
    let unique: BTreeSet<[u8; 3]> = tile
        .pixels()
        .iter()
        .filter(|p| p.a >= min_alpha)
        .map(|p| quantize_rgb(p.to_rgb()))
        .collect();
    let mut sorted: Vec<[u8; 3]> = unique.into_iter().collect();
    sorted.sort_by(|a, b| luminance(*a).total_cmp(&luminance(*b)));

    let n = sorted.len();
    if n <= max_colors {
        return Palette::new(sorted);
    }
    spread_indices(n, max_colors).into_iter().map(|i| sorted[i]).collect()
}

/// `count` indices spread evenly over `0..len`, both ends included.
///
/// Positions are computed as `i * (len - 1) / (count - 1)` in floating
/// point and truncated, with the final index pinned to `len - 1`.
fn spread_indices(len: usize, count: usize) -> Vec<usize> {
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let step = (len - 1) as f64 / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { len - 1 } else { (i as f64 * step) as usize })
                .collect()
        }
    }
}

/// Recolour `tile` by mapping `source[i]` to `target[i]`.
///
/// A pixel (alpha >= [`MIN_ALPHA`]) matches entry `i` when its original RGB is
/// within Manhattan distance `tolerance` of `source[i]`. When several
/// entries match, the highest index wins. Alpha is preserved.
pub fn palette_swap(tile: &PixelBuffer, source: &Palette, target: &Palette, tolerance: u32) -> Result<PixelBuffer> {
    if source.len() != target.len() {
        return Err(PxTileError::Configuration {
            message: format!(
                "Palette length mismatch: source has {}, target has {}",
                source.len(),
                target.len()
            ),
            help: Some("Source and target palettes need the same number of colours".to_string()),
        });
    }

    let pairs: Vec<([u8; 3], [u8; 3])> = source.iter().zip(target.iter()).collect();
    Ok(tile.map_pixels(|pixel| {
        if pixel.a < MIN_ALPHA {
            return pixel;
        }
        let rgb = pixel.to_rgb();
        pairs
            .iter()
            .rev()
            .find(|(from, _)| manhattan(rgb, *from) <= tolerance)
            .map_or(pixel, |(_, to)| pixel.with_rgb(*to))
    }))
}

/// An HSV shift applied to every palette entry to produce a variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPreset {
    pub name: &'static str,
    /// Hue rotation in degrees.
    pub hue_shift: f64,
    pub saturation_delta: f64,
    pub value_delta: f64,
}

impl VariantPreset {
    const fn new(name: &'static str, hue_shift: f64, saturation_delta: f64, value_delta: f64) -> Self {
        Self {
            name,
            hue_shift,
            saturation_delta,
            value_delta,
        }
    }

    /// Shift every colour of `palette` by this preset.
    pub fn apply(&self, palette: &Palette) -> Palette {
        palette
            .iter()
            .map(|rgb| {
                Colour::rgb(rgb[0], rgb[1], rgb[2])
                    .shift_hsv(self.hue_shift, self.saturation_delta, self.value_delta)
                    .to_rgb()
            })
            .collect()
    }
}

/// Seasonal and time-of-day presets used when no explicit palettes are given.
pub const SEASONAL_PRESETS: [VariantPreset; 6] = [
    VariantPreset::new("spring", -15.0, 0.10, 0.05),
    VariantPreset::new("summer", 5.0, 0.15, 0.0),
    VariantPreset::new("autumn", 25.0, -0.15, -0.05),
    VariantPreset::new("winter", -25.0, -0.45, 0.12),
    VariantPreset::new("night", 180.0, -0.30, -0.35),
    VariantPreset::new("desert", 35.0, 0.05, 0.10),
];

/// Palette-swapped variants of `tile`, in preset order.
///
/// The source palette is extracted with default settings. Without explicit
/// presets the [`SEASONAL_PRESETS`] shifts are used; explicit target palettes
/// are fitted to the source length first. An empty source palette yields no
/// variants.
pub fn generate_palette_variants(
    tile: &PixelBuffer,
    presets: Option<&[(String, Palette)]>,
) -> Result<Vec<(String, PixelBuffer)>> {
    let source = extract_palette(tile, DEFAULT_MAX_COLORS, MIN_ALPHA);
    if source.is_empty() {
        return Ok(Vec::new());
    }

    let targets: Vec<(String, Palette)> = match presets {
        Some(presets) => presets
            .iter()
            .map(|(name, palette)| (name.clone(), palette.fitted_to(&source)))
            .collect(),
        None => SEASONAL_PRESETS
            .iter()
            .map(|preset| (preset.name.to_string(), preset.apply(&source)))
            .collect(),
    };

    targets
        .into_iter()
        .map(|(name, target)| Ok((name, palette_swap(tile, &source, &target, DEFAULT_TOLERANCE)?)))
        .collect()
}

/// Shift hue, saturation and value of every visible pixel directly.
pub fn color_shift(tile: &PixelBuffer, hue_shift: f64, saturation_delta: f64, value_delta: f64) -> PixelBuffer {
    tile.map_pixels(|pixel| {
        if pixel.a < SHIFT_MIN_ALPHA {
            pixel
        } else {
            pixel.shift_hsv(hue_shift, saturation_delta, value_delta)
        }
    })
}

/// Pull every visible pixel toward its nearest reference colour.
///
/// `strength` 0 leaves the tile unchanged and 1 snaps fully to the
/// reference; values outside that range are clamped.
pub fn normalize_palette(tile: &PixelBuffer, reference: &Palette, strength: f64) -> PixelBuffer {
    if reference.is_empty() {
        return tile.clone();
    }
    let strength = strength.clamp(0.0, 1.0);
    let refs: Vec<[f64; 3]> = reference.iter().map(|c| c.map(f64::from)).collect();

    tile.map_pixels(|pixel| {
        if pixel.a < MIN_ALPHA {
            return pixel;
        }
        let p = pixel.to_rgb().map(f64::from);
        let mut nearest = refs[0];
        let mut best = distance_sq(p, nearest);
        for &candidate in &refs[1..] {
            let d = distance_sq(p, candidate);
            if d < best {
                best = d;
                nearest = candidate;
            }
        }
        let blend = |i: usize| (p[i] * (1.0 - strength) + nearest[i] * strength) as u8;
        pixel.with_rgb([blend(0), blend(1), blend(2)])
    })
}
