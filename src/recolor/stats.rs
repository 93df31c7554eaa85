//! Whole-image palette statistics and cross-tileset compatibility scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{luminance, quantize_rgb, Colour, PixelBuffer};

use super::MIN_ALPHA;

/// Number of 30-degree hue bins.
const HUE_BINS: usize = 12;

/// Only every n-th opaque pixel feeds the hue histogram.
const HUE_SAMPLE_STEP: usize = 10;

/// Score at or above which two palettes are considered compatible.
const COMPATIBLE_SCORE: f64 = 60.0;

/// A quantized colour and how many opaque pixels map to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourCount {
    pub rgb: [u8; 3],
    pub count: usize,
}

/// Colour statistics of a tilemap, as consumed by [`compare_palettes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteStats {
    pub total_opaque_pixels: usize,
    pub unique_colors: usize,
    pub luminance_mean: f64,
    pub luminance_std: f64,
    pub luminance_min: f64,
    pub luminance_max: f64,
    /// Normalized share of saturated pixels per 30-degree hue bin.
    pub hue_distribution: [f64; HUE_BINS],
    /// Most frequent quantized colours, most common first.
    pub colors: Vec<ColourCount>,
}

impl PaletteStats {
    /// Gather statistics over every pixel with alpha >= 50.
    ///
    /// Returns `None` when the buffer has no such pixels.
    pub fn from_buffer(buffer: &PixelBuffer, max_colors: usize) -> Option<Self> {
        let opaque: Vec<[u8; 3]> = buffer
            .pixels()
            .iter()
            .filter(|p| p.a >= MIN_ALPHA)
            .map(|p| p.to_rgb())
            .collect();
        if opaque.is_empty() {
            return None;
        }

        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();
        for &rgb in &opaque {
            *counts.entry(quantize_rgb(rgb)).or_insert(0) += 1;
        }
        let unique_colors = counts.len();
        let mut colors: Vec<ColourCount> = counts
            .into_iter()
            .map(|(rgb, count)| ColourCount { rgb, count })
            .collect();
        colors.sort_by(|a, b| b.count.cmp(&a.count).then(a.rgb.cmp(&b.rgb)));
        colors.truncate(max_colors);

        let lums: Vec<f64> = opaque.iter().map(|&rgb| luminance(rgb)).collect();
        let n = lums.len() as f64;
        let mean = lums.iter().sum::<f64>() / n;
        let variance = lums.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
        let min = lums.iter().copied().fold(f64::INFINITY, f64::min);
        let max = lums.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            total_opaque_pixels: opaque.len(),
            unique_colors,
            luminance_mean: mean,
            luminance_std: variance.sqrt(),
            luminance_min: min,
            luminance_max: max,
            hue_distribution: hue_histogram(&opaque),
            colors,
        })
    }

    /// Spread between the darkest and brightest pixel.
    pub fn contrast_range(&self) -> f64 {
        self.luminance_max - self.luminance_min
    }
}

fn hue_histogram(opaque: &[[u8; 3]]) -> [f64; HUE_BINS] {
    let mut bins = [0.0; HUE_BINS];
    for &[r, g, b] in opaque.iter().step_by(HUE_SAMPLE_STEP) {
        let (hue, s, v) = Colour::rgb(r, g, b).to_hsv();
        // Achromatic pixels carry no hue.
        if s > 0.1 && v > 0.1 {
            let bin = (hue / 360.0 * HUE_BINS as f64) as usize % HUE_BINS;
            bins[bin] += 1.0;
        }
    }
    let total: f64 = bins.iter().sum();
    if total > 0.0 {
        for bin in &mut bins {
            *bin /= total;
        }
    }
    bins
}

fn cosine_similarity(a: &[f64; HUE_BINS], b: &[f64; HUE_BINS]) -> f64 {
    let norm = |v: &[f64; HUE_BINS]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let (na, nb) = (norm(a), norm(b));
    match (na > 0.0, nb > 0.0) {
        (true, true) => a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>() / (na * nb),
        (false, false) => 1.0,
        _ => 0.0,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Metric deltas behind a [`PaletteComparisonReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetails {
    pub luminance_diff: f64,
    pub luminance_std_diff: f64,
    pub contrast_range_diff: f64,
    pub hue_similarity: f64,
    pub color_count_ratio: f64,
    pub color_count_a: usize,
    pub color_count_b: usize,
}

/// Compatibility verdict for two tilemaps meant to share a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteComparisonReport {
    /// 0 to 100; higher is more compatible.
    pub score: f64,
    pub compatible: bool,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ComparisonDetails>,
}

impl PaletteComparisonReport {
    /// Report for when either side has no opaque pixels to compare.
    pub fn missing() -> Self {
        Self {
            score: 0.0,
            compatible: false,
            issues: vec!["Missing palette data".to_string()],
            details: None,
        }
    }
}

/// Score how well two tilemaps' palettes sit together.
///
/// Starts at 100 and subtracts fixed penalties for luminance, contrast,
/// hue distribution and colour count mismatches.
pub fn compare_palettes(a: &PaletteStats, b: &PaletteStats) -> PaletteComparisonReport {
    let mut score = 100.0;
    let mut issues = Vec::new();

    let luminance_diff = (a.luminance_mean - b.luminance_mean).abs();
    if luminance_diff > 40.0 {
        score -= 25.0;
        issues.push(format!("Large luminance difference: {:.1}", luminance_diff));
    } else if luminance_diff > 20.0 {
        score -= 10.0;
        issues.push(format!("Moderate luminance difference: {:.1}", luminance_diff));
    }

    let contrast_range_diff = (a.contrast_range() - b.contrast_range()).abs();
    if contrast_range_diff > 60.0 {
        score -= 15.0;
        issues.push(format!("Contrast range mismatch: {:.1}", contrast_range_diff));
    }

    let hue_similarity = cosine_similarity(&a.hue_distribution, &b.hue_distribution);
    if hue_similarity < 0.5 {
        score -= 30.0;
        issues.push(format!("Very different hue distributions (sim={:.2})", hue_similarity));
    } else if hue_similarity < 0.7 {
        score -= 15.0;
        issues.push(format!("Somewhat different hue distributions (sim={:.2})", hue_similarity));
    }

    let (count_a, count_b) = (a.unique_colors, b.unique_colors);
    let color_count_ratio = if count_a.max(count_b) > 0 {
        count_a.min(count_b) as f64 / count_a.max(count_b) as f64
    } else {
        1.0
    };
    if color_count_ratio < 0.3 {
        score -= 15.0;
        issues.push(format!("Large color count difference: {} vs {}", count_a, count_b));
    }

    let score: f64 = f64::max(score, 0.0);
    PaletteComparisonReport {
        score: round_to(score, 1),
        compatible: score >= COMPATIBLE_SCORE,
        issues,
        details: Some(ComparisonDetails {
            luminance_diff: round_to(luminance_diff, 1),
            luminance_std_diff: round_to((a.luminance_std - b.luminance_std).abs(), 1),
            contrast_range_diff: round_to(contrast_range_diff, 1),
            hue_similarity: round_to(hue_similarity, 2),
            color_count_ratio: round_to(color_count_ratio, 2),
            color_count_a: count_a,
            color_count_b: count_b,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stripes(colours: &[Colour], width: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, 4, |x, _| colours[x % colours.len()]).unwrap()
    }

    fn forest() -> PixelBuffer {
        stripes(
            &[Colour::rgb(40, 96, 32), Colour::rgb(64, 136, 48), Colour::rgb(104, 72, 40)],
            30,
        )
    }

    #[test]
    fn test_stats_of_empty_buffer() {
        let clear = PixelBuffer::filled(4, 4, Colour::new(10, 10, 10, 49)).unwrap();
        assert_eq!(PaletteStats::from_buffer(&clear, 64), None);
    }

    #[test]
    fn test_stats_single_grey() {
        let grey = PixelBuffer::filled(5, 2, Colour::rgb(100, 100, 100)).unwrap();
        let stats = PaletteStats::from_buffer(&grey, 64).unwrap();
        assert_eq!(stats.total_opaque_pixels, 10);
        assert_eq!(stats.unique_colors, 1);
        assert!((stats.luminance_mean - 100.0).abs() < 1e-9);
        assert!(stats.luminance_std.abs() < 1e-9);
        assert_eq!(stats.hue_distribution, [0.0; HUE_BINS]);
        assert_eq!(stats.colors, vec![ColourCount { rgb: [96, 96, 96], count: 10 }]);
    }

    #[test]
    fn test_stats_top_colours_by_frequency() {
        let tile = stripes(&[Colour::rgb(200, 0, 0), Colour::rgb(200, 0, 0), Colour::rgb(0, 0, 200)], 6);
        let stats = PaletteStats::from_buffer(&tile, 1).unwrap();
        assert_eq!(stats.unique_colors, 2);
        assert_eq!(stats.colors, vec![ColourCount { rgb: [200, 0, 0], count: 16 }]);
    }

    #[test]
    fn test_hue_histogram_bins_red() {
        let red = PixelBuffer::filled(20, 1, Colour::rgb(220, 20, 20)).unwrap();
        let stats = PaletteStats::from_buffer(&red, 64).unwrap();
        assert_eq!(stats.hue_distribution[0], 1.0);
        assert_eq!(stats.hue_distribution.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_self_comparison_is_perfect() {
        let stats = PaletteStats::from_buffer(&forest(), 64).unwrap();
        let report = compare_palettes(&stats, &stats);
        assert_eq!(report.score, 100.0);
        assert!(report.compatible);
        assert!(report.issues.is_empty());
        let details = report.details.unwrap();
        assert_eq!(details.luminance_diff, 0.0);
        assert_eq!(details.luminance_std_diff, 0.0);
        assert_eq!(details.contrast_range_diff, 0.0);
        assert_eq!(details.color_count_ratio, 1.0);
        assert!((details.hue_similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_achromatic_self_comparison() {
        let grey = PixelBuffer::filled(4, 4, Colour::rgb(128, 128, 128)).unwrap();
        let stats = PaletteStats::from_buffer(&grey, 64).unwrap();
        assert_eq!(compare_palettes(&stats, &stats).score, 100.0);
    }

    #[test]
    fn test_mismatched_palettes_are_penalized() {
        let dark = PaletteStats::from_buffer(&forest(), 64).unwrap();
        let snow = PixelBuffer::filled(30, 4, Colour::rgb(232, 240, 248)).unwrap();
        let bright = PaletteStats::from_buffer(&snow, 64).unwrap();
        let report = compare_palettes(&dark, &bright);
        assert!(report.score < 60.0);
        assert!(!report.compatible);
        assert!(report.issues.iter().any(|i| i.starts_with("Large luminance difference")));
    }

    #[test]
    fn test_report_values_are_rounded() {
        let forest = PaletteStats::from_buffer(&forest(), 64).unwrap();
        let dusk = stripes(&[Colour::rgb(90, 60, 120), Colour::rgb(30, 20, 50)], 30);
        let dusk = PaletteStats::from_buffer(&dusk, 64).unwrap();
        let report = compare_palettes(&forest, &dusk);
        let details = report.details.unwrap();

        let one_decimal = |v: f64| ((v * 10.0).round() / 10.0 - v).abs() < 1e-12;
        let two_decimals = |v: f64| ((v * 100.0).round() / 100.0 - v).abs() < 1e-12;
        assert!(one_decimal(report.score));
        assert!(one_decimal(details.luminance_diff));
        assert!(one_decimal(details.luminance_std_diff));
        assert!(one_decimal(details.contrast_range_diff));
        assert!(two_decimals(details.hue_similarity));
        assert!(two_decimals(details.color_count_ratio));
        assert!(details.luminance_diff > 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345_678, 1), 12.3);
        assert_eq!(round_to(0.666_666, 2), 0.67);
        assert_eq!(round_to(100.0, 1), 100.0);
    }

    #[test]
    fn test_report_json_shape() {
        let stats = PaletteStats::from_buffer(&forest(), 64).unwrap();
        let report = compare_palettes(&stats, &stats);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 100.0);
        assert_eq!(json["details"]["colorCountA"], 3);

        let missing = serde_json::to_value(PaletteComparisonReport::missing()).unwrap();
        assert!(missing.get("details").is_none());
        assert_eq!(missing["compatible"], false);
    }
}
