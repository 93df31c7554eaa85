//! Project manifest (pxtile.yaml) parsing.
//!
//! The manifest supplies default options for every subcommand. Values given
//! on the command line always win.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dither::DitherMatrix;
use crate::error::{PxTileError, Result};
use crate::recolor::{DEFAULT_MAX_COLORS, DEFAULT_TOLERANCE};
use crate::types::Palette;
use crate::upscale::ResizeMethod;

/// Project manifest loaded from pxtile.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for generated tiles.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Bayer matrix order for dithering (2, 4 or 8).
    #[serde(default = "default_matrix_size")]
    pub matrix_size: usize,

    /// Default resize method name.
    #[serde(default = "default_method")]
    pub method: String,

    /// Manhattan RGB tolerance for palette swaps.
    #[serde(default = "default_tolerance")]
    pub tolerance: u32,

    /// Palette size for extraction.
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    /// Blend strength for palette normalization.
    #[serde(default = "default_strength")]
    pub strength: f64,

    /// Named variant palettes as hex colour lists.
    /// Empty means the seasonal presets are used.
    #[serde(default)]
    pub presets: BTreeMap<String, Vec<String>>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

fn default_matrix_size() -> usize {
    4
}

fn default_method() -> String {
    "nearest".to_string()
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE
}

fn default_max_colors() -> usize {
    DEFAULT_MAX_COLORS
}

fn default_strength() -> f64 {
    0.5
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            matrix_size: default_matrix_size(),
            method: default_method(),
            tolerance: default_tolerance(),
            max_colors: default_max_colors(),
            strength: default_strength(),
            presets: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Load manifest from a pxtile.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PxTileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PxTileError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pxtile.yaml syntax".to_string()),
        })
    }

    /// The configured dither matrix.
    pub fn matrix(&self) -> Result<DitherMatrix> {
        DitherMatrix::new(self.matrix_size)
    }

    /// The configured resize method.
    pub fn resize_method(&self) -> Result<ResizeMethod> {
        self.method.parse()
    }

    /// Parsed variant presets, or `None` to use the seasonal defaults.
    pub fn variant_presets(&self) -> Result<Option<Vec<(String, Palette)>>> {
        if self.presets.is_empty() {
            return Ok(None);
        }
        self.presets
            .iter()
            .map(|(name, colours)| Ok((name.clone(), Palette::from_hex_list(colours)?)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let yaml = "output: build";
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert_eq!(manifest.matrix_size, 4);
        assert_eq!(manifest.tolerance, 24);
        assert!(manifest.presets.is_empty());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
output: tiles/out
matrix_size: 8
method: scale2x
tolerance: 12
max_colors: 8
strength: 0.75
presets:
  lava:
    - "#ff4400"
    - "#aa2200"
"##;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.matrix().unwrap(), DitherMatrix::Bayer8);
        assert_eq!(manifest.resize_method().unwrap(), ResizeMethod::Scale2x);
        assert_eq!(manifest.max_colors, 8);
        assert_eq!(manifest.strength, 0.75);

        let presets = manifest.variant_presets().unwrap().unwrap();
        assert_eq!(presets[0].0, "lava");
        assert_eq!(presets[0].1.colours(), &[[255, 68, 0], [170, 34, 0]]);
    }

    #[test]
    fn test_default_manifest() {
        let manifest = Manifest::default();
        assert_eq!(manifest.output, PathBuf::from("dist"));
        assert_eq!(manifest.resize_method().unwrap(), ResizeMethod::Nearest);
        assert!(manifest.variant_presets().unwrap().is_none());
    }

    #[test]
    fn test_invalid_values() {
        let manifest = Manifest::parse("matrix_size: 3\nmethod: bilinear").unwrap();
        assert!(manifest.matrix().is_err());
        assert!(manifest.resize_method().is_err());
        assert!(Manifest::parse("tolerance: [1, 2]").is_err());
    }

    #[test]
    fn test_invalid_preset_colour() {
        let manifest = Manifest::parse("presets:\n  bad: [\"#zzz\"]").unwrap();
        assert!(manifest.variant_presets().is_err());
    }
}
