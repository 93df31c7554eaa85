//! Ordered colour palettes and their JSON persistence format.

use serde::{Deserialize, Serialize};

use crate::error::{PxTileError, Result};

use super::Colour;

/// An ordered list of RGB colours.
///
/// Palettes produced by extraction are unique and sorted by luminance;
/// palettes loaded from disk keep whatever order the file had.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colours: Vec<[u8; 3]>,
}

/// On-disk representation: `{"colors": [[r, g, b], ...], "count": N}`.
#[derive(Debug, Serialize, Deserialize)]
struct PaletteFile {
    colors: Vec<[u8; 3]>,
    #[serde(default)]
    count: Option<usize>,
}

impl Palette {
    /// Create a palette from RGB triples, preserving order.
    pub fn new(colours: Vec<[u8; 3]>) -> Self {
        Self { colours }
    }

    /// Build a palette from hex strings (`#RRGGBB` etc.). Alpha is dropped.
    pub fn from_hex_list<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let colours = values
            .iter()
            .map(|v| Colour::from_hex(v.as_ref()).map(Colour::to_rgb))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(colours))
    }

    /// The colours in order.
    pub fn colours(&self) -> &[[u8; 3]] {
        &self.colours
    }

    /// Get a colour by index.
    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        self.colours.get(index).copied()
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Iterate over the colours in order.
    pub fn iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.colours.iter().copied()
    }

    /// Truncate or pad this palette to `source.len()` entries.
    ///
    /// Missing entries are taken from `source` at the same index, so a short
    /// target palette leaves the remaining source colours unchanged on swap.
    pub fn fitted_to(&self, source: &Palette) -> Palette {
        let mut colours: Vec<[u8; 3]> = self.colours.iter().take(source.len()).copied().collect();
        while colours.len() < source.len() {
            colours.push(source.colours[colours.len()]);
        }
        Palette::new(colours)
    }

    /// Serialize to the palette JSON format.
    pub fn to_json(&self) -> Result<String> {
        let file = PaletteFile {
            colors: self.colours.clone(),
            count: Some(self.colours.len()),
        };
        serde_json::to_string_pretty(&file).map_err(|e| PxTileError::Parse {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })
    }

    /// Parse the palette JSON format. `count` is informational and may be absent.
    pub fn from_json(source: &str) -> Result<Self> {
        let file: PaletteFile = serde_json::from_str(source).map_err(|e| PxTileError::Parse {
            message: format!("Invalid palette JSON: {}", e),
            help: Some("Expected {\"colors\": [[r, g, b], ...], \"count\": N}".to_string()),
        })?;
        Ok(Self::new(file.colors))
    }
}

impl FromIterator<[u8; 3]> for Palette {
    fn from_iter<I: IntoIterator<Item = [u8; 3]>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
