//! Project manifest lookup and input file discovery.
//!
//! The manifest is found by walking up from a starting directory until a
//! `pxtile.yaml` is seen. Directory inputs are expanded to the PNG files
//! they contain.
//!
//! # Example
//!
//! ```ignore
//! use pxtile::discovery::discover;
//!
//! let project = discover(".")?;
//! let matrix = project.manifest.matrix()?;
//! ```

mod manifest;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

pub use manifest::Manifest;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "pxtile.yaml";

/// The manifest in effect for a working directory.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory holding the manifest, or the start directory without one.
    pub root: PathBuf,

    /// The loaded manifest (default if no pxtile.yaml was found).
    pub manifest: Manifest,

    /// Path of the manifest that was loaded.
    pub manifest_path: Option<PathBuf>,
}

/// Find the nearest `pxtile.yaml` at or above `start`.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// Load the manifest that applies to `start`.
///
/// Falls back to defaults when no manifest exists anywhere above `start`.
pub fn discover(start: impl AsRef<Path>) -> Result<Project> {
    let start = start.as_ref();
    match find_manifest(start) {
        Some(path) => {
            let manifest = Manifest::load(&path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start.to_path_buf());
            Ok(Project {
                root,
                manifest,
                manifest_path: Some(path),
            })
        }
        None => Ok(Project {
            root: start.to_path_buf(),
            manifest: Manifest::default(),
            manifest_path: None,
        }),
    }
}

/// Expand an input path into PNG files, sorted by path.
///
/// A file is returned as-is; a directory is searched recursively.
pub fn collect_pngs(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_png(p))
        .collect();
    files.sort();
    files
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
