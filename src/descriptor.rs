//! Asset descriptor table and JSON manifest model
//!
//! An asset descriptor names one output file and the pixel dimensions written
//! into its header. The default table covers the assets a mobile app build
//! expects; a manifest file can replace it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default assets as (filename, width, height)
pub const DEFAULT_ASSETS: [(&str, u32, u32); 5] = [
    ("icon.png", 1024, 1024),
    ("splash.png", 2048, 2048),
    ("adaptive-icon.png", 1024, 1024),
    ("notification-icon.png", 96, 96),
    ("favicon.png", 32, 32),
];

/// Largest width or height a PNG header can carry (2^31 - 1)
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// One output file and its dimensions
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// File name written inside the output directory (e.g., "icon.png")
    pub filename: String,

    /// Width in pixels, recorded in the IHDR chunk
    pub width: u32,

    /// Height in pixels, recorded in the IHDR chunk
    pub height: u32,
}

/// Root structure of a manifest file
///
/// ```json
/// { "assets": [ { "filename": "icon.png", "width": 1024, "height": 1024 } ] }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetManifest {
    pub assets: Vec<AssetDescriptor>,
}

impl AssetDescriptor {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
        }
    }

    /// Check that the descriptor can be written as a single file
    ///
    /// Dimensions must be non-zero and at most [`MAX_DIMENSION`]. The filename
    /// must be a plain file name, so a manifest can never write outside the
    /// output directory.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidDescriptor {
            filename: self.filename.clone(),
            reason: reason.to_string(),
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid("width and height must be positive"));
        }

        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(invalid("width and height must not exceed 2^31-1"));
        }

        if self.filename.is_empty() || self.filename == "." || self.filename == ".." {
            return Err(invalid("filename must name a file"));
        }

        if self.filename.contains(['/', '\\']) {
            return Err(invalid("filename must not contain path separators"));
        }

        Ok(())
    }
}

/// The built-in descriptor table
pub fn default_assets() -> Vec<AssetDescriptor> {
    DEFAULT_ASSETS
        .iter()
        .map(|&(filename, width, height)| AssetDescriptor::new(filename, width, height))
        .collect()
}

/// Load and validate a manifest file
pub fn load_manifest(path: &Path) -> Result<Vec<AssetDescriptor>> {
    let json = std::fs::read_to_string(path).map_err(|source| Error::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: AssetManifest =
        serde_json::from_str(&json).map_err(|source| Error::ParseManifest {
            path: path.to_path_buf(),
            source,
        })?;

    if manifest.assets.is_empty() {
        return Err(Error::EmptyManifest {
            path: path.to_path_buf(),
        });
    }

    for asset in &manifest.assets {
        asset.validate()?;
    }

    log::debug!(
        "Loaded {} asset descriptors from {}",
        manifest.assets.len(),
        path.display()
    );

    Ok(manifest.assets)
}
