//! Error type shared by the library modules

use std::path::PathBuf;

/// Result type for asset-gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for asset-gen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid asset descriptor '{filename}': {reason}")]
    InvalidDescriptor { filename: String, reason: String },

    #[error("Failed to read manifest {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {} lists no assets", path.display())]
    EmptyManifest { path: PathBuf },

    #[error("{width}x{height} is too large to encode as a solid PNG")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Stream does not start with the PNG signature")]
    BadSignature,

    #[error("Chunk truncated at byte offset {offset}")]
    Truncated { offset: usize },
}
