//! Error Types
//!
//! The main error type [`ViewerError`] covers all failure modes of the viewer
//! core: asset loading/decoding, I/O and the host event loop. All public APIs
//! that can fail return [`Result<T>`], an alias for
//! `std::result::Result<T, ViewerError>`.

use thiserror::Error;

/// The main error type for the viewer core.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// Decoded asset data is structurally invalid.
    #[error("Invalid asset data: {0}")]
    InvalidData(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The asset load thread disappeared before resolving.
    #[error("Asset load task dropped its channel before resolving")]
    LoadTaskDisconnected,

    // ========================================================================
    // Host Integration Errors
    // ========================================================================
    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        ViewerError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
