//! Error types for Brickwork operations.
//!
//! This module provides the main error type [`BrickworkError`]. Only
//! configuration problems are fatal to a grid; transient unreadiness and
//! degenerate geometry are handled without surfacing an error.

use std::io;

use thiserror::Error;

use brickwork_core::scene::SceneError;

/// The main error type for Brickwork operations.
#[derive(Debug, Error)]
pub enum BrickworkError {
    /// A required grid option is missing or malformed. Raised at construction;
    /// the grid is not usable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Export error: {0}")]
    Export(String),
}

impl BrickworkError {
    /// Create a new `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
