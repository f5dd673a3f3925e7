//! Error types for Tilegrid operations.
//!
//! This module provides the main error type [`TilegridError`] which wraps
//! the error conditions that can occur while loading scenes, replaying
//! workspace actions and exporting the result.

use std::{io, ops::Range};

use thiserror::Error;

use crate::workspace::BoxId;

/// The main error type for Tilegrid operations.
///
/// # Diagnostic Variants
///
/// The `Scene` variant keeps the scene source and, when known, the byte span
/// of the offending TOML. This is what allows the CLI to print a labelled
/// snippet.
#[derive(Debug, Error)]
pub enum TilegridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    Scene {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Unknown box: {0}")]
    UnknownBox(BoxId),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TilegridError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TilegridError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Scene {
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}
