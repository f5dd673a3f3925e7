//! Export of a laid-out workspace.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a [`Workspace`] into an output document. It is the final stage in
//! the Tilegrid pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene file
//!     ↓ parse
//! Scene (boxes + actions)
//!     ↓ replay
//! Workspace (stack → grid → screen)
//!     ↓ export (this module)
//! SVG document / text report
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`report`] — plain text listing via [`report::TextReport`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`TilegridError::Export`] at the crate boundary.
//!
//! [`TilegridError::Export`]: crate::TilegridError::Export

pub mod report;
pub mod svg;

use thiserror::Error;

use crate::workspace::Workspace;

/// Abstraction for workspace export backends.
pub trait Exporter {
    /// Renders the workspace into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the workspace cannot be rendered.
    fn export_workspace(&self, workspace: &Workspace) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// The style configuration could not be applied.
    #[error("Style error: {0}")]
    Style(String),

    /// A rendering failure described by the message.
    #[error("Render error: {0}")]
    Render(String),
}
