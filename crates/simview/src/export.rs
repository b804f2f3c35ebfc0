//! Export of rendered diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Conversion response (JSON)
//!     ↓ decode
//! Diagram
//!     ↓ layout
//! Layout
//!     ↓ view
//! DiagramView
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use std::io;

use crate::{SimviewError, view::DiagramView};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `view` and writes the result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Io`] if writing the output fails.
    fn export_view(
        &self,
        view: &DiagramView<'_>,
        writer: &mut dyn io::Write,
    ) -> Result<(), SimviewError>;
}
