//! Decoding of conversion service responses.
//!
//! A successful response carries the generated C source and the diagram:
//!
//! ```json
//! {
//!   "success": true,
//!   "c_code": "#include <stdio.h>\n...",
//!   "diagram": {"blocks": [], "connections": []},
//!   "block_count": 0,
//!   "connection_count": 0
//! }
//! ```
//!
//! A failed conversion carries only `{"error": "..."}`.

use log::{debug, warn};
use serde::Deserialize;

use simview_core::model::Diagram;

use crate::SimviewError;

/// Raw response body as sent by the conversion service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    c_code: Option<String>,
    #[serde(default)]
    diagram: Option<Diagram>,
    #[serde(default)]
    block_count: Option<usize>,
    #[serde(default)]
    connection_count: Option<usize>,
    #[serde(default)]
    error: Option<String>,
}

impl ConversionResponse {
    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Decode`] if the body is not valid JSON or does
    /// not have the expected shape.
    pub fn from_json(src: &str) -> Result<Self, SimviewError> {
        serde_json::from_str(src).map_err(|err| SimviewError::new_decode_error(err, src))
    }

    /// Converts the response into a [`ConversionResult`].
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Service`] if the service reported an error, or
    /// if the response is neither successful nor carries any output.
    pub fn into_result(self) -> Result<ConversionResult, SimviewError> {
        if let Some(error) = self.error {
            return Err(SimviewError::Service(error));
        }

        if !self.success && self.c_code.is_none() && self.diagram.is_none() {
            return Err(SimviewError::Service("Conversion failed".to_string()));
        }

        let c_code = self.c_code.unwrap_or_default();
        let diagram = self.diagram.unwrap_or_default();

        let stats = ConversionStats {
            block_count: self.block_count.unwrap_or(diagram.blocks().len()),
            connection_count: self
                .connection_count
                .unwrap_or(diagram.connections().len()),
            code_lines: c_code.split('\n').count(),
        };

        if stats.block_count != diagram.blocks().len() {
            warn!(
                reported = stats.block_count,
                decoded = diagram.blocks().len();
                "Reported block count differs from decoded blocks"
            );
        }
        debug!(stats:?; "Conversion response decoded");

        Ok(ConversionResult {
            c_code,
            diagram,
            stats,
        })
    }
}

/// Summary numbers shown next to a converted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    block_count: usize,
    connection_count: usize,
    code_lines: usize,
}

impl ConversionStats {
    /// Number of blocks as reported by the service
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Number of connections as reported by the service
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    /// Number of lines in the generated C source
    pub fn code_lines(&self) -> usize {
        self.code_lines
    }
}

/// A successful conversion: generated C source plus the diagram to draw.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    c_code: String,
    diagram: Diagram,
    stats: ConversionStats,
}

impl ConversionResult {
    /// Returns the generated C source
    pub fn c_code(&self) -> &str {
        &self.c_code
    }

    /// Returns the decoded diagram
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Returns the conversion summary
    pub fn stats(&self) -> ConversionStats {
        self.stats
    }
}
