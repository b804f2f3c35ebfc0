//! Error types for SimView operations.
//!
//! This module provides the main error type [`SimviewError`]. Layout itself
//! never fails; errors come from reading and decoding a conversion response,
//! from the service reporting a failed conversion, and from invalid
//! configuration.

use std::io;

use thiserror::Error;

/// The main error type for SimView operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant keeps the JSON source next to the decoder error so
/// callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum SimviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid conversion response: {source}")]
    Decode {
        source: serde_json::Error,
        src: String,
    },

    #[error("Conversion failed: {0}")]
    Service(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SimviewError {
    /// Create a new `Decode` error with the associated JSON source.
    pub fn new_decode_error(source: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Decode {
            source,
            src: src.into(),
        }
    }

    /// Returns the byte offset of a decode error within its source.
    ///
    /// `serde_json` reports one-based lines and columns; the offset is clamped
    /// to the source length. Returns `None` for other variants.
    pub fn decode_offset(&self) -> Option<usize> {
        let Self::Decode { source, src } = self else {
            return None;
        };

        let line = source.line().max(1);
        let line_start: usize = src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        let offset = line_start + source.column().saturating_sub(1);

        Some(offset.min(src.len()))
    }
}
