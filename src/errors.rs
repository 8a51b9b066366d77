/*!
 * Error types for the sion-tools utilities.
 *
 * This module contains custom error types for both tools, using the
 * thiserror crate for ergonomic error definitions. The binary wraps them
 * in anyhow at the top level.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rescaling an Ogre XML document
#[derive(Error, Debug)]
pub enum ScaleError {
    /// The document type selector was neither `mesh` nor `skeleton`
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    /// The source document is not well-formed XML
    #[error("Failed to parse XML document: {0}")]
    Parse(String),

    /// A coordinate element lacks one of its x/y/z attributes
    #[error("Element <{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// A coordinate attribute could not be read as a number
    #[error("Attribute '{attribute}' of <{element}> is not a number: '{value}'")]
    InvalidNumber {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Raw attribute value
        value: String,
    },

    /// A mesh vertex has no position child
    #[error("Vertex #{index} has no <position> element")]
    MissingPosition {
        /// Zero-based index of the vertex in document order
        index: usize,
    },

    /// The external converter could not be run or reported failure
    #[error("Converter {converter:?} failed: {message}")]
    ConverterFailed {
        /// Converter executable
        converter: PathBuf,
        /// Spawn error or exit status
        message: String,
    },
}

/// Errors that can occur while extracting captions from layouts
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A layout file is not well-formed XML
    #[error("Failed to parse layout {file:?}: {message}")]
    Parse {
        /// Layout file being parsed
        file: PathBuf,
        /// Parser message
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing command line arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the scale fixer
    #[error("Scale error: {0}")]
    Scale(#[from] ScaleError),

    /// Error from the layout extractor
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
