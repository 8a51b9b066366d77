/*!
 * Scale fixing for Ogre XML exports.
 *
 * Modeling tools often export meshes and skeletons at the wrong unit scale.
 * This module multiplies every coordinate triple of a mesh or skeleton XML
 * document by a factor and can hand the result to `OgreXMLConverter`:
 *
 * - `coordinates`: coordinate triples and their attribute formatting
 * - `document`: streaming rewrite of mesh and skeleton documents
 * - `converter`: external binary converter invocation
 */

use anyhow::Result;
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::ConverterConfig;
use crate::errors::ScaleError;
use crate::file_utils::FileManager;

pub use self::converter::MeshConverter;
pub use self::coordinates::{format_coordinate, CoordinateTriple};
pub use self::document::{process_mesh, process_skeleton, ScaledDocument};

pub mod converter;
pub mod coordinates;
pub mod document;

/// Kind of Ogre XML document to process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Mesh,
    Skeleton,
}

impl DocumentKind {
    /// Rescale `document` according to its kind
    pub fn process(&self, document: &str, scale: f64) -> Result<ScaledDocument, ScaleError> {
        match self {
            Self::Mesh => process_mesh(document, scale),
            Self::Skeleton => process_skeleton(document, scale),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => write!(f, "mesh"),
            Self::Skeleton => write!(f, "skeleton"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mesh" => Ok(Self::Mesh),
            "skeleton" => Ok(Self::Skeleton),
            _ => Err(ScaleError::UnknownDocumentType(s.to_string())),
        }
    }
}

/// One scale fix job
#[derive(Debug, Clone)]
pub struct ScaleRequest {
    pub kind: DocumentKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub scale: f64,
    /// Binary output, converted only when a converter is configured
    pub binary_destination: Option<PathBuf>,
}

/// Summary of a finished scale fix
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReport {
    pub scaled_triples: usize,
    pub converted: bool,
}

/// Rescales XML documents and optionally converts them to binary
pub struct ScaleFixer {
    converter: Option<MeshConverter>,
}

impl ScaleFixer {
    pub fn new(converter: &ConverterConfig) -> Self {
        Self {
            converter: MeshConverter::from_config(converter),
        }
    }

    /// Scale fixer that never runs the external converter
    pub fn without_converter() -> Self {
        Self { converter: None }
    }

    /// Run a complete scale fix
    ///
    /// The destination is written only once the whole document was processed.
    pub fn run(&self, request: &ScaleRequest) -> Result<ScaleReport> {
        info!("Loading XML document {:?}...", request.source);
        let source = FileManager::read_to_string(&request.source)?;

        info!("Processing XML {}...", request.kind);
        let scaled = request.kind.process(&source, request.scale)?;
        info!("Scaled {} coordinates by {}", scaled.scaled_triples, request.scale);

        info!("Saving XML document {:?}...", request.destination);
        FileManager::write_to_file(&request.destination, &scaled.xml)?;

        let converted = match (&request.binary_destination, &self.converter) {
            (Some(binary), Some(converter)) => converter.convert(&request.destination, binary)?,
            (Some(binary), None) => {
                warn!("No converter configured, skipping binary output {:?}", binary);
                false
            }
            (None, _) => false,
        };

        Ok(ScaleReport {
            scaled_triples: scaled.scaled_triples,
            converted,
        })
    }
}
