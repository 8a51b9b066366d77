/*!
 * # sion-tools - Asset pipeline utilities for Sion Tower
 *
 * Two small command line tools used when preparing game assets.
 *
 * ## Features
 *
 * - Rescale Ogre XML exports from the modeling tool:
 *   - Mesh vertex positions (submesh and shared geometry)
 *   - Skeleton bone positions and keyframe translations
 *   - Optional conversion to binary with `OgreXMLConverter`
 * - Extract translatable captions from MyGUI layouts:
 *   - One gettext template per layout
 *   - Captions deduplicated across the whole run
 *   - Aggregate template merging every layout
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `scaling`: Ogre XML scale fixing:
 *   - `scaling::coordinates`: Coordinate triples and number formatting
 *   - `scaling::document`: Mesh and skeleton document rewriting
 *   - `scaling::converter`: External binary converter
 * - `extraction`: Layout caption extraction:
 *   - `extraction::layout`: Layout parsing
 *   - `extraction::captions`: Caption filtering and deduplication
 *   - `extraction::pot`: Translation template output
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod scaling;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExtractError, ScaleError};
pub use extraction::{translate_layout, LayoutExtractor, SeenCaptions};
pub use scaling::{process_mesh, process_skeleton, DocumentKind, ScaleFixer, ScaleRequest};
