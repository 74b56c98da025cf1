//! Grid color analysis for raster images.
//!
//! An image is split into a `grid_size × grid_size` grid; each cell is reduced
//! to its mean color, reported as RGB, hex and HSL. Alongside, the image is
//! thresholded and its contours are stroked onto an overlay copy.
//!
//! [`GridColorAnalyzer::analyze`] is pure. Writing the overlay and the JSON
//! report is left to [`ArtifactStore`].

pub mod analyzer;
pub mod color;
pub mod config;
pub mod contours;
pub mod error;
pub mod grid;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;
pub mod summary;
mod wasm;

pub use analyzer::{AnalysisResult, GridColorAnalyzer, Report};
pub use color::ColorSample;
pub use config::{AnalyzerConfig, ContourStyle, StorageConfig};
pub use error::{AnalysisError, Result};
pub use grid::{GridCell, GridLayout};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::{ArtifactStore, SavedArtifacts, load_image};
pub use summary::Summary;
pub use wasm::analyze_image;
