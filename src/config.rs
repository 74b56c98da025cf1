use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_GRID_SIZE: u32 = 200;

/// Parameters of a single analysis run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of cells along each axis; the grid has `grid_size²` cells.
    pub grid_size: u32,
    /// Tally hex frequencies into a [`Summary`](crate::Summary).
    pub compute_summary: bool,
    pub contours: ContourStyle,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            compute_summary: true,
            contours: ContourStyle::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_summary(mut self, compute_summary: bool) -> Self {
        self.compute_summary = compute_summary;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "grid_size must be positive".into(),
            ));
        }
        if self.contours.line_width == 0 {
            return Err(AnalysisError::InvalidConfig(
                "contour line_width must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Binarization and drawing parameters for the contour overlay.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContourStyle {
    /// Blurred gray values strictly above this become foreground.
    pub threshold: u8,
    pub max_value: u8,
    pub color: [u8; 3],
    pub line_width: u32,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            threshold: 60,
            max_value: 255,
            color: [0, 255, 0],
            line_width: 2,
        }
    }
}

/// Where inputs are accepted from and artifacts are written to.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
    /// Lower-case extensions, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("uploads"),
            allowed_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

impl StorageConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn allow_gif(mut self) -> Self {
        if !self.allowed_extensions.iter().any(|e| e == "gif") {
            self.allowed_extensions.push("gif".into());
        }
        self
    }

    /// Rejects paths whose extension is missing or not in the allowed set.
    pub fn check_extension(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if self.allowed_extensions.iter().any(|e| *e == extension) {
            Ok(())
        } else {
            Err(AnalysisError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    }
}
