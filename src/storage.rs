use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::analyzer::AnalysisResult;
use crate::config::StorageConfig;
use crate::error::{AnalysisError, Result};

/// Checks the extension, then reads and decodes the file.
pub fn load_image(path: &Path, storage: &StorageConfig) -> Result<DynamicImage> {
    storage.check_extension(path)?;
    let bytes = fs::read(path).map_err(|e| AnalysisError::io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input");
    image::load_from_memory(&bytes).map_err(|e| {
        AnalysisError::InvalidImage(format!("unable to decode {}: {e}", path.display()))
    })
}

/// Files written for one analyzed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub overlay: PathBuf,
    pub report: PathBuf,
}

/// Writes overlays and JSON reports under the configured output directory.
///
/// Names derive from the input's file name, so different inputs never share
/// an artifact path.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            output_dir: storage.output_dir.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `processed_<file name>` and `<file name>_result.json`. The extension
    /// stays in both, so `photo.png` and `photo.jpg` do not share a report.
    pub fn paths_for(&self, source: &Path) -> Result<SavedArtifacts> {
        let Some(name) = source.file_name() else {
            return Err(AnalysisError::InvalidConfig(format!(
                "input path has no file name: {}",
                source.display()
            )));
        };
        let name = name.to_string_lossy();
        Ok(SavedArtifacts {
            overlay: self.output_dir.join(format!("processed_{name}")),
            report: self.output_dir.join(format!("{name}_result.json")),
        })
    }

    pub fn save(&self, source: &Path, result: &AnalysisResult) -> Result<SavedArtifacts> {
        let paths = self.paths_for(source)?;
        fs::create_dir_all(&self.output_dir).map_err(|e| AnalysisError::io(&self.output_dir, e))?;

        result.overlay.save(&paths.overlay).map_err(|e| match e {
            ImageError::IoError(source) => AnalysisError::io(&paths.overlay, source),
            other => AnalysisError::Encode(other),
        })?;

        let file = File::create(&paths.report).map_err(|e| AnalysisError::io(&paths.report, e))?;
        let mut writer = BufWriter::new(file);
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        result.report().serialize(&mut serializer)?;
        writer.flush().map_err(|e| AnalysisError::io(&paths.report, e))?;

        info!(
            overlay = %paths.overlay.display(),
            report = %paths.report.display(),
            "saved artifacts"
        );
        Ok(paths)
    }
}
