use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use imageproc::contours::Contour;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::color::ColorSample;
use crate::config::AnalyzerConfig;
use crate::contours;
use crate::error::{AnalysisError, Result};
use crate::grid::{GridLayout, sample_grid};
use crate::summary::Summary;

/// Everything one analysis produces. Nothing here has touched the filesystem.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    /// Input image with the contours stroked on top.
    pub overlay: RgbImage,
    pub contours: Vec<Contour<i32>>,
    pub layout: GridLayout,
    /// `grid_size²` samples, row-major.
    pub grid_colors: Vec<ColorSample>,
    pub summary: Option<Summary>,
}

/// Serializable `{ grid_colors, summary }` document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub grid_colors: &'a [ColorSample],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a Summary>,
}

impl AnalysisResult {
    pub fn report(&self) -> Report<'_> {
        Report {
            grid_colors: &self.grid_colors,
            summary: self.summary.as_ref(),
        }
    }

    pub fn report_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.report())?)
    }

    pub fn overlay_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.overlay.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}

/// Samples a uniform color grid and draws a contour overlay.
#[derive(Clone, Debug, Default)]
pub struct GridColorAnalyzer {
    config: AnalyzerConfig,
}

impl GridColorAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Decodes `input` with format sniffing, then runs [`analyze`](Self::analyze).
    pub fn analyze_bytes(&self, input: &[u8]) -> Result<AnalysisResult> {
        let img = image::load_from_memory(input)
            .map_err(|e| AnalysisError::InvalidImage(format!("unable to decode image: {e}")))?;
        self.analyze(&img)
    }

    pub fn analyze(&self, img: &DynamicImage) -> Result<AnalysisResult> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidImage(format!(
                "image is empty ({width}x{height})"
            )));
        }
        let rgb = img.to_rgb8();

        let style = &self.config.contours;
        let contours = contours::extract(&rgb, style);
        let mut overlay = rgb.clone();
        contours::draw(&mut overlay, &contours, style);

        let grid_size = self.config.grid_size;
        let layout = GridLayout::new(width, height, grid_size);
        let (dropped_cols, dropped_rows) = layout.dropped(width, height);
        if layout.cell_width == 0 || layout.cell_height == 0 {
            warn!(width, height, grid_size, "image smaller than grid, cells are empty");
        } else if dropped_cols > 0 || dropped_rows > 0 {
            debug!(dropped_cols, dropped_rows, "trailing pixels excluded from sampling");
        }

        let grid_colors = sample_grid(&rgb, &layout);
        let summary = self
            .config
            .compute_summary
            .then(|| Summary::from_samples(&grid_colors));

        info!(
            width,
            height,
            grid_size,
            contours = contours.len(),
            unique_colors = summary.as_ref().map(|s| s.unique_colors),
            "analyzed image"
        );

        Ok(AnalysisResult {
            overlay,
            contours,
            layout,
            grid_colors,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn analyzer(grid_size: u32) -> GridColorAnalyzer {
        GridColorAnalyzer::new(AnalyzerConfig::default().with_grid_size(grid_size)).unwrap()
    }

    #[test]
    fn zero_grid_is_rejected_up_front() {
        let err = GridColorAnalyzer::new(AnalyzerConfig::default().with_grid_size(0));
        assert!(matches!(err, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn empty_image_is_invalid() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            analyzer(2).analyze(&img),
            Err(AnalysisError::InvalidImage(_))
        ));
    }

    #[test]
    fn garbage_bytes_are_invalid() {
        assert!(matches!(
            analyzer(2).analyze_bytes(b"definitely not an image"),
            Err(AnalysisError::InvalidImage(_))
        ));
    }

    #[test]
    fn summary_can_be_disabled() {
        let config = AnalyzerConfig::default().with_grid_size(2).with_summary(false);
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([4, 5, 6])));
        let result = GridColorAnalyzer::new(config).unwrap().analyze(&img).unwrap();
        assert!(result.summary.is_none());

        let report = result.report_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert!(json.get("summary").is_none());
        assert_eq!(json["grid_colors"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn grayscale_input_is_expanded() {
        let gray = image::GrayImage::from_pixel(10, 10, image::Luma([77]));
        let img = DynamicImage::ImageLuma8(gray);
        let result = analyzer(5).analyze(&img).unwrap();
        assert!(result.grid_colors.iter().all(|s| s.rgb == [77, 77, 77]));
    }

    #[test]
    fn overlay_png_decodes_back() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(12, 9, Rgb([200, 10, 10])));
        let result = analyzer(3).analyze(&img).unwrap();
        let png = result.overlay_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (12, 9));
    }
}
