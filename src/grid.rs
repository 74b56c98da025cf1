use image::RgbImage;

use crate::color::ColorSample;

/// Partition of an image into `grid_size × grid_size` equal cells.
///
/// Cell dimensions are the floor of `dimension / grid_size`, so up to
/// `grid_size - 1` trailing columns and rows are never sampled. When the
/// image is smaller than the grid, cells are empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub grid_size: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// Pixel rectangle owned by one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn new(width: u32, height: u32, grid_size: u32) -> Self {
        Self {
            grid_size,
            cell_width: width / grid_size,
            cell_height: height / grid_size,
        }
    }

    /// Columns and rows past the last full cell.
    pub fn dropped(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width - self.cell_width * self.grid_size,
            height - self.cell_height * self.grid_size,
        )
    }

    pub fn cell_count(&self) -> usize {
        let n = self.grid_size as usize;
        n * n
    }

    /// All cells, rows outer and columns inner.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.grid_size).flat_map(move |row| {
            (0..self.grid_size).map(move |col| GridCell {
                row,
                col,
                x: col * self.cell_width,
                y: row * self.cell_height,
                width: self.cell_width,
                height: self.cell_height,
            })
        })
    }
}

/// Per-channel mean over the cell, truncated. Empty cells average to black.
pub fn cell_mean(img: &RgbImage, cell: &GridCell) -> [u8; 3] {
    let mut sums = [0u64; 3];
    for y in cell.y..cell.y + cell.height {
        for x in cell.x..cell.x + cell.width {
            let px = img.get_pixel(x, y);
            for (sum, &c) in sums.iter_mut().zip(px.0.iter()) {
                *sum += c as u64;
            }
        }
    }

    let count = cell.width as u64 * cell.height as u64;
    if count == 0 {
        return [0; 3];
    }
    sums.map(|s| (s / count) as u8)
}

/// One sample per cell in row-major order; always `grid_size²` entries.
pub fn sample_grid(img: &RgbImage, layout: &GridLayout) -> Vec<ColorSample> {
    let mut samples = Vec::with_capacity(layout.cell_count());
    for cell in layout.cells() {
        samples.push(ColorSample::new(cell.row, cell.col, cell_mean(img, &cell)));
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn layout_floors_cell_size() {
        let layout = GridLayout::new(205, 103, 10);
        assert_eq!(layout.cell_width, 20);
        assert_eq!(layout.cell_height, 10);
        assert_eq!(layout.dropped(205, 103), (5, 3));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn cell_count_does_not_overflow_u32() {
        let layout = GridLayout::new(10, 10, 70_000);
        assert_eq!(layout.cell_count(), 4_900_000_000);
        assert_eq!(GridLayout::new(10, 10, 3).cell_count(), 9);
    }

    #[test]
    fn cells_are_row_major() {
        let layout = GridLayout::new(30, 30, 3);
        let order: Vec<(u32, u32)> = layout.cells().map(|c| (c.row, c.col)).collect();
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
        let last = layout.cells().last().unwrap();
        assert_eq!((last.x, last.y, last.width, last.height), (20, 20, 10, 10));
    }

    #[test]
    fn mean_truncates() {
        // two pixels 0 and 255 average to 127.5
        let img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 1])
            }
        });
        let cell = GridCell {
            row: 0,
            col: 0,
            x: 0,
            y: 0,
            width: 2,
            height: 1,
        };
        assert_eq!(cell_mean(&img, &cell), [127, 127, 0]);
    }

    #[test]
    fn trailing_pixels_are_ignored() {
        // the last column is red but falls outside every cell
        let img = RgbImage::from_fn(5, 4, |x, _| {
            if x == 4 {
                Rgb([255, 0, 0])
            } else {
                Rgb([10, 20, 30])
            }
        });
        let layout = GridLayout::new(5, 4, 2);
        let samples = sample_grid(&img, &layout);
        assert!(samples.iter().all(|s| s.rgb == [10, 20, 30]));
    }

    #[test]
    fn image_smaller_than_grid_yields_black_cells() {
        let img = RgbImage::from_pixel(3, 3, Rgb([200, 200, 200]));
        let layout = GridLayout::new(3, 3, 4);
        let samples = sample_grid(&img, &layout);
        assert_eq!(samples.len(), 16);
        assert!(samples.iter().all(|s| s.rgb == [0, 0, 0] && s.hex == "#000000"));
    }

    #[test]
    fn quadrants_are_sampled_independently() {
        let img = RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgb([255, 0, 0]),
            (false, true) => Rgb([0, 255, 0]),
            (true, false) => Rgb([0, 0, 255]),
            (false, false) => Rgb([255, 255, 255]),
        });
        let samples = sample_grid(&img, &GridLayout::new(4, 4, 2));
        let hexes: Vec<&str> = samples.iter().map(|s| s.hex.as_str()).collect();
        assert_eq!(hexes, vec!["#ff0000", "#00ff00", "#0000ff", "#ffffff"]);
    }
}
