//! Contour overlay: grayscale, blur, binarize, trace, draw.
//!
//! The contours only decorate the overlay image. Grid sampling never looks at
//! them.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{Contour, find_contours};
use imageproc::drawing::{BresenhamLineIter, draw_filled_rect_mut};
use imageproc::filter::separable_filter_equal;
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::debug;

use crate::config::ContourStyle;

/// Binomial approximation of a 5-tap Gaussian (sigma ≈ 1.1).
const GAUSSIAN_5: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// BT.601 weights in 14-bit fixed point, as OpenCV's 8-bit RGB to gray.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
        let luma = (weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT;
        Luma([luma as u8])
    })
}

pub fn blur(gray: &GrayImage) -> GrayImage {
    separable_filter_equal(gray, &GAUSSIAN_5[..])
}

/// Values strictly above `threshold` become `max_value`, the rest 0.
pub fn binarize(gray: &GrayImage, threshold: u8, max_value: u8) -> GrayImage {
    let mut binary = gray.clone();
    for p in binary.pixels_mut() {
        *p = if p.0[0] > threshold {
            Luma([max_value])
        } else {
            Luma([0])
        };
    }
    binary
}

/// Drops every point that sits in the middle of a straight horizontal,
/// vertical or diagonal run. Contours are closed, so the run may wrap around.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            (p.x - prev.x, p.y - prev.y) != (next.x - p.x, next.y - p.y)
        })
        .map(|(_, p)| *p)
        .collect()
}

/// Traces outer and hole borders of the foreground with their parent links,
/// then compresses each border to its corner points.
pub fn find_simplified(binary: &GrayImage) -> Vec<Contour<i32>> {
    let mut contours = find_contours::<i32>(binary);
    for contour in &mut contours {
        contour.points = simplify_chain(&contour.points);
    }
    contours
}

/// Full contour pass over an RGB image.
pub fn extract(img: &RgbImage, style: &ContourStyle) -> Vec<Contour<i32>> {
    let gray = to_grayscale(img);
    let blurred = blur(&gray);
    let binary = binarize(&blurred, style.threshold, style.max_value);
    let contours = find_simplified(&binary);
    debug!(
        contours = contours.len(),
        points = contours.iter().map(|c| c.points.len()).sum::<usize>(),
        "traced contours"
    );
    contours
}

/// Strokes each contour as a closed polyline with a square pen.
pub fn draw(canvas: &mut RgbImage, contours: &[Contour<i32>], style: &ContourStyle) {
    let color = Rgb(style.color);
    let width = style.line_width.max(1);
    let half = (width / 2) as i32;

    let mut stamp = |x: i32, y: i32| {
        let pen = Rect::at(x - half, y - half).of_size(width, width);
        draw_filled_rect_mut(canvas, pen, color);
    };

    for contour in contours {
        let points = &contour.points;
        match points.len() {
            0 => {}
            1 => stamp(points[0].x, points[0].y),
            n => {
                for i in 0..n {
                    let p1 = points[i];
                    let p2 = points[(i + 1) % n];
                    let line = BresenhamLineIter::new(
                        (p1.x as f32, p1.y as f32),
                        (p2.x as f32, p2.y as f32),
                    );
                    for (x, y) in line {
                        stamp(x, y);
                    }
                }
            }
        }
    }
}
