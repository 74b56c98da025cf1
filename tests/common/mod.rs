#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};

pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Two-tone checkerboard with square cells of `cell` pixels.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DynamicImage {
    assert!(cell > 0, "cell size must be positive");
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgb([32, 32, 32])
        } else {
            Rgb([220, 180, 40])
        }
    }))
}

/// Horizontal red ramp over a fixed blue channel.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y % 256) as u8, 128])
    }))
}

pub fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}
