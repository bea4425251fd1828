//! Grayscale stroke-width adjustment with a 3×3 square kernel.
//!
//! Erosion takes the neighborhood minimum and shrinks bright regions; dilation takes the
//! maximum and grows them. On dark-on-light glyphs erosion therefore widens the strokes.
//! Neighbors outside the image are ignored. After `max(width, height)` passes the window
//! spans the whole image, so larger iteration counts are clamped there.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// ITU-R BT.601 luma, rounded.
pub fn to_gray(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}

/// Drops color, keeping three equal channels.
pub fn to_grayscale_rgb(image: &RgbImage) -> RgbImage {
    gray_to_rgb(&to_gray(image))
}

fn saturated_passes(image: &GrayImage, iterations: u32) -> u32 {
    iterations.min(image.width().max(image.height()))
}

fn filter_3x3(image: &GrayImage, pick: fn(u8, u8) -> u8) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = image.get_pixel(x, y).0[0];
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                acc = pick(acc, image.get_pixel(nx, ny).0[0]);
            }
        }
        Luma([acc])
    })
}

pub fn erode(image: &GrayImage, iterations: u32) -> GrayImage {
    let mut out = image.clone();
    for _ in 0..saturated_passes(image, iterations) {
        out = filter_3x3(&out, u8::min);
    }
    out
}

pub fn dilate(image: &GrayImage, iterations: u32) -> GrayImage {
    let mut out = image.clone();
    for _ in 0..saturated_passes(image, iterations) {
        out = filter_3x3(&out, u8::max);
    }
    out
}

/// Positive `thickness` erodes, negative dilates, each `|thickness|` times.
/// Zero returns the input untouched.
pub fn adjust_thickness(image: &RgbImage, thickness: i32) -> RgbImage {
    if thickness == 0 || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }
    let gray = to_gray(image);
    let adjusted = if thickness > 0 {
        erode(&gray, thickness.unsigned_abs())
    } else {
        dilate(&gray, thickness.unsigned_abs())
    };
    gray_to_rgb(&adjusted)
}
