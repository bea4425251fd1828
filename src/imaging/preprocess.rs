use image::{imageops::FilterType, RgbImage};

use crate::models::Tensor;

/// Bilinear resize to `size`×`size`, then `(v / 255 - 0.5) / 0.5` per channel.
///
/// Produces a `[1, 3, size, size]` CHW tensor with values in [-1, 1].
pub fn to_normalized_tensor(image: &RgbImage, size: u32) -> Tensor {
    let resized = if image.dimensions() == (size, size) {
        image.clone()
    } else {
        image::imageops::resize(image, size, size, FilterType::Triangle)
    };

    let plane = (size * size) as usize;
    let mut data = vec![0.0f32; 3 * plane];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = (y * size + x) as usize;
        for channel in 0..3 {
            let v = f32::from(pixel.0[channel]) / 255.0;
            data[channel * plane + offset] = (v - 0.5) / 0.5;
        }
    }

    Tensor {
        shape: vec![1, 3, size as usize, size as usize],
        data,
    }
}
