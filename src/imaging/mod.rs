pub mod encoding;
pub mod morphology;
pub mod preprocess;

pub use encoding::{decode_png_base64, decode_upload, to_data_uri, to_png_base64, to_png_bytes};
pub use morphology::{adjust_thickness, dilate, erode, to_gray, to_grayscale_rgb};
pub use preprocess::to_normalized_tensor;
