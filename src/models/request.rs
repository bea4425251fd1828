use image::RgbImage;

use crate::error::{GlyphError, Result};

/// Single-style generation: one reference image drives the sampler directly.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub character: String,
    pub sampling_step: u32,
    pub reference_image: RgbImage,
}

/// Interpolates the caller's style image with a preset style.
#[derive(Debug, Clone)]
pub struct BlendRequest {
    pub character: String,
    pub style_option: String,
    pub alpha: f64,
    pub thickness: i32,
    pub image_a: RgbImage,
}

impl BlendRequest {
    pub fn validate_alpha(&self) -> Result<()> {
        if self.alpha.is_finite() && (0.0..=1.0).contains(&self.alpha) {
            Ok(())
        } else {
            Err(GlyphError::InvalidParameter(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )))
        }
    }
}

/// Truncates toward zero, like `int()` on the form value.
pub fn thickness_from_form(value: f64) -> i32 {
    if value.is_finite() {
        value.trunc() as i32
    } else {
        0
    }
}

/// Returns the only character of `input`, or `InvalidCharacterInput`.
pub fn single_char(input: &str) -> Result<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GlyphError::InvalidCharacterInput(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("體").unwrap(), '體');
        assert_eq!(single_char("A").unwrap(), 'A');
        assert!(matches!(
            single_char(""),
            Err(GlyphError::InvalidCharacterInput(_))
        ));
        assert!(matches!(
            single_char("AB"),
            Err(GlyphError::InvalidCharacterInput(_))
        ));
    }

    #[test]
    fn test_thickness_truncates_toward_zero() {
        assert_eq!(thickness_from_form(2.9), 2);
        assert_eq!(thickness_from_form(-1.7), -1);
        assert_eq!(thickness_from_form(0.5), 0);
        assert_eq!(thickness_from_form(f64::NAN), 0);
    }

    #[test]
    fn test_alpha_range() {
        let mut request = BlendRequest {
            character: "體".to_string(),
            style_option: "書法風".to_string(),
            alpha: 0.3,
            thickness: 0,
            image_a: RgbImage::new(1, 1),
        };
        assert!(request.validate_alpha().is_ok());
        request.alpha = 1.2;
        assert!(request.validate_alpha().is_err());
        request.alpha = f64::NAN;
        assert!(request.validate_alpha().is_err());
    }
}
