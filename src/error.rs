use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("Invalid character input: expected exactly one character, got {0:?}")]
    InvalidCharacterInput(String),
    #[error("Unsupported style: {0}")]
    UnsupportedStyle(String),
    #[error("Style asset missing: {}", .0.display())]
    StyleAssetMissing(PathBuf),
    #[error("Character not in font: {0}")]
    CharacterNotInFont(char),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Inference error: {0}")]
    InferenceError(String),
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("Font error: {0}")]
    FontError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl GlyphError {
    /// Whether the error is a rejected request rather than a processing failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GlyphError::InvalidCharacterInput(_)
                | GlyphError::UnsupportedStyle(_)
                | GlyphError::StyleAssetMissing(_)
                | GlyphError::CharacterNotInFont(_)
                | GlyphError::InvalidParameter(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GlyphError::InvalidCharacterInput(_) => "invalid_character_input",
            GlyphError::UnsupportedStyle(_) => "unsupported_style",
            GlyphError::StyleAssetMissing(_) => "style_asset_missing",
            GlyphError::CharacterNotInFont(_) => "character_not_in_font",
            GlyphError::InvalidParameter(_) => "invalid_parameter",
            GlyphError::InvalidImage(_) => "invalid_image",
            GlyphError::ConfigError(_) => "config_error",
            GlyphError::InferenceError(_) => "inference_error",
            GlyphError::ImageError(_) => "image_error",
            GlyphError::FontError(_) => "font_error",
            GlyphError::IoError(_) => "io_error",
            GlyphError::InternalError(_) => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, GlyphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kinds() {
        assert!(GlyphError::UnsupportedStyle("x".into()).is_rejection());
        assert!(GlyphError::CharacterNotInFont('體').is_rejection());
        assert!(GlyphError::StyleAssetMissing(PathBuf::from("a.png")).is_rejection());
        assert!(!GlyphError::InferenceError("down".into()).is_rejection());
        assert!(!GlyphError::InvalidImage("garbage".into()).is_rejection());
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(
            GlyphError::InvalidCharacterInput("AB".into()).kind(),
            "invalid_character_input"
        );
        assert_eq!(
            GlyphError::StyleAssetMissing(PathBuf::from("x")).kind(),
            "style_asset_missing"
        );
        assert_eq!(GlyphError::ConfigError("x".into()).kind(), "config_error");
    }

    #[test]
    fn test_display_messages() {
        let err = GlyphError::CharacterNotInFont('體');
        assert_eq!(err.to_string(), "Character not in font: 體");
        let err = GlyphError::StyleAssetMissing(PathBuf::from("ink_style/39636.png"));
        assert_eq!(err.to_string(), "Style asset missing: ink_style/39636.png");
    }
}
