use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GlyphError;

/// The preset reference styles shipped as pre-rendered glyph directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleOption {
    Calligraphy,
    ModernMinimal,
    InkWash,
    StreetTrend,
    CuteHanddrawn,
}

impl StyleOption {
    pub const ALL: [StyleOption; 5] = [
        StyleOption::Calligraphy,
        StyleOption::ModernMinimal,
        StyleOption::InkWash,
        StyleOption::StreetTrend,
        StyleOption::CuteHanddrawn,
    ];

    /// Name used in the `style_option` form field.
    pub fn label(&self) -> &'static str {
        match self {
            StyleOption::Calligraphy => "書法風",
            StyleOption::ModernMinimal => "簡約現代",
            StyleOption::InkWash => "潑墨風",
            StyleOption::StreetTrend => "潮流街頭",
            StyleOption::CuteHanddrawn => "可愛手繪",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            StyleOption::Calligraphy => "font_ref_imgs",
            StyleOption::ModernMinimal => "modern_minimal",
            StyleOption::InkWash => "ink_style",
            StyleOption::StreetTrend => "street_trend",
            StyleOption::CuteHanddrawn => "cute_handdrawn",
        }
    }
}

impl FromStr for StyleOption {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleOption::ALL
            .into_iter()
            .find(|style| style.label() == s)
            .ok_or_else(|| GlyphError::UnsupportedStyle(s.to_string()))
    }
}

impl fmt::Display for StyleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for style in StyleOption::ALL {
            assert_eq!(style.label().parse::<StyleOption>().unwrap(), style);
        }
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = "nonexistent-style".parse::<StyleOption>().unwrap_err();
        assert!(matches!(err, GlyphError::UnsupportedStyle(ref s) if s == "nonexistent-style"));
        // directory names are not accepted as labels
        assert!("ink_style".parse::<StyleOption>().is_err());
    }
}
