use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    models::{single_char, StyleOption},
};

/// Maps `(style, character)` to the pre-rendered reference glyph on disk.
///
/// Layout: `{base_dir}/{style_dir}/{decimal_codepoint}.png`. The resolver only computes paths;
/// a missing file means the style does not cover that character.
#[derive(Debug, Clone)]
pub struct StyleAssetResolver {
    base_dir: PathBuf,
}

impl StyleAssetResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn style_dir(&self, style: StyleOption) -> PathBuf {
        self.base_dir.join(style.dir_name())
    }

    pub fn resolve(&self, style: StyleOption, character: char) -> PathBuf {
        self.style_dir(style)
            .join(format!("{}.png", u32::from(character)))
    }

    /// Validates the raw form values before resolving.
    pub fn resolve_named(&self, style_name: &str, character: &str) -> Result<PathBuf> {
        let character = single_char(character)?;
        let style: StyleOption = style_name.parse()?;
        Ok(self.resolve(style, character))
    }

    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}
