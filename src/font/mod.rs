pub mod outline;
pub mod ttf;

use image::RgbImage;

use crate::error::Result;

pub use outline::{Outline, Point};
pub use ttf::TtfContentRenderer;

/// Source of content skeletons: the target character drawn from a reference outline font.
pub trait ContentRenderer: Send + Sync {
    /// Whether the font maps `character` to a glyph.
    fn contains(&self, character: char) -> bool;

    /// Renders `character` black on white into a square canvas.
    fn render(&self, character: char) -> Result<RgbImage>;
}
