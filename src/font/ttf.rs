use std::path::Path;

use image::{Rgb, RgbImage};
use ttf_parser::Face;

use super::{ContentRenderer, Outline};
use crate::error::{GlyphError, Result};

/// Content renderer backed by a TrueType/OpenType file held in memory.
pub struct TtfContentRenderer {
    data: Vec<u8>,
    size: u32,
}

impl TtfContentRenderer {
    pub fn from_bytes(data: Vec<u8>, size: u32) -> Result<Self> {
        Face::parse(&data, 0).map_err(|e| GlyphError::FontError(e.to_string()))?;
        Ok(Self { data, size })
    }

    pub async fn load(path: &Path, size: u32) -> Result<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            GlyphError::FontError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let renderer = Self::from_bytes(data, size)?;
        log::info!("🔤 Loaded outline font {}", path.display());
        Ok(renderer)
    }

    fn face(&self) -> Result<Face<'_>> {
        Face::parse(&self.data, 0).map_err(|e| GlyphError::FontError(e.to_string()))
    }
}

impl ContentRenderer for TtfContentRenderer {
    fn contains(&self, character: char) -> bool {
        self.face()
            .map(|face| face.glyph_index(character).is_some())
            .unwrap_or(false)
    }

    fn render(&self, character: char) -> Result<RgbImage> {
        let face = self.face()?;
        let glyph = face
            .glyph_index(character)
            .ok_or(GlyphError::CharacterNotInFont(character))?;

        let size = self.size as f32;
        let scale = size / f32::from(face.units_per_em());
        let advance = face
            .glyph_hor_advance(glyph)
            .map_or(f32::from(face.units_per_em()), f32::from);
        let origin_x = (size - advance * scale) / 2.0;
        let baseline = f32::from(face.ascender()) * scale;

        let mut outline = Outline::new(scale, origin_x, baseline);
        // blank glyphs (spaces) have no outline and render as an empty canvas
        face.outline_glyph(glyph, &mut outline);

        let mask = outline.coverage(self.size, self.size);
        Ok(RgbImage::from_fn(self.size, self.size, |x, y| {
            let ink = 255 - mask.get_pixel(x, y).0[0];
            Rgb([ink, ink, ink])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be16(out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&v.to_be_bytes());
    }

    fn be32(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_be_bytes());
    }

    /// Two-glyph TrueType face: `.notdef` is empty, glyph 1 is a 500×700 square
    /// (x 100..600, y 0..700, advance 700) mapped from 'A' and '體'. 1000 units/em, ascender 800.
    fn square_font() -> Vec<u8> {
        let mut head = Vec::new();
        be32(&mut head, 0x0001_0000);
        be32(&mut head, 0x0001_0000);
        be32(&mut head, 0);
        be32(&mut head, 0x5F0F_3CF5);
        be16(&mut head, 0);
        be16(&mut head, 1000);
        head.extend_from_slice(&[0; 16]);
        for v in [100u16, 0, 600, 700] {
            be16(&mut head, v);
        }
        be16(&mut head, 0);
        be16(&mut head, 8);
        be16(&mut head, 2);
        be16(&mut head, 1); // long loca
        be16(&mut head, 0);

        let mut hhea = Vec::new();
        be32(&mut hhea, 0x0001_0000);
        be16(&mut hhea, 800);
        be16(&mut hhea, (-200i16) as u16);
        be16(&mut hhea, 0);
        hhea.extend_from_slice(&[0; 24]);
        be16(&mut hhea, 2);

        let mut maxp = Vec::new();
        be32(&mut maxp, 0x0000_5000);
        be16(&mut maxp, 2);

        let mut hmtx = Vec::new();
        for v in [500u16, 0, 700, 100] {
            be16(&mut hmtx, v);
        }

        let mut glyf = Vec::new();
        be16(&mut glyf, 1);
        for v in [100u16, 0, 600, 700] {
            be16(&mut glyf, v);
        }
        be16(&mut glyf, 3);
        be16(&mut glyf, 0);
        glyf.extend_from_slice(&[0x01; 4]);
        for dx in [100i16, 0, 500, 0] {
            be16(&mut glyf, dx as u16);
        }
        for dy in [0i16, 700, 0, -700] {
            be16(&mut glyf, dy as u16);
        }
        glyf.resize(36, 0);

        let mut loca = Vec::new();
        for v in [0u32, 0, 36] {
            be32(&mut loca, v);
        }

        let codes = [0x41u16, 0x9AD4, 0xFFFF];
        let mut cmap = Vec::new();
        be16(&mut cmap, 0);
        be16(&mut cmap, 1);
        be16(&mut cmap, 0);
        be16(&mut cmap, 3);
        be32(&mut cmap, 12);
        for v in [4u16, 40, 0, 6, 4, 1, 2] {
            be16(&mut cmap, v);
        }
        codes.iter().for_each(|&c| be16(&mut cmap, c));
        be16(&mut cmap, 0);
        codes.iter().for_each(|&c| be16(&mut cmap, c));
        for &c in &codes[..2] {
            be16(&mut cmap, 1u16.wrapping_sub(c));
        }
        be16(&mut cmap, 1);
        for _ in codes {
            be16(&mut cmap, 0);
        }

        // table records must be sorted by tag
        let tables: [(&[u8; 4], Vec<u8>); 7] = [
            (b"cmap", cmap),
            (b"glyf", glyf),
            (b"head", head),
            (b"hhea", hhea),
            (b"hmtx", hmtx),
            (b"loca", loca),
            (b"maxp", maxp),
        ];

        let mut font = Vec::new();
        be32(&mut font, 0x0001_0000);
        be16(&mut font, tables.len() as u16);
        font.extend_from_slice(&[0; 6]);

        let mut offset = 12 + 16 * tables.len();
        let mut body = Vec::new();
        for (tag, data) in &tables {
            font.extend_from_slice(*tag);
            be32(&mut font, 0);
            be32(&mut font, offset as u32);
            be32(&mut font, data.len() as u32);
            body.extend_from_slice(data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
            offset = 12 + 16 * tables.len() + body.len();
        }
        font.extend_from_slice(&body);
        font
    }

    #[test]
    fn test_contains_follows_cmap() {
        let renderer = TtfContentRenderer::from_bytes(square_font(), 100).unwrap();
        assert!(renderer.contains('A'));
        assert!(renderer.contains('體'));
        assert!(!renderer.contains('字'));
        assert!(matches!(
            renderer.render('字'),
            Err(GlyphError::CharacterNotInFont('字'))
        ));
    }

    #[test]
    fn test_render_places_glyph_on_baseline_and_centers_advance() {
        let renderer = TtfContentRenderer::from_bytes(square_font(), 100).unwrap();
        let image = renderer.render('體').unwrap();
        assert_eq!(image.dimensions(), (100, 100));

        // scale 0.1, advance 70 centered at x = 15, baseline at y = 80:
        // the square covers x 25..75 and y 10..80
        let ink = |x, y| image.get_pixel(x, y).0;
        assert_eq!(ink(50, 45), [0, 0, 0]);
        assert_eq!(ink(26, 11), [0, 0, 0]);
        assert_eq!(ink(73, 78), [0, 0, 0]);
        assert_eq!(ink(10, 45), [255, 255, 255]);
        assert_eq!(ink(90, 45), [255, 255, 255]);
        assert_eq!(ink(50, 5), [255, 255, 255]);
        assert_eq!(ink(50, 90), [255, 255, 255]);

        let dark = image.pixels().filter(|p| p.0[0] < 128).count();
        assert_eq!(dark, 50 * 70);
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.ttf");
        std::fs::write(&path, square_font()).unwrap();

        let renderer = TtfContentRenderer::load(&path, 64).await.unwrap();
        assert!(renderer.contains('A'));
        assert_eq!(renderer.render('A').unwrap().dimensions(), (64, 64));
    }

    #[test]
    fn test_rejects_non_font_bytes() {
        assert!(matches!(
            TtfContentRenderer::from_bytes(b"not a font".to_vec(), 128),
            Err(GlyphError::FontError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = TtfContentRenderer::load(Path::new("/nonexistent/font.ttf"), 128).await;
        assert!(matches!(result, Err(GlyphError::FontError(_))));
    }
}
