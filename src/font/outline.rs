use image::{GrayImage, Luma};
use ttf_parser::OutlineBuilder;

const CURVE_STEPS: usize = 8;
const SUBSAMPLES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: Point,
    to: Point,
}

/// Flattened glyph contours in canvas pixel space (y grows downward).
///
/// Font units are mapped with `scale`, shifted by `origin_x` and flipped around `baseline`.
#[derive(Debug)]
pub struct Outline {
    scale: f32,
    origin_x: f32,
    baseline: f32,
    start: Point,
    cursor: Point,
    edges: Vec<Edge>,
}

impl Outline {
    pub fn new(scale: f32, origin_x: f32, baseline: f32) -> Self {
        let zero = Point { x: 0.0, y: 0.0 };
        Self {
            scale,
            origin_x,
            baseline,
            start: zero,
            cursor: zero,
            edges: Vec::new(),
        }
    }

    fn map(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.origin_x + x * self.scale,
            y: self.baseline - y * self.scale,
        }
    }

    fn push_line(&mut self, to: Point) {
        if to != self.cursor {
            self.edges.push(Edge {
                from: self.cursor,
                to,
            });
        }
        self.cursor = to;
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Scan-converts the contours with the nonzero winding rule into a coverage mask
    /// (0 = empty, 255 = fully covered).
    pub fn coverage(&self, width: u32, height: u32) -> GrayImage {
        let mut acc = vec![0.0f32; (width * height) as usize];
        let mut crossings: Vec<(f32, i32)> = Vec::new();

        for row in 0..height as usize {
            for sub in 0..SUBSAMPLES {
                let sy = row as f32 + (sub as f32 + 0.5) / SUBSAMPLES as f32;
                crossings.clear();
                for edge in &self.edges {
                    let (a, b) = (edge.from, edge.to);
                    if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                        let t = (sy - a.y) / (b.y - a.y);
                        let dir = if b.y > a.y { 1 } else { -1 };
                        crossings.push((a.x + t * (b.x - a.x), dir));
                    }
                }
                crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

                let mut winding = 0;
                for pair in crossings.windows(2) {
                    winding += pair[0].1;
                    if winding != 0 {
                        let line = &mut acc[row * width as usize..(row + 1) * width as usize];
                        fill_span(line, pair[0].0, pair[1].0);
                    }
                }
            }
        }

        GrayImage::from_fn(width, height, |x, y| {
            let covered = acc[(y * width + x) as usize] / SUBSAMPLES as f32;
            Luma([(covered.clamp(0.0, 1.0) * 255.0).round() as u8])
        })
    }
}

/// Adds horizontal coverage of `[x0, x1)` to one scanline, fractional at both ends.
fn fill_span(line: &mut [f32], x0: f32, x1: f32) {
    let width = line.len() as f32;
    let (x0, x1) = (x0.clamp(0.0, width), x1.clamp(0.0, width));
    if x1 <= x0 {
        return;
    }
    let first = x0.floor() as usize;
    let last = (x1.ceil() as usize).min(line.len());
    for (px, cell) in line.iter_mut().enumerate().take(last).skip(first) {
        let left = (px as f32).max(x0);
        let right = (px as f32 + 1.0).min(x1);
        if right > left {
            *cell += right - left;
        }
    }
}

impl OutlineBuilder for Outline {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.start = p;
        self.cursor = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.push_line(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.cursor;
        let c = self.map(x1, y1);
        let p1 = self.map(x, y);
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let mt = 1.0 - t;
            self.push_line(Point {
                x: mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
                y: mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
            });
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.cursor;
        let c1 = self.map(x1, y1);
        let c2 = self.map(x2, y2);
        let p1 = self.map(x, y);
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let mt = 1.0 - t;
            let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            self.push_line(Point {
                x: a * p0.x + b * c1.x + c * c2.x + d * p1.x,
                y: a * p0.y + b * c1.y + c * c2.y + d * p1.y,
            });
        }
    }

    fn close(&mut self) {
        let start = self.start;
        self.push_line(start);
    }
}
