use kurbo::PathEl;
use skrifa::{
    FontRef, GlyphId, MetadataProvider,
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
};

use crate::{
    core::{BezPath, Canvas, Point},
    error::{GlyphdriftError, GlyphdriftResult},
    text::TextLayoutEngine,
};

/// Arc-length between samples per unit of density factor: factor 0.05
/// yields a 2 px spacing (dense), factor 0.2 an 8 px spacing (sparse).
/// Growing the factor therefore never grows the point count.
const SPACING_SCALE: f64 = 40.0;

/// Curve flattening tolerance for outline sampling, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;

pub fn spacing_for_factor(factor: f64) -> f64 {
    factor * SPACING_SCALE
}

/// Converts a word into a point cloud tracing its glyph outlines.
pub struct GlyphSampler {
    text: TextLayoutEngine,
}

impl Default for GlyphSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSampler {
    pub fn new() -> Self {
        Self {
            text: TextLayoutEngine::new(),
        }
    }

    /// Sample `word` at `size_px` into canvas-space points, centered on the
    /// canvas. The factor controls sample spacing (inverse density).
    #[tracing::instrument(skip(self, font_bytes))]
    pub fn sample(
        &mut self,
        word: &str,
        font_bytes: &[u8],
        size_px: f32,
        factor: f64,
        canvas: Canvas,
    ) -> GlyphdriftResult<Vec<Point>> {
        let layout = self.text.layout_plain(word, font_bytes, size_px, Default::default())?;
        let font = FontRef::from_index(font_bytes, 0)
            .map_err(|e| GlyphdriftError::font(format!("font bytes are not a valid face: {e}")))?;
        let outlines = font.outline_glyphs();

        let spacing = spacing_for_factor(factor);
        let mut points = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyph_size = Size::new(run.run().font_size());
                for g in run.glyphs() {
                    let Some(outline) = outlines.get(GlyphId::new(g.id)) else {
                        continue;
                    };
                    let mut pen = BezPen::at_baseline(f64::from(g.x), f64::from(g.y));
                    outline
                        .draw(
                            DrawSettings::unhinted(glyph_size, LocationRef::default()),
                            &mut pen,
                        )
                        .map_err(|e| {
                            GlyphdriftError::font(format!("glyph outline draw failed: {e}"))
                        })?;
                    sample_path_into(&pen.path, spacing, &mut points);
                }
            }
        }

        tracing::debug!(word, factor, count = points.len(), "sampled glyph outlines");
        Ok(recenter(points, canvas))
    }
}

/// Pen that records a glyph outline as a canvas-space `BezPath`.
///
/// Font outlines are y-up relative to the baseline; canvas space is y-down,
/// so y coordinates are mirrored around the baseline.
struct BezPen {
    base_x: f64,
    base_y: f64,
    path: BezPath,
}

impl BezPen {
    fn at_baseline(base_x: f64, base_y: f64) -> Self {
        Self {
            base_x,
            base_y,
            path: BezPath::new(),
        }
    }

    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(self.base_x + f64::from(x), self.base_y - f64::from(y))
    }
}

impl OutlinePen for BezPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.map(cx0, cy0);
        let p = self.map(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.map(cx0, cy0);
        let c1 = self.map(cx1, cy1);
        let p = self.map(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Sample a path's outline at uniform arc-length spacing.
///
/// The path is flattened to a polyline first; each subpath contributes its
/// start point plus one point per `spacing` of travelled perimeter, with
/// leftover distance carried across flattened segments.
pub fn sample_path(path: &BezPath, spacing: f64) -> Vec<Point> {
    let mut out = Vec::new();
    sample_path_into(path, spacing, &mut out);
    out
}

fn sample_path_into(path: &BezPath, spacing: f64, out: &mut Vec<Point>) {
    debug_assert!(spacing > 0.0);
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    let mut carry = 0.0;

    kurbo::flatten(path.elements().iter().copied(), FLATTEN_TOLERANCE, |el| {
        match el {
            PathEl::MoveTo(p) => {
                start = p;
                last = p;
                carry = 0.0;
                out.push(p);
            }
            PathEl::LineTo(p) => {
                walk_segment(last, p, spacing, &mut carry, out);
                last = p;
            }
            PathEl::ClosePath => {
                walk_segment(last, start, spacing, &mut carry, out);
                last = start;
            }
            // flatten() only emits the three elements above.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    });
}

fn walk_segment(a: Point, b: Point, spacing: f64, carry: &mut f64, out: &mut Vec<Point>) {
    let len = a.distance(b);
    if len == 0.0 {
        return;
    }
    let mut travelled = spacing - *carry;
    while travelled <= len {
        out.push(a.lerp(b, travelled / len));
        travelled += spacing;
    }
    *carry = len - (travelled - spacing);
}

/// Translate the point set so its bounding-box center coincides with the
/// canvas center. Guarantees resampling recenters after a resize.
pub fn recenter(mut points: Vec<Point>, canvas: Canvas) -> Vec<Point> {
    let Some(first) = points.first().copied() else {
        return points;
    };
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in &points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let center = canvas.center();
    let dx = center.x - (min_x + max_x) / 2.0;
    let dy = center.y - (min_y + max_y) / 2.0;
    for p in &mut points {
        p.x += dx;
        p.y += dy;
    }
    points
}
