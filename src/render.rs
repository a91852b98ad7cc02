use vello_cpu::kurbo::{Affine as CpuAffine, Circle as CpuCircle, Shape};

use crate::{
    background,
    config::{FillRule, SketchConfig, WordEntry},
    core::{Canvas, Point, Rgba8, remap},
    error::{GlyphdriftError, GlyphdriftResult},
    field::FieldContext,
    noise::Noise2,
    scene::SceneState,
    text::TextLayoutEngine,
    trail::TrailBuffer,
};

const OVERLAY_TEXT: &str =
    "<- / -> : Switch Word\nENTER     : Change Effect\nUP / DOWN : Adjust Density";
const OVERLAY_SIZE: f32 = 22.0;
const QUOTE_SIZE: f32 = 20.0;
const OVERLAY_MARGIN: f64 = 10.0;
const QUOTE_BASE_MARGIN: f64 = 30.0;

/// Trail gradient endpoints: opaque center, transparent edge.
const TRAIL_CENTER: Rgba8 = Rgba8::new(200, 150, 255, 200);
const TRAIL_EDGE: Rgba8 = Rgba8::new(50, 100, 255, 0);

/// Finished frame in row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Owns the pixmap and text machinery and runs the fixed per-frame draw
/// order: background, trail, displaced point cloud, instruction overlay,
/// quote, cursor marker.
pub struct FrameRenderer {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    text: TextLayoutEngine,
    font_bytes: Vec<u8>,
    font_data: vello_cpu::peniko::FontData,
}

impl FrameRenderer {
    pub fn new(canvas: Canvas, font_bytes: Vec<u8>) -> GlyphdriftResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.clone()),
            0,
        );
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            text: TextLayoutEngine::new(),
            font_bytes,
            font_data,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn resize(&mut self, canvas: Canvas) -> GlyphdriftResult<()> {
        if canvas == self.canvas {
            return Ok(());
        }
        let (w, h) = surface_dims(canvas)?;
        self.canvas = canvas;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(())
    }

    /// Render one frame. `now_ms`/`t` are milliseconds and seconds since
    /// sketch start; `points` is the current sampled cloud.
    pub fn render(
        &mut self,
        scene: &SceneState,
        config: &SketchConfig,
        points: &[Point],
        trail: &TrailBuffer,
        now_ms: u64,
        t: f64,
        noise: Noise2,
    ) -> GlyphdriftResult<()> {
        let entry = config.words.get(scene.word_index()).ok_or_else(|| {
            GlyphdriftError::render(format!(
                "word index {} out of range for {} configured words",
                scene.word_index(),
                config.words.len()
            ))
        })?;
        let (w, h) = surface_dims(self.canvas)?;

        // Pass 1: background and trail. The pixmap is cleared and fully
        // repainted; the cursor drives grid resolution so nothing caches.
        clear_pixmap(&mut self.pixmap, [255, 255, 255, 255]);
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        background::draw(&mut ctx, self.canvas, scene.cursor, &entry.background);
        draw_trail(&mut ctx, trail, now_ms, config.trail_diameter);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        // Pass 2: point cloud, overlays and cursor, composited over the
        // rendered background (inversion fills sample it back).
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        self.draw_points(&mut ctx, scene, entry, config, points, t, noise);
        self.draw_overlay(&mut ctx, entry)?;
        self.draw_quote(&mut ctx, entry)?;
        draw_disc(
            &mut ctx,
            scene.cursor,
            config.cursor_diameter / 2.0,
            Rgba8::WHITE,
        );
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    /// Copy out the finished frame.
    pub fn frame(&self) -> FrameRgba {
        FrameRgba {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    pub fn pixel_data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn draw_points(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &SceneState,
        entry: &WordEntry,
        config: &SketchConfig,
        points: &[Point],
        t: f64,
        noise: Noise2,
    ) {
        let fctx = FieldContext {
            cursor: scene.cursor,
            canvas: self.canvas,
            t,
            noise,
        };
        let effect = scene.effect();
        let radius = config.point_diameter / 2.0;
        for &p in points {
            let color = match entry.fill {
                FillRule::Light => Rgba8::WHITE,
                FillRule::Dark => Rgba8::BLACK,
                // Sampled at the undisplaced home position so the color
                // stays stable while the point moves.
                FillRule::InvertBackground => self.pixel_at(p).inverted(),
            };
            let off = effect.displace(p, &fctx);
            draw_disc(ctx, Point::new(p.x + off.x, p.y + off.y), radius, color);
        }
    }

    fn draw_overlay(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        entry: &WordEntry,
    ) -> GlyphdriftResult<()> {
        let color = self.contrast_color(entry.fill, Point::new(OVERLAY_MARGIN, OVERLAY_MARGIN));
        let layout =
            self.text
                .layout_plain(OVERLAY_TEXT, &self.font_bytes, OVERLAY_SIZE, color)?;
        draw_layout(ctx, &self.font_data, &layout, OVERLAY_MARGIN, OVERLAY_MARGIN);
        Ok(())
    }

    fn draw_quote(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        entry: &WordEntry,
    ) -> GlyphdriftResult<()> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let color = match entry.fill {
            FillRule::Dark => Rgba8::BLACK,
            FillRule::InvertBackground => {
                self.pixel_at(Point::new(w / 2.0, h - 40.0)).inverted()
            }
            FillRule::Light => Rgba8::gray(80),
        };
        let layout = self
            .text
            .layout_plain(&entry.quote, &self.font_bytes, QUOTE_SIZE, color)?;
        let x = w / 2.0 - f64::from(layout.width()) / 2.0;
        let y = h - QUOTE_BASE_MARGIN - f64::from(layout.height());
        draw_layout(ctx, &self.font_data, &layout, x, y);
        Ok(())
    }

    /// Overlay text contrast rule: dark words get black text, inverting
    /// words invert the background pixel at the anchor, else white.
    fn contrast_color(&self, fill: FillRule, anchor: Point) -> Rgba8 {
        match fill {
            FillRule::Dark => Rgba8::BLACK,
            FillRule::InvertBackground => self.pixel_at(anchor).inverted(),
            FillRule::Light => Rgba8::WHITE,
        }
    }

    /// Read back a pixel from the rendered pixmap. The background passes
    /// paint every pixel opaque, so premultiplied equals straight here.
    fn pixel_at(&self, p: Point) -> Rgba8 {
        let x = (p.x.round() as i64).clamp(0, i64::from(self.canvas.width) - 1) as usize;
        let y = (p.y.round() as i64).clamp(0, i64::from(self.canvas.height) - 1) as usize;
        let idx = (y * self.canvas.width as usize + x) * 4;
        let data = self.pixmap.data_as_u8_slice();
        match data.get(idx..idx + 4) {
            Some(px) => Rgba8::new(px[0], px[1], px[2], px[3]),
            None => Rgba8::WHITE,
        }
    }
}

fn surface_dims(canvas: Canvas) -> GlyphdriftResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| GlyphdriftError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| GlyphdriftError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn draw_disc(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64, color: Rgba8) {
    ctx.set_paint(cpu_color(color));
    let circle = CpuCircle::new((center.x, center.y), radius.max(0.0));
    ctx.fill_path(&circle.to_path(0.1));
}

/// Painted radial gradient: concentric discs shading from the opaque
/// center color out to the transparent edge color, scaled by the sample's
/// fade factor. Oldest samples draw first.
fn draw_trail(ctx: &mut vello_cpu::RenderContext, trail: &TrailBuffer, now_ms: u64, diameter: f64) {
    let r = (diameter / 2.0).max(1.0);
    for (sample, fade) in trail.iter_faded(now_ms) {
        let center = Rgba8::new(
            TRAIL_CENTER.r,
            TRAIL_CENTER.g,
            TRAIL_CENTER.b,
            (f64::from(TRAIL_CENTER.a) * fade).round().clamp(0.0, 255.0) as u8,
        );
        let mut i = r;
        while i >= 1.0 {
            let inter = remap(i, 0.0, r, 0.0, 1.0);
            draw_disc(ctx, sample.pos, i, Rgba8::lerp(center, TRAIL_EDGE, inter));
            i -= 1.0;
        }
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<Rgba8>,
    dx: f64,
    dy: f64,
) {
    ctx.set_transform(CpuAffine::translate((dx, dy)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(cpu_color(brush));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(CpuAffine::IDENTITY);
}
