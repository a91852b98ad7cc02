use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    config::SketchConfig,
    core::{Canvas, Point},
    error::{GlyphdriftError, GlyphdriftResult},
    noise::Noise2,
    render::FrameRenderer,
    sampler::GlyphSampler,
    scene::{InputOutcome, SceneState},
    trail::TrailBuffer,
};

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

/// Interactive shell: owns the window, the softbuffer surface, and the
/// per-frame loop. All sketch behavior lives in the library modules; this
/// type only routes window events into them.
pub struct SketchApp {
    config: SketchConfig,
    font_bytes: Vec<u8>,
    sampler: GlyphSampler,
    trail: TrailBuffer,
    noise: Noise2,
    points: Vec<Point>,
    started: Instant,
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    renderer: Option<FrameRenderer>,
    scene: Option<SceneState>,
}

impl SketchApp {
    pub fn new(config: SketchConfig, font_bytes: Vec<u8>) -> GlyphdriftResult<Self> {
        config.validate()?;
        let trail = TrailBuffer::new(config.trail_lifetime_ms);
        Ok(Self {
            config,
            font_bytes,
            sampler: GlyphSampler::new(),
            trail,
            noise: Noise2::default(),
            points: Vec::new(),
            started: Instant::now(),
            window: None,
            surface: None,
            renderer: None,
            scene: None,
        })
    }

    /// Run the event loop until the window closes.
    pub fn run(mut self) -> GlyphdriftResult<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| GlyphdriftError::render(format!("event loop creation failed: {e}")))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| GlyphdriftError::render(format!("event loop failed: {e}")))
    }

    fn resample(&mut self) -> GlyphdriftResult<()> {
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| GlyphdriftError::render("resample before scene init"))?;
        let entry = &self.config.words[scene.word_index()];
        self.points = self.sampler.sample(
            &entry.word,
            &self.font_bytes,
            self.config.font_size,
            scene.sample_factor(),
            scene.canvas,
        )?;
        Ok(())
    }

    fn init_surface(&mut self, event_loop: &ActiveEventLoop) -> GlyphdriftResult<()> {
        let attrs = Window::default_attributes()
            .with_title("glyphdrift")
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(DEFAULT_WIDTH),
                f64::from(DEFAULT_HEIGHT),
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| GlyphdriftError::render(format!("window creation failed: {e}")))?,
        );
        // The sketch paints its own cursor marker.
        window.set_cursor_visible(false);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| GlyphdriftError::render(format!("softbuffer context failed: {e}")))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| GlyphdriftError::render(format!("softbuffer surface failed: {e}")))?;

        let size = window.inner_size();
        let canvas = Canvas::new(size.width.max(1), size.height.max(1))?;
        self.renderer = Some(FrameRenderer::new(canvas, self.font_bytes.clone())?);
        self.scene = Some(SceneState::new(canvas, self.config.words.len())?);
        self.window = Some(window);
        self.surface = Some(surface);
        self.reshape(canvas)?;
        self.resample()
    }

    fn reshape(&mut self, canvas: Canvas) -> GlyphdriftResult<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(canvas)?;
        }
        if let Some(surface) = self.surface.as_mut() {
            let (Some(w), Some(h)) = (NonZeroU32::new(canvas.width), NonZeroU32::new(canvas.height))
            else {
                return Err(GlyphdriftError::render("zero-sized surface"));
            };
            surface
                .resize(w, h)
                .map_err(|e| GlyphdriftError::render(format!("surface resize failed: {e}")))?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> GlyphdriftResult<()> {
        let now_ms = self.started.elapsed().as_millis() as u64;
        let t = now_ms as f64 / 1000.0;
        let (Some(scene), Some(renderer), Some(surface)) = (
            self.scene.as_ref(),
            self.renderer.as_mut(),
            self.surface.as_mut(),
        ) else {
            return Ok(());
        };

        self.trail.push(scene.cursor, now_ms);
        self.trail.prune(now_ms);
        renderer.render(
            scene,
            &self.config,
            &self.points,
            &self.trail,
            now_ms,
            t,
            self.noise,
        )?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| GlyphdriftError::render(format!("surface buffer failed: {e}")))?;
        pack_0rgb(renderer.pixel_data(), &mut buffer);
        buffer
            .present()
            .map_err(|e| GlyphdriftError::render(format!("surface present failed: {e}")))?;
        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) -> GlyphdriftResult<()> {
        let canvas = Canvas::new(width, height)?;
        let outcome = match self.scene.as_mut() {
            Some(scene) => scene.resize(canvas),
            None => return Ok(()),
        };
        if outcome == InputOutcome::Resample {
            self.reshape(canvas)?;
            self.resample()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &Key) -> GlyphdriftResult<()> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };
        let outcome = match key {
            Key::Named(NamedKey::ArrowLeft) => scene.prev_word(),
            Key::Named(NamedKey::ArrowRight) => scene.next_word(),
            Key::Named(NamedKey::Enter) => scene.next_effect(),
            Key::Named(NamedKey::ArrowUp) => scene.raise_density(),
            Key::Named(NamedKey::ArrowDown) => scene.lower_density(),
            _ => InputOutcome::Keep,
        };
        if outcome == InputOutcome::Resample {
            self.resample()?;
        }
        Ok(())
    }

    fn fail(&self, event_loop: &ActiveEventLoop, err: GlyphdriftError) {
        tracing::error!(error = %err, "sketch error, exiting");
        event_loop.exit();
    }
}

impl ApplicationHandler for SketchApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_surface(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(err) = self.handle_resize(size.width, size.height) {
                    self.fail(event_loop, err);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let Err(err) = self.handle_key(&event.logical_key) {
                        self.fail(event_loop, err);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.cursor = scene.canvas.clamp(Point::new(position.x, position.y));
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                    return;
                }
                // Continuous animation: immediately schedule the next frame.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Pack premultiplied RGBA8 into softbuffer's 0RGB u32 layout. The frame
/// is fully opaque, so premultiplied channels are the display channels.
fn pack_0rgb(rgba: &[u8], out: &mut [u32]) {
    for (px, slot) in rgba.chunks_exact(4).zip(out.iter_mut()) {
        *slot = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_0rgb_drops_alpha_and_orders_channels() {
        let rgba = [0x11, 0x22, 0x33, 0xFF, 0xAA, 0xBB, 0xCC, 0x00];
        let mut out = [0u32; 2];
        pack_0rgb(&rgba, &mut out);
        assert_eq!(out, [0x0011_2233, 0x00AA_BBCC]);
    }

    #[test]
    fn pack_0rgb_tolerates_short_output() {
        let rgba = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut out = [0u32; 1];
        pack_0rgb(&rgba, &mut out);
        assert_eq!(out[0], 0x0001_0203);
    }
}
