pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

use crate::error::{GlyphdriftError, GlyphdriftResult};

/// Drawing surface size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> GlyphdriftResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphdriftError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Clamp a point into the canvas bounds.
    pub fn clamp(self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, f64::from(self.width)),
            p.y.clamp(0.0, f64::from(self.height)),
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    /// Channel-wise inversion of the opaque part; alpha forced opaque.
    pub fn inverted(self) -> Self {
        Self::opaque(255 - self.r, 255 - self.g, 255 - self.b)
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Linearly remap `v` from [in0, in1] to [out0, out1].
///
/// Deliberately unclamped: several field formulas rely on values outside the
/// input range extrapolating (the distortion ripple has no hard cutoff).
/// A degenerate input range maps everything to `out0`.
pub fn remap(v: f64, in0: f64, in1: f64, out0: f64, out1: f64) -> f64 {
    let span = in1 - in0;
    if span == 0.0 {
        return out0;
    }
    out0 + (v - in0) / span * (out1 - out0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
