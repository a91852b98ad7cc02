use std::f64::consts::PI;

use crate::{
    core::{Canvas, Point, Vec2, remap},
    noise::Noise2,
};

/// Per-frame inputs shared by every effect.
#[derive(Clone, Copy, Debug)]
pub struct FieldContext {
    pub cursor: Point,
    pub canvas: Canvas,
    /// Elapsed seconds since sketch start.
    pub t: f64,
    pub noise: Noise2,
}

/// The nine displacement fields. Each is a pure function of
/// (point, cursor, canvas, time); effects with a cutoff distance return an
/// exactly zero offset at and beyond the cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEffect {
    Repulsion,
    Wavy,
    PerlinNoise,
    Ripple,
    Spiral,
    MagneticPull,
    DistortionRipple,
    Swirl,
    BubbleExpansion,
}

impl FieldEffect {
    pub const ALL: [Self; 9] = [
        Self::Repulsion,
        Self::Wavy,
        Self::PerlinNoise,
        Self::Ripple,
        Self::Spiral,
        Self::MagneticPull,
        Self::DistortionRipple,
        Self::Swirl,
        Self::BubbleExpansion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Repulsion => "Repulsion",
            Self::Wavy => "Wavy",
            Self::PerlinNoise => "Perlin Noise",
            Self::Ripple => "Ripple",
            Self::Spiral => "Spiral",
            Self::MagneticPull => "Magnetic Pull",
            Self::DistortionRipple => "Distortion Ripple",
            Self::Swirl => "Swirl",
            Self::BubbleExpansion => "Bubble Expansion",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|e| *e == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    /// The next effect in cycling order, wrapping after the last.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Displacement applied to `p` before drawing.
    pub fn displace(self, p: Point, ctx: &FieldContext) -> Vec2 {
        let (x, y) = (p.x, p.y);
        let (mx, my) = (ctx.cursor.x, ctx.cursor.y);
        let t = ctx.t;
        let d = p.distance(ctx.cursor);
        // Angle from cursor to point; push effects act along it.
        let a = (y - my).atan2(x - mx);

        match self {
            Self::Repulsion => {
                if d < 100.0 {
                    let f = remap(d, 0.0, 100.0, 50.0, 0.0);
                    Vec2::new(a.cos() * f, a.sin() * f)
                } else {
                    Vec2::ZERO
                }
            }
            Self::Wavy => {
                let wave = (t * 2.0 + x * 0.03 + y * 0.03).sin() * 6.0;
                Vec2::new(
                    remap(mx, 0.0, f64::from(ctx.canvas.width), -15.0, 15.0) + wave,
                    remap(my, 0.0, f64::from(ctx.canvas.height), -15.0, 15.0) + wave,
                )
            }
            Self::PerlinNoise => {
                let nf = ctx.noise.sample(x * 0.01 + t, y * 0.01 + t);
                Vec2::new(
                    remap(nf, 0.0, 1.0, -mx * 0.03, mx * 0.03),
                    remap(nf, 0.0, 1.0, -my * 0.03, my * 0.03),
                )
            }
            Self::Ripple => {
                let rip = (t * 5.0 - d * 0.1).sin() * 5.0;
                Vec2::new(a.cos() * rip, a.sin() * rip)
            }
            Self::Spiral => {
                // Axis-independent oscillation; the only cursor-free field.
                Vec2::new((t + x * 0.01).sin() * 10.0, (t + y * 0.01).cos() * 10.0)
            }
            Self::MagneticPull => {
                if d < 100.0 {
                    let f = remap(d, 0.0, 100.0, 0.5, 0.0);
                    Vec2::new((mx - x) * f, (my - y) * f)
                } else {
                    Vec2::ZERO
                }
            }
            Self::DistortionRipple => {
                // No hard cutoff: the envelope crosses zero at d = 200 and
                // extrapolates past it.
                let f = (d / 20.0 - t * 3.0).sin() * remap(d, 0.0, 200.0, 10.0, 0.0);
                Vec2::new(a.cos() * f, a.sin() * f)
            }
            Self::Swirl => {
                if d < 150.0 {
                    let swirl = remap(d, 0.0, 150.0, PI / 3.0, 0.0);
                    let ra = a + swirl;
                    Vec2::new(
                        (ra.cos() * d - (x - mx)) * 0.5,
                        (ra.sin() * d - (y - my)) * 0.5,
                    )
                } else {
                    Vec2::ZERO
                }
            }
            Self::BubbleExpansion => {
                if d < 100.0 {
                    let f = remap(d, 0.0, 100.0, 15.0, 0.0);
                    Vec2::new(a.cos() * f, a.sin() * f)
                } else {
                    Vec2::ZERO
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Canvas;

    fn ctx(cursor: Point, t: f64) -> FieldContext {
        FieldContext {
            cursor,
            canvas: Canvas::new(800, 600).unwrap(),
            t,
            noise: Noise2::default(),
        }
    }

    #[test]
    fn cycling_covers_all_nine_and_wraps() {
        let mut e = FieldEffect::Repulsion;
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push(e);
            e = e.next();
        }
        assert_eq!(e, FieldEffect::Repulsion);
        assert_eq!(seen.len(), 9);
        for effect in FieldEffect::ALL {
            assert!(seen.contains(&effect));
        }
    }

    #[test]
    fn repulsion_matches_closed_form() {
        let c = ctx(Point::new(400.0, 300.0), 0.0);
        // d = 0: magnitude 50 (direction is atan2(0,0) = 0, i.e. +x).
        let off = FieldEffect::Repulsion.displace(Point::new(400.0, 300.0), &c);
        assert!((off.hypot() - 50.0).abs() < 1e-9);
        // d = 50: magnitude 25, pointing away from the cursor.
        let off = FieldEffect::Repulsion.displace(Point::new(450.0, 300.0), &c);
        assert!((off.x - 25.0).abs() < 1e-9);
        assert!(off.y.abs() < 1e-9);
        // d = 100: exactly zero.
        let off = FieldEffect::Repulsion.displace(Point::new(500.0, 300.0), &c);
        assert_eq!(off, Vec2::ZERO);
    }

    #[test]
    fn cutoff_effects_are_zero_beyond_cutoff() {
        let c = ctx(Point::new(100.0, 100.0), 1.25);
        let far = Point::new(100.0 + 250.0, 100.0);
        for effect in [
            FieldEffect::Repulsion,
            FieldEffect::MagneticPull,
            FieldEffect::Swirl,
            FieldEffect::BubbleExpansion,
        ] {
            assert_eq!(effect.displace(far, &c), Vec2::ZERO, "{}", effect.name());
        }
        // At the cutoff exactly.
        let at100 = Point::new(200.0, 100.0);
        assert_eq!(FieldEffect::Repulsion.displace(at100, &c), Vec2::ZERO);
        assert_eq!(FieldEffect::MagneticPull.displace(at100, &c), Vec2::ZERO);
        assert_eq!(FieldEffect::BubbleExpansion.displace(at100, &c), Vec2::ZERO);
        let at150 = Point::new(250.0, 100.0);
        assert_eq!(FieldEffect::Swirl.displace(at150, &c), Vec2::ZERO);
    }

    #[test]
    fn magnetic_pull_moves_points_toward_cursor() {
        let c = ctx(Point::new(200.0, 200.0), 0.0);
        let p = Point::new(240.0, 200.0); // d = 40
        let off = FieldEffect::MagneticPull.displace(p, &c);
        // f = remap(40, 0,100, 0.5,0) = 0.3; offset = (cursor - p) * f.
        assert!((off.x - (-40.0 * 0.3)).abs() < 1e-9);
        assert!(off.y.abs() < 1e-9);
    }

    #[test]
    fn ripple_magnitude_is_bounded_by_five() {
        let c = ctx(Point::new(320.0, 240.0), 2.7);
        for i in 0..100 {
            let p = Point::new(f64::from(i) * 7.3, f64::from(i) * 3.1);
            let off = FieldEffect::Ripple.displace(p, &c);
            assert!(off.hypot() <= 5.0 + 1e-9);
        }
    }

    #[test]
    fn spiral_ignores_cursor() {
        let a = ctx(Point::new(0.0, 0.0), 1.5);
        let b = ctx(Point::new(799.0, 599.0), 1.5);
        let p = Point::new(123.0, 321.0);
        assert_eq!(
            FieldEffect::Spiral.displace(p, &a),
            FieldEffect::Spiral.displace(p, &b)
        );
    }

    #[test]
    fn distortion_ripple_envelope_vanishes_at_200() {
        let c = ctx(Point::new(0.0, 0.0), 0.9);
        let off = FieldEffect::DistortionRipple.displace(Point::new(200.0, 0.0), &c);
        assert!(off.hypot() < 1e-9);
        // Approaching 200 the magnitude envelope shrinks toward zero:
        // at d = 199 the envelope is 10 * (1 - 199/200) = 0.05.
        let near = FieldEffect::DistortionRipple
            .displace(Point::new(199.0, 0.0), &c)
            .hypot();
        assert!(near <= 0.05 + 1e-9);
    }

    #[test]
    fn wavy_offset_at_canvas_center_is_pure_wave() {
        let c = ctx(Point::new(400.0, 300.0), 0.0);
        let p = Point::new(0.0, 0.0);
        let off = FieldEffect::Wavy.displace(p, &c);
        // Cursor at center remaps to 0 on both axes, leaving the shared
        // sinusoid, which is identical on x and y.
        assert!((off.x - off.y).abs() < 1e-9);
        assert!(off.x.abs() <= 6.0 + 1e-9);
    }

    #[test]
    fn noise_effect_is_zero_with_cursor_at_origin() {
        let c = ctx(Point::new(0.0, 0.0), 3.0);
        let off = FieldEffect::PerlinNoise.displace(Point::new(64.0, 64.0), &c);
        assert_eq!(off, Vec2::ZERO);
    }

    #[test]
    fn swirl_rotates_about_cursor_with_half_strength() {
        let c = ctx(Point::new(100.0, 100.0), 0.0);
        let p = Point::new(100.0, 100.0); // d = 0: rotated delta is zero
        assert_eq!(FieldEffect::Swirl.displace(p, &c), Vec2::ZERO);

        let p = Point::new(175.0, 100.0); // d = 75, swirl angle = pi/6
        let off = FieldEffect::Swirl.displace(p, &c);
        let swirl = remap(75.0, 0.0, 150.0, PI / 3.0, 0.0);
        let expected = Vec2::new(
            (swirl.cos() * 75.0 - 75.0) * 0.5,
            (swirl.sin() * 75.0) * 0.5,
        );
        assert!((off.x - expected.x).abs() < 1e-9);
        assert!((off.y - expected.y).abs() < 1e-9);
    }
}
