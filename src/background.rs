use vello_cpu::kurbo::{Ellipse, Rect as CpuRect, Shape};

use crate::{
    config::{BackgroundSpec, TileShape},
    core::{Canvas, Point, Rgba8, lerp, remap},
};

/// Live grid resolution: the clamped cursor remaps onto [1, max] columns
/// and rows, truncating toward zero.
pub fn grid_dims(cursor: Point, canvas: Canvas, max_cols: u32, max_rows: u32) -> (u32, u32) {
    let c = canvas.clamp(cursor);
    let cols = remap(c.x, 0.0, f64::from(canvas.width), 1.0, f64::from(max_cols)) as u32;
    let rows = remap(c.y, 0.0, f64::from(canvas.height), 1.0, f64::from(max_rows)) as u32;
    (cols.clamp(1, max_cols.max(1)), rows.clamp(1, max_rows.max(1)))
}

/// Position of a cell along its axis in [0, 1]; a single row or column
/// falls back to 0 rather than dividing by zero.
fn axis_ratio(index: u32, count: u32) -> f64 {
    if count > 1 {
        f64::from(index) / f64::from(count - 1)
    } else {
        0.0
    }
}

/// Two-stage hue blend across three control hues: the horizontal ratio
/// blends pairs (1,2) and (2,3), the vertical ratio blends the results.
/// Full saturation and brightness throughout.
pub fn tile_color(col: u32, row: u32, cols: u32, rows: u32, hues: [f64; 3]) -> Rgba8 {
    let tx = axis_ratio(col, cols);
    let ty = axis_ratio(row, rows);
    let top = lerp(hues[0], hues[1], tx);
    let bottom = lerp(hues[1], hues[2], tx);
    hsb_to_rgb(lerp(top, bottom, ty), 100.0, 100.0)
}

/// Grayscale value for a soft-grid cell: the average of the normalized
/// column and row position, remapped onto a narrow lightness band.
pub fn soft_shade(col: u32, row: u32, cols: u32, rows: u32) -> u8 {
    let t = (axis_ratio(col, cols) + axis_ratio(row, rows)) * 0.5;
    lerp(220.0, 255.0, t).round().clamp(0.0, 255.0) as u8
}

/// HSB to RGB, hue in degrees (wrapped), saturation/brightness in [0, 100].
pub fn hsb_to_rgb(h: f64, s: f64, b: f64) -> Rgba8 {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (b / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, bl) = match h as u32 / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgba8::opaque(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((bl + m) * 255.0).round() as u8,
    )
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Paint the configured background for this frame. Regenerated from
/// scratch every frame since the cursor changes the grid resolution.
pub fn draw(ctx: &mut vello_cpu::RenderContext, canvas: Canvas, cursor: Point, spec: &BackgroundSpec) {
    match *spec {
        BackgroundSpec::Tiles {
            max_cols,
            max_rows,
            shape,
            hues,
        } => draw_tiles(ctx, canvas, cursor, max_cols, max_rows, shape, hues),
        BackgroundSpec::SoftGrid { max_cols, max_rows } => {
            draw_soft_grid(ctx, canvas, cursor, max_cols, max_rows);
        }
    }
}

fn fill_base(ctx: &mut vello_cpu::RenderContext, canvas: Canvas, color: Rgba8) {
    ctx.set_paint(cpu_color(color));
    ctx.fill_rect(&CpuRect::new(
        0.0,
        0.0,
        f64::from(canvas.width),
        f64::from(canvas.height),
    ));
}

fn draw_tiles(
    ctx: &mut vello_cpu::RenderContext,
    canvas: Canvas,
    cursor: Point,
    max_cols: u32,
    max_rows: u32,
    shape: TileShape,
    hues: [f64; 3],
) {
    fill_base(ctx, canvas, Rgba8::WHITE);
    let (cols, rows) = grid_dims(cursor, canvas, max_cols, max_rows);
    let w = f64::from(canvas.width) / f64::from(cols);
    let h = f64::from(canvas.height) / f64::from(rows);

    for row in 0..rows {
        for col in 0..cols {
            ctx.set_paint(cpu_color(tile_color(col, row, cols, rows, hues)));
            let x = f64::from(col) * w;
            let y = f64::from(row) * h;
            match shape {
                TileShape::Rect => ctx.fill_rect(&CpuRect::new(x, y, x + w, y + h)),
                TileShape::Ellipse => {
                    let ellipse =
                        Ellipse::new((x + w / 2.0, y + h / 2.0), (w / 2.0, h / 2.0), 0.0);
                    ctx.fill_path(&ellipse.to_path(0.1));
                }
            }
        }
    }
}

fn draw_soft_grid(
    ctx: &mut vello_cpu::RenderContext,
    canvas: Canvas,
    cursor: Point,
    max_cols: u32,
    max_rows: u32,
) {
    fill_base(ctx, canvas, Rgba8::WHITE);
    let (cols, rows) = grid_dims(cursor, canvas, max_cols, max_rows);
    let w = f64::from(canvas.width) / f64::from(cols);
    let h = f64::from(canvas.height) / f64::from(rows);

    for row in 0..rows {
        for col in 0..cols {
            ctx.set_paint(cpu_color(Rgba8::gray(soft_shade(col, row, cols, rows))));
            let x = f64::from(col) * w;
            let y = f64::from(row) * h;
            // Overdraw by a pixel so cell seams never show through.
            ctx.fill_rect(&CpuRect::new(x, y, x + w + 1.0, y + h + 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(800, 600).unwrap()
    }

    #[test]
    fn grid_dims_follow_cursor_and_stay_in_range() {
        let c = canvas();
        assert_eq!(grid_dims(Point::new(0.0, 0.0), c, 50, 10), (1, 1));
        assert_eq!(grid_dims(Point::new(800.0, 600.0), c, 50, 10), (50, 10));
        let (cols, rows) = grid_dims(Point::new(400.0, 300.0), c, 50, 10);
        assert!((1..=50).contains(&cols));
        assert!((1..=10).contains(&rows));
    }

    #[test]
    fn grid_dims_clamp_cursor_outside_canvas() {
        let c = canvas();
        assert_eq!(grid_dims(Point::new(-100.0, -100.0), c, 50, 10), (1, 1));
        assert_eq!(grid_dims(Point::new(9000.0, 9000.0), c, 50, 10), (50, 10));
    }

    #[test]
    fn single_cell_grid_uses_neutral_ratio() {
        // No division by zero; the lone cell takes the first control hue.
        let hues = [290.0, 180.0, 60.0];
        assert_eq!(tile_color(0, 0, 1, 1, hues), hsb_to_rgb(290.0, 100.0, 100.0));
        assert_eq!(soft_shade(0, 0, 1, 1), 220);
    }

    #[test]
    fn tile_corners_hit_control_hues() {
        let hues = [290.0, 180.0, 60.0];
        let (cols, rows) = (10, 6);
        assert_eq!(
            tile_color(0, 0, cols, rows, hues),
            hsb_to_rgb(290.0, 100.0, 100.0)
        );
        // Bottom-right blends pair (2,3) fully: hue 3.
        assert_eq!(
            tile_color(cols - 1, rows - 1, cols, rows, hues),
            hsb_to_rgb(60.0, 100.0, 100.0)
        );
    }

    #[test]
    fn soft_shade_spans_the_lightness_band() {
        assert_eq!(soft_shade(0, 0, 30, 15), 220);
        assert_eq!(soft_shade(29, 14, 30, 15), 255);
        let mid = soft_shade(15, 7, 30, 15);
        assert!((220..=255).contains(&mid));
    }

    #[test]
    fn hsb_primaries_convert_exactly() {
        assert_eq!(hsb_to_rgb(0.0, 100.0, 100.0), Rgba8::opaque(255, 0, 0));
        assert_eq!(hsb_to_rgb(120.0, 100.0, 100.0), Rgba8::opaque(0, 255, 0));
        assert_eq!(hsb_to_rgb(240.0, 100.0, 100.0), Rgba8::opaque(0, 0, 255));
        assert_eq!(hsb_to_rgb(0.0, 0.0, 100.0), Rgba8::WHITE);
        assert_eq!(hsb_to_rgb(0.0, 0.0, 0.0), Rgba8::BLACK);
    }

    #[test]
    fn hsb_hue_wraps() {
        assert_eq!(hsb_to_rgb(360.0, 100.0, 100.0), hsb_to_rgb(0.0, 100.0, 100.0));
        assert_eq!(hsb_to_rgb(-120.0, 100.0, 100.0), hsb_to_rgb(240.0, 100.0, 100.0));
    }
}
