use crate::error::{GlyphdriftError, GlyphdriftResult};

/// Static sketch configuration: the word list with its per-word derived
/// constants, plus trail/marker geometry. The default carries the built-in
/// three-word sketch; a JSON override may swap in other words.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SketchConfig {
    pub words: Vec<WordEntry>,
    /// Display size of the sampled word, in pixels.
    pub font_size: f32,
    /// Trail sample lifetime in milliseconds.
    pub trail_lifetime_ms: u64,
    /// Diameter of each trail gradient disc.
    pub trail_diameter: f64,
    /// Diameter of each rendered cloud point.
    pub point_diameter: f64,
    /// Diameter of the solid cursor marker.
    pub cursor_diameter: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub quote: String,
    pub fill: FillRule,
    pub background: BackgroundSpec,
}

/// How cloud points (and, by extension, overlay text) are colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    /// Solid white points, white overlay text.
    Light,
    /// Solid black points, black overlay text.
    Dark,
    /// Each point samples the background pixel beneath it and inverts it.
    InvertBackground,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BackgroundSpec {
    /// Color-graded tile grid; cell counts follow the cursor.
    Tiles {
        max_cols: u32,
        max_rows: u32,
        shape: TileShape,
        /// Three control hues in degrees, blended in HSB at full
        /// saturation and brightness.
        hues: [f64; 3],
    },
    /// Grayscale soft grid; cell counts follow the cursor.
    SoftGrid { max_cols: u32, max_rows: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TileShape {
    Rect,
    Ellipse,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            words: vec![
                WordEntry {
                    word: "inspiration".to_string(),
                    quote: "\u{201c}Inspiration exists, but it has to find us working.\u{201d} \u{2013} Picasso".to_string(),
                    fill: FillRule::Light,
                    background: BackgroundSpec::Tiles {
                        max_cols: 50,
                        max_rows: 10,
                        shape: TileShape::Rect,
                        hues: [290.0, 180.0, 60.0],
                    },
                },
                WordEntry {
                    word: "curiosity".to_string(),
                    quote: "\u{201c}Curiosity is the wick in the candle of learning.\u{201d} \u{2013} William Arthur Ward".to_string(),
                    fill: FillRule::InvertBackground,
                    background: BackgroundSpec::Tiles {
                        max_cols: 60,
                        max_rows: 12,
                        shape: TileShape::Ellipse,
                        hues: [30.0, 200.0, 120.0],
                    },
                },
                WordEntry {
                    word: "resiliency".to_string(),
                    quote: "\u{201c}Resiliency is accepting your new reality.\u{201d} \u{2013} Elizabeth Edwards".to_string(),
                    fill: FillRule::Dark,
                    background: BackgroundSpec::SoftGrid {
                        max_cols: 30,
                        max_rows: 15,
                    },
                },
            ],
            font_size: 300.0,
            trail_lifetime_ms: 100,
            trail_diameter: 40.0,
            point_diameter: 4.0,
            cursor_diameter: 10.0,
        }
    }
}

impl SketchConfig {
    pub fn validate(&self) -> GlyphdriftResult<()> {
        if self.words.is_empty() {
            return Err(GlyphdriftError::validation(
                "config must declare at least one word",
            ));
        }
        for entry in &self.words {
            if entry.word.trim().is_empty() {
                return Err(GlyphdriftError::validation("word must be non-empty"));
            }
            match entry.background {
                BackgroundSpec::Tiles {
                    max_cols, max_rows, ..
                }
                | BackgroundSpec::SoftGrid { max_cols, max_rows } => {
                    if max_cols == 0 || max_rows == 0 {
                        return Err(GlyphdriftError::validation(format!(
                            "word '{}' has a background grid with zero cells",
                            entry.word
                        )));
                    }
                }
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(GlyphdriftError::validation(
                "font_size must be finite and > 0",
            ));
        }
        if self.trail_lifetime_ms == 0 {
            return Err(GlyphdriftError::validation("trail_lifetime_ms must be > 0"));
        }
        for (name, v) in [
            ("trail_diameter", self.trail_diameter),
            ("point_diameter", self.point_diameter),
            ("cursor_diameter", self.cursor_diameter),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GlyphdriftError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}
