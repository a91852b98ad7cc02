use crate::{
    core::{Canvas, Point},
    error::{GlyphdriftError, GlyphdriftResult},
    field::FieldEffect,
};

pub const MIN_SAMPLE_FACTOR: f64 = 0.05;
pub const MAX_SAMPLE_FACTOR: f64 = 0.2;
pub const SAMPLE_FACTOR_STEP: f64 = 0.01;
pub const DEFAULT_SAMPLE_FACTOR: f64 = 0.1;

/// The complete mutable state of the sketch, threaded explicitly through
/// input handling and the frame renderer. Indices stay valid by
/// construction: words wrap modulo the configured list, the density factor
/// is clamped on every step.
#[derive(Clone, Copy, Debug)]
pub struct SceneState {
    word_index: usize,
    word_count: usize,
    effect: FieldEffect,
    sample_factor: f64,
    pub canvas: Canvas,
    pub cursor: Point,
}

/// Whether an input operation invalidated the sampled point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Resample,
    Keep,
}

impl SceneState {
    pub fn new(canvas: Canvas, word_count: usize) -> GlyphdriftResult<Self> {
        if word_count == 0 {
            return Err(GlyphdriftError::validation(
                "scene requires at least one word",
            ));
        }
        Ok(Self {
            word_index: 0,
            word_count,
            effect: FieldEffect::Repulsion,
            sample_factor: DEFAULT_SAMPLE_FACTOR,
            canvas,
            cursor: canvas.center(),
        })
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn effect(&self) -> FieldEffect {
        self.effect
    }

    pub fn sample_factor(&self) -> f64 {
        self.sample_factor
    }

    pub fn next_word(&mut self) -> InputOutcome {
        self.word_index = (self.word_index + 1) % self.word_count;
        InputOutcome::Resample
    }

    pub fn prev_word(&mut self) -> InputOutcome {
        self.word_index = (self.word_index + self.word_count - 1) % self.word_count;
        InputOutcome::Resample
    }

    pub fn next_effect(&mut self) -> InputOutcome {
        self.effect = self.effect.next();
        InputOutcome::Keep
    }

    /// More points: shrink the sample factor one step (clamped).
    pub fn raise_density(&mut self) -> InputOutcome {
        self.set_sample_factor(self.sample_factor - SAMPLE_FACTOR_STEP)
    }

    /// Fewer points: grow the sample factor one step (clamped).
    pub fn lower_density(&mut self) -> InputOutcome {
        self.set_sample_factor(self.sample_factor + SAMPLE_FACTOR_STEP)
    }

    pub fn set_sample_factor(&mut self, factor: f64) -> InputOutcome {
        let clamped = factor.clamp(MIN_SAMPLE_FACTOR, MAX_SAMPLE_FACTOR);
        if clamped == self.sample_factor {
            return InputOutcome::Keep;
        }
        self.sample_factor = clamped;
        InputOutcome::Resample
    }

    pub fn resize(&mut self, canvas: Canvas) -> InputOutcome {
        self.canvas = canvas;
        InputOutcome::Resample
    }
}
