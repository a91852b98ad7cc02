#![forbid(unsafe_code)]

pub mod app;
pub mod background;
pub mod config;
pub mod core;
pub mod error;
pub mod field;
pub mod noise;
pub mod render;
pub mod sampler;
pub mod scene;
pub mod text;
pub mod trail;

pub use app::SketchApp;
pub use config::{BackgroundSpec, FillRule, SketchConfig, TileShape, WordEntry};
pub use core::{Canvas, Point, Rect, Rgba8, Vec2, remap};
pub use error::{GlyphdriftError, GlyphdriftResult};
pub use field::{FieldContext, FieldEffect};
pub use noise::Noise2;
pub use render::{FrameRenderer, FrameRgba};
pub use sampler::GlyphSampler;
pub use scene::SceneState;
pub use trail::{TrailBuffer, TrailSample};
