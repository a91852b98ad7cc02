use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use glyphdrift::{
    Canvas, FieldEffect, FrameRenderer, GlyphSampler, Noise2, Point, SceneState, SketchApp,
    SketchConfig, TrailBuffer,
};

#[derive(Parser, Debug)]
#[command(name = "glyphdrift", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive sketch window (default).
    Run(RunArgs),
    /// Render a single frame headlessly as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Font file used for both the sampled word and overlay text.
    #[arg(long, default_value = "assets/Lagency-Regular.otf")]
    font: PathBuf,

    /// Optional sketch configuration JSON overriding the built-in words.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file used for both the sampled word and overlay text.
    #[arg(long, default_value = "assets/Lagency-Regular.otf")]
    font: PathBuf,

    /// Optional sketch configuration JSON overriding the built-in words.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word index to display.
    #[arg(long, default_value_t = 0)]
    word: usize,

    /// Displacement effect index (0-8).
    #[arg(long, default_value_t = 0)]
    effect: usize,

    /// Sample factor; lower means denser.
    #[arg(long, default_value_t = 0.1)]
    density: f64,

    /// Simulated cursor position as `x,y`; defaults to the canvas center.
    #[arg(long)]
    cursor: Option<String>,

    /// Animation clock in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        None => cmd_run(RunArgs {
            font: PathBuf::from("assets/Lagency-Regular.otf"),
            config: None,
        }),
        Some(Command::Run(args)) => cmd_run(args),
        Some(Command::Frame(args)) => cmd_frame(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<SketchConfig> {
    let config = match path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
            let r = BufReader::new(f);
            serde_json::from_reader(r).with_context(|| "parse config JSON")?
        }
        None => SketchConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_font(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font_bytes = read_font(&args.font)?;
    let app = SketchApp::new(config, font_bytes)?;
    app.run()?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font_bytes = read_font(&args.font)?;

    let canvas = Canvas::new(args.width, args.height)?;
    let mut scene = SceneState::new(canvas, config.words.len())?;
    for _ in 0..args.word.min(config.words.len().saturating_sub(1)) {
        scene.next_word();
    }
    let target = FieldEffect::from_index(args.effect);
    while scene.effect() != target {
        scene.next_effect();
    }
    scene.set_sample_factor(args.density);
    scene.cursor = match args.cursor.as_deref() {
        Some(raw) => canvas.clamp(parse_cursor(raw)?),
        None => canvas.center(),
    };

    let entry = &config.words[scene.word_index()];
    let mut sampler = GlyphSampler::new();
    let points = sampler.sample(
        &entry.word,
        &font_bytes,
        config.font_size,
        scene.sample_factor(),
        canvas,
    )?;

    let now_ms = (args.time * 1000.0).max(0.0) as u64;
    let trail = TrailBuffer::new(config.trail_lifetime_ms);
    let mut renderer = FrameRenderer::new(canvas, font_bytes)?;
    renderer.render(
        &scene,
        &config,
        &points,
        &trail,
        now_ms,
        args.time,
        Noise2::default(),
    )?;
    let frame = renderer.frame();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn parse_cursor(raw: &str) -> anyhow::Result<Point> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("cursor '{raw}' is not 'x,y'"))?;
    Ok(Point::new(
        x.trim().parse().with_context(|| "parse cursor x")?,
        y.trim().parse().with_context(|| "parse cursor y")?,
    ))
}
