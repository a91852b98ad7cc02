use glyphdrift::{
    Canvas, FieldContext, FieldEffect, Noise2, Point, SceneState, SketchConfig, TrailBuffer,
    scene::InputOutcome,
};

fn ctx(cursor: Point) -> FieldContext {
    FieldContext {
        cursor,
        canvas: Canvas::new(800, 600).unwrap(),
        t: 0.0,
        noise: Noise2::default(),
    }
}

#[test]
fn default_config_is_valid_and_has_three_words() {
    let config = SketchConfig::default();
    config.validate().unwrap();
    assert_eq!(config.words.len(), 3);
    assert_eq!(config.words[0].word, "inspiration");
    assert_eq!(config.words[1].word, "curiosity");
    assert_eq!(config.words[2].word, "resiliency");
    assert_eq!(config.font_size, 300.0);
    assert_eq!(config.trail_lifetime_ms, 100);
}

#[test]
fn config_round_trips_through_json() {
    let config = SketchConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SketchConfig = serde_json::from_str(&json).unwrap();
    back.validate().unwrap();
    assert_eq!(back.words.len(), config.words.len());
    assert_eq!(back.words[2].quote, config.words[2].quote);
}

#[test]
fn word_switching_walks_the_configured_list() {
    let config = SketchConfig::default();
    let canvas = Canvas::new(800, 600).unwrap();
    let mut scene = SceneState::new(canvas, config.words.len()).unwrap();

    assert_eq!(scene.prev_word(), InputOutcome::Resample);
    assert_eq!(config.words[scene.word_index()].word, "resiliency");
    scene.next_word();
    scene.next_word();
    assert_eq!(config.words[scene.word_index()].word, "curiosity");
}

#[test]
fn enter_cycles_through_all_nine_effects() {
    let canvas = Canvas::new(800, 600).unwrap();
    let mut scene = SceneState::new(canvas, 3).unwrap();
    let mut seen = Vec::new();
    for _ in 0..9 {
        seen.push(scene.effect());
        scene.next_effect();
    }
    assert_eq!(scene.effect(), seen[0]);
    for effect in FieldEffect::ALL {
        assert!(seen.contains(&effect));
    }
}

#[test]
fn repulsion_pushes_straight_away_with_linear_falloff() {
    let c = ctx(Point::new(400.0, 300.0));
    let p = Point::new(460.0, 300.0);
    let off = FieldEffect::Repulsion.displace(p, &c);
    // d = 60 gives force 20, directly along +x.
    assert!((off.x - 20.0).abs() < 1e-9);
    assert!(off.y.abs() < 1e-9);

    let far = FieldEffect::Repulsion.displace(Point::new(700.0, 300.0), &c);
    assert_eq!(far, glyphdrift::Vec2::ZERO);
}

#[test]
fn cutoff_effects_are_inert_far_from_the_cursor() {
    let c = ctx(Point::new(100.0, 100.0));
    let p = Point::new(700.0, 500.0);
    for effect in [
        FieldEffect::Repulsion,
        FieldEffect::MagneticPull,
        FieldEffect::Swirl,
        FieldEffect::BubbleExpansion,
    ] {
        assert_eq!(effect.displace(p, &c), glyphdrift::Vec2::ZERO, "{:?}", effect);
    }
}

#[test]
fn distortion_ripple_reaches_past_other_cutoffs() {
    let c = ctx(Point::new(400.0, 300.0));
    // 300px out: every cutoff effect is inert, the distortion envelope is
    // negative but still active.
    let p = Point::new(700.0, 300.0);
    let off = FieldEffect::DistortionRipple.displace(p, &c);
    assert!(off.x != 0.0 || off.y != 0.0);
}

#[test]
fn trail_prunes_by_age_and_fades_to_zero() {
    let mut trail = TrailBuffer::new(100);
    trail.push(Point::new(10.0, 10.0), 0);
    trail.push(Point::new(20.0, 20.0), 60);
    trail.push(Point::new(30.0, 30.0), 120);

    trail.prune(120);
    assert_eq!(trail.len(), 2); // the t=0 sample aged out at 120ms

    let fades: Vec<f64> = trail.iter_faded(120).map(|(_, f)| f).collect();
    assert!((fades[0] - 0.4).abs() < 1e-9);
    assert!((fades[1] - 1.0).abs() < 1e-9);

    trail.prune(500);
    assert!(trail.is_empty());
}

#[test]
fn resize_updates_canvas_and_flags_resample() {
    let mut scene = SceneState::new(Canvas::new(640, 480).unwrap(), 3).unwrap();
    scene.cursor = Point::new(600.0, 400.0);
    assert_eq!(
        scene.resize(Canvas::new(1920, 1080).unwrap()),
        InputOutcome::Resample
    );
    assert_eq!(scene.canvas.center(), Point::new(960.0, 540.0));
}

#[test]
fn density_keys_cover_the_full_step_range() {
    let mut scene = SceneState::new(Canvas::new(800, 600).unwrap(), 3).unwrap();
    let mut factors = vec![scene.sample_factor()];
    while scene.lower_density() == InputOutcome::Resample {
        factors.push(scene.sample_factor());
    }
    while scene.raise_density() == InputOutcome::Resample {
        factors.push(scene.sample_factor());
    }
    let min = factors.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = factors.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!((min - 0.05).abs() < 1e-12);
    assert!((max - 0.2).abs() < 1e-12);
}
